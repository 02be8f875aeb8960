//! Execution results and reporting

use anyhow::{Context, Result};
use camrig_core::RigState;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::verification::VerificationResult;

/// Timing metrics for a scenario execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Total wall-clock time (milliseconds)
    pub total_duration_ms: f64,

    /// Setup phase duration (milliseconds)
    pub setup_duration_ms: f64,

    /// Main action phase duration (milliseconds)
    pub action_duration_ms: f64,

    /// Verification phase duration (milliseconds)
    pub verification_duration_ms: f64,

    /// Average time per fixed step (microseconds)
    pub avg_step_time_us: f64,

    /// Peak fixed step time (microseconds)
    pub peak_step_time_us: f64,
}

impl PerformanceMetrics {
    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Total: {:.1}ms | Avg step: {:.2}us | Peak: {:.2}us",
            self.total_duration_ms, self.avg_step_time_us, self.peak_step_time_us
        )
    }
}

/// Rig state after one fixed step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Fixed step index, starting at 1
    pub step: usize,
    /// Simulated time in seconds
    pub time: f32,
    pub state: RigState,
}

/// Report from scenario execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Scenario name
    pub scenario_name: String,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Overall pass/fail status
    pub passed: bool,

    /// Fixed steps executed
    pub steps_executed: usize,

    /// Number of actions executed
    pub actions_executed: usize,

    /// Rig state when the actions finished
    pub final_state: Option<RigState>,

    /// Verification failures (empty if all passed)
    pub verification_failures: Vec<VerificationResult>,

    /// Execution log messages
    pub log: Vec<String>,

    /// Per-step rig trace (empty when tracing is off)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceEntry>,

    /// Timing metrics
    pub performance: PerformanceMetrics,
}

impl ExecutionReport {
    /// Create new execution report
    pub fn new(scenario_name: String) -> Self {
        Self {
            scenario_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: false,
            steps_executed: 0,
            actions_executed: 0,
            final_state: None,
            verification_failures: Vec::new(),
            log: Vec::new(),
            trace: Vec::new(),
            performance: PerformanceMetrics::default(),
        }
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        let status = if self.passed { "PASSED" } else { "FAILED" };
        let mut summary = format!(
            "Scenario '{}': {} ({} steps, {} actions)\n  {}",
            self.scenario_name,
            status,
            self.steps_executed,
            self.actions_executed,
            self.performance.summary()
        );

        if let Some(state) = &self.final_state {
            summary.push_str(&format!(
                "\n  Final position: ({:.2}, {:.2}, {:.2})",
                state.position.x, state.position.y, state.position.z
            ));
            if let Some(size) = state.orthographic_size {
                summary.push_str(&format!(" | size: {:.2}", size));
            }
        }

        for failure in &self.verification_failures {
            summary.push_str(&format!("\n  ✗ {}", failure.message));
        }

        summary
    }

    /// Save report as JSON
    pub fn save_json(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let path = path.as_ref();
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
        .context("Failed to serialize report to JSON")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory: {}", parent.display())
            })?;
        }

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        Ok(())
    }
}
