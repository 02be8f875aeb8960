//! Harness configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `camrig.ron` file (if exists)
//! 3. Environment variables prefixed with `CAMRIG_`
//!
//! Example environment variable: `CAMRIG_RIG__DAMP_TIME=0.35`

use anyhow::{Context, Result};
use camrig_core::RigConfig;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioExecutorConfig;

/// Main harness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub rig: RigConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Fixed-step simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed step length in seconds
    pub fixed_step: f32,
    /// Cap on fixed steps run for one frame
    pub max_steps_per_frame: u32,
    /// Default frame rate for `AdvanceTime` actions
    pub frame_rate: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_step: 0.02,
            max_steps_per_frame: 4,
            frame_rate: 60.0,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Record rig state after every fixed step
    pub record_trace: bool,
    /// Pretty-print JSON reports
    pub pretty: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            record_trace: true,
            pretty: true,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `<path>.ron` file (if exists)
    /// 3. Environment variables prefixed with `CAMRIG_` (highest priority)
    pub fn load_from(path: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("rig.damp_time", 0.2)?
            .set_default("rig.screen_edge_buffer", 4.0)?
            .set_default("rig.min_size", 6.5)?
            .set_default("rig.empty_targets", "HoldLast")?
            .set_default("simulation.fixed_step", 0.02)?
            .set_default("simulation.max_steps_per_frame", 4_i64)?
            .set_default("simulation.frame_rate", 60.0)?
            .set_default("report.record_trace", true)?
            .set_default("report.pretty", true)?
            .set_default("debug.verbose_logging", false)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(path)
                    .format(FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (CAMRIG_RIG__DAMP_TIME, etc.)
            .add_source(
                Environment::with_prefix("CAMRIG")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config
            .rig
            .validate()
            .context("Invalid rig configuration")?;

        Ok(config)
    }
}

impl From<&AppConfig> for ScenarioExecutorConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            fixed_step: config.simulation.fixed_step,
            max_steps_per_frame: config.simulation.max_steps_per_frame,
            frame_rate: config.simulation.frame_rate,
            record_trace: config.report.record_trace,
            verbose: config.debug.verbose_logging,
        }
    }
}
