//! Scenario execution engine

use anyhow::{bail, Context, Result};
use camrig_core::timestep::{DEFAULT_FIXED_STEP, DEFAULT_MAX_STEPS_PER_FRAME};
use camrig_core::{CameraRig, FixedTimestep, RigConfig, Target};
use glam::Vec3;
use std::time::Instant;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::{ExecutionReport, TraceEntry};

/// Configuration for scenario executor
#[derive(Debug, Clone)]
pub struct ScenarioExecutorConfig {
    /// Fixed step length in seconds
    pub fixed_step: f32,

    /// Cap on fixed steps per `AdvanceTime` frame
    pub max_steps_per_frame: u32,

    /// Frame rate used when `AdvanceTime` doesn't give one
    pub frame_rate: f32,

    /// Record rig state after every fixed step
    pub record_trace: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for ScenarioExecutorConfig {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            frame_rate: 60.0,
            record_trace: true,
            verbose: false,
        }
    }
}

/// Executes scenario actions against a camera rig
pub struct ScenarioExecutor {
    /// Configuration
    config: ScenarioExecutorConfig,

    /// Drives `AdvanceTime` actions
    timestep: FixedTimestep,

    /// Fixed steps run so far
    step_count: usize,

    /// Simulated time in seconds
    sim_time: f32,

    /// Action execution log
    log: Vec<String>,

    /// Rig state per step
    trace: Vec<TraceEntry>,

    /// Step timings (microseconds)
    step_times: Vec<f64>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        let timestep =
            FixedTimestep::new(config.fixed_step).with_max_steps(config.max_steps_per_frame);
        Self {
            config,
            timestep,
            step_count: 0,
            sim_time: 0.0,
            log: Vec::new(),
            trace: Vec::new(),
            step_times: Vec::new(),
        }
    }

    /// Run a scenario from a fresh rig and return the report.
    ///
    /// `rig_config` is used unless the scenario carries its own.
    pub fn execute_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
        rig_config: &RigConfig,
    ) -> Result<ExecutionReport> {
        let total_start = Instant::now();
        self.reset();

        let rig_config = scenario.config.clone().unwrap_or_else(|| rig_config.clone());
        rig_config
            .validate()
            .with_context(|| format!("Invalid rig config in scenario '{}'", scenario.name))?;

        let mut rig = CameraRig::new(rig_config, scenario.rig.build_root());
        let mut targets = scenario.targets.clone();
        let mut report = ExecutionReport::new(scenario.name.clone());

        self.log(&format!("Running scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("  {}", scenario.description));
        }

        // Setup phase
        let setup_start = Instant::now();
        for (i, action) in scenario.setup.iter().enumerate() {
            self.execute_action(action, &mut rig, &mut targets)
                .with_context(|| format!("Setup action {} ({}) failed", i, action.label()))?;
            report.actions_executed += 1;
        }
        report.performance.setup_duration_ms = setup_start.elapsed().as_secs_f64() * 1000.0;

        // Main actions
        let action_start = Instant::now();
        for (i, action) in scenario.actions.iter().enumerate() {
            if self.config.verbose {
                log::debug!("Action {}: {:?}", i, action);
            }
            self.execute_action(action, &mut rig, &mut targets)
                .with_context(|| format!("Action {} ({}) failed", i, action.label()))?;
            report.actions_executed += 1;
        }
        report.performance.action_duration_ms = action_start.elapsed().as_secs_f64() * 1000.0;
        report.final_state = Some(rig.state());

        // Verification
        let verify_start = Instant::now();
        for condition in &scenario.verify {
            let result = condition.evaluate(&rig, &targets);
            if result.passed {
                if self.config.verbose {
                    self.log(&format!("  ✓ {}", result.message));
                }
            } else {
                self.log(&format!("  ✗ {}", result.message));
                report.verification_failures.push(result);
            }
        }
        report.performance.verification_duration_ms =
            verify_start.elapsed().as_secs_f64() * 1000.0;

        report.passed = report.verification_failures.is_empty();
        report.steps_executed = self.step_count;
        report.performance.total_duration_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        if !self.step_times.is_empty() {
            report.performance.avg_step_time_us =
                self.step_times.iter().sum::<f64>() / self.step_times.len() as f64;
            report.performance.peak_step_time_us =
                self.step_times.iter().copied().fold(0.0, f64::max);
        }
        report.log = std::mem::take(&mut self.log);
        report.trace = std::mem::take(&mut self.trace);

        Ok(report)
    }

    fn execute_action(
        &mut self,
        action: &ScenarioAction,
        rig: &mut CameraRig,
        targets: &mut [Target],
    ) -> Result<()> {
        match action {
            ScenarioAction::SetStartPositionAndSize => {
                rig.set_start_position_and_size(&*targets);
                let position = rig.position();
                self.log(&format!(
                    "Placed rig at ({:.2}, {:.2}, {:.2})",
                    position.x, position.y, position.z
                ));
            }

            ScenarioAction::Step { steps } => {
                for _ in 0..*steps {
                    self.fixed_step(rig, targets);
                }
            }

            ScenarioAction::AdvanceTime {
                seconds,
                frame_rate,
            } => {
                let fps = frame_rate.unwrap_or(self.config.frame_rate);
                if !(fps > 0.0 && fps.is_finite()) {
                    bail!("Frame rate must be positive, got {}", fps);
                }
                let frame_dt = 1.0 / fps;
                let frames = (seconds.max(0.0) * fps).round() as usize;
                for _ in 0..frames {
                    for _ in 0..self.timestep.advance(frame_dt) {
                        self.fixed_step(rig, targets);
                    }
                }
            }

            ScenarioAction::MoveTarget { target, x, y, z } => {
                let i = find_target(targets, target)?;
                targets[i].position = Vec3::new(*x, *y, *z);
            }

            ScenarioAction::MoveTargetBy { target, dx, dy, dz } => {
                let i = find_target(targets, target)?;
                targets[i].position += Vec3::new(*dx, *dy, *dz);
            }

            ScenarioAction::DriveTarget {
                target,
                vx,
                vz,
                steps,
            } => {
                let i = find_target(targets, target)?;
                let velocity = Vec3::new(*vx, 0.0, *vz);
                for _ in 0..*steps {
                    targets[i].position += velocity * self.timestep.step();
                    self.fixed_step(rig, targets);
                }
            }

            ScenarioAction::SetActive { target, active } => {
                let i = find_target(targets, target)?;
                targets[i].active = *active;
                self.log(&format!(
                    "{} {}",
                    target,
                    if *active { "activated" } else { "deactivated" }
                ));
            }

            ScenarioAction::SetAspect { aspect } => {
                if !rig.has_camera() {
                    log::warn!("SetAspect ignored, rig has no camera");
                }
                rig.set_aspect(*aspect);
            }

            ScenarioAction::Log { message } => {
                self.log(message);
            }
        }

        Ok(())
    }

    /// Run one fixed update and record it
    fn fixed_step(&mut self, rig: &mut CameraRig, targets: &[Target]) {
        let dt = self.timestep.step();
        let step_start = Instant::now();

        rig.fixed_update(targets, dt);

        self.step_times
            .push(step_start.elapsed().as_secs_f64() * 1_000_000.0);
        self.step_count += 1;
        self.sim_time += dt;

        if self.config.record_trace {
            self.trace.push(TraceEntry {
                step: self.step_count,
                time: self.sim_time,
                state: rig.state(),
            });
        }
    }

    fn reset(&mut self) {
        self.timestep.reset();
        self.step_count = 0;
        self.sim_time = 0.0;
        self.log.clear();
        self.trace.clear();
        self.step_times.clear();
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn find_target(targets: &[Target], name: &str) -> Result<usize> {
    match targets.iter().position(|t| t.name == name) {
        Some(i) => Ok(i),
        None => bail!("Unknown target '{}'", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::definition::RigSetup;
    use crate::scenario::verification::VerificationCondition;

    fn scenario(targets: Vec<Target>, actions: Vec<ScenarioAction>) -> ScenarioDefinition {
        ScenarioDefinition {
            name: "test".to_string(),
            description: String::new(),
            rig: RigSetup::default(),
            config: None,
            targets,
            setup: vec![ScenarioAction::SetStartPositionAndSize],
            actions,
            verify: Vec::new(),
        }
    }

    #[test]
    fn test_tank_duel_passes() {
        let mut executor = ScenarioExecutor::new();
        let report = executor
            .execute_scenario(&ScenarioDefinition::tank_duel(), &RigConfig::default())
            .unwrap();

        assert!(report.passed, "{}", report.summary());
        assert!(report.steps_executed >= 200);
        assert_eq!(report.trace.len(), report.steps_executed);
    }

    #[test]
    fn test_step_counts_and_trace() {
        let mut executor = ScenarioExecutor::new();
        let def = scenario(
            vec![Target::new("a", Vec3::new(5.0, 0.0, 0.0))],
            vec![ScenarioAction::Step { steps: 7 }],
        );

        let report = executor.execute_scenario(&def, &RigConfig::default()).unwrap();
        assert_eq!(report.steps_executed, 7);
        assert_eq!(report.trace.last().unwrap().step, 7);
        assert!((report.trace.last().unwrap().time - 0.14).abs() < 1e-4);
    }

    #[test]
    fn test_advance_time_uses_fixed_steps() {
        let mut executor = ScenarioExecutor::new();
        let def = scenario(
            vec![Target::new("a", Vec3::ZERO)],
            vec![ScenarioAction::AdvanceTime {
                seconds: 1.0,
                frame_rate: Some(100.0),
            }],
        );

        let report = executor.execute_scenario(&def, &RigConfig::default()).unwrap();
        // One second at the 50 Hz default step
        assert!((49..=50).contains(&report.steps_executed));
    }

    #[test]
    fn test_unknown_target_is_error() {
        let mut executor = ScenarioExecutor::new();
        let def = scenario(
            vec![Target::new("a", Vec3::ZERO)],
            vec![ScenarioAction::SetActive {
                target: "ghost".to_string(),
                active: false,
            }],
        );

        let err = executor
            .execute_scenario(&def, &RigConfig::default())
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Unknown target 'ghost'"));
    }

    #[test]
    fn test_invalid_scenario_config_is_error() {
        let mut executor = ScenarioExecutor::new();
        let mut def = scenario(vec![], vec![]);
        def.config = Some(RigConfig {
            damp_time: -1.0,
            ..RigConfig::default()
        });

        assert!(executor.execute_scenario(&def, &RigConfig::default()).is_err());
    }

    #[test]
    fn test_failed_verification_reported() {
        let mut executor = ScenarioExecutor::new();
        let mut def = scenario(
            vec![Target::new("a", Vec3::ZERO)],
            vec![ScenarioAction::Step { steps: 1 }],
        );
        def.verify = vec![VerificationCondition::SizeAtLeast { min: 100.0 }];

        let report = executor.execute_scenario(&def, &RigConfig::default()).unwrap();
        assert!(!report.passed);
        assert_eq!(report.verification_failures.len(), 1);
    }

    #[test]
    fn test_move_and_deactivate() {
        let mut executor = ScenarioExecutor::new();
        let mut def = scenario(
            vec![
                Target::new("a", Vec3::ZERO),
                Target::new("b", Vec3::new(10.0, 0.0, 0.0)),
            ],
            vec![
                ScenarioAction::MoveTarget {
                    target: "a".to_string(),
                    x: -10.0,
                    y: 0.0,
                    z: 0.0,
                },
                ScenarioAction::MoveTargetBy {
                    target: "b".to_string(),
                    dx: 0.0,
                    dy: 0.0,
                    dz: 4.0,
                },
                ScenarioAction::SetActive {
                    target: "a".to_string(),
                    active: false,
                },
                ScenarioAction::Step { steps: 250 },
            ],
        );
        def.verify = vec![
            VerificationCondition::RigPosition {
                x: 10.0,
                z: 4.0,
                tolerance: 0.01,
            },
            VerificationCondition::VelocityBelow { max: 0.01 },
        ];

        let report = executor.execute_scenario(&def, &RigConfig::default()).unwrap();
        assert!(report.passed, "{}", report.summary());
    }

    #[test]
    fn test_trace_can_be_disabled() {
        let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
            record_trace: false,
            ..ScenarioExecutorConfig::default()
        });
        let def = scenario(vec![], vec![ScenarioAction::Step { steps: 3 }]);

        let report = executor.execute_scenario(&def, &RigConfig::default()).unwrap();
        assert_eq!(report.steps_executed, 3);
        assert!(report.trace.is_empty());
    }
}
