//! Actions a scenario performs against the rig and its targets

use serde::{Deserialize, Serialize};

/// One scripted step of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Snap the rig to frame the targets without damping
    SetStartPositionAndSize,

    /// Run N fixed steps with targets standing still
    Step { steps: usize },

    /// Feed wall-clock time through the fixed timestep
    AdvanceTime {
        seconds: f32,
        /// Frames per second (defaults to the simulation config)
        #[serde(default)]
        frame_rate: Option<f32>,
    },

    /// Teleport a target
    MoveTarget {
        target: String,
        x: f32,
        y: f32,
        z: f32,
    },

    /// Offset a target
    MoveTargetBy {
        target: String,
        dx: f32,
        dy: f32,
        dz: f32,
    },

    /// Move a target on the ground plane at constant velocity while the
    /// rig runs N fixed steps
    DriveTarget {
        target: String,
        vx: f32,
        vz: f32,
        steps: usize,
    },

    /// Enable or disable a target
    SetActive { target: String, active: bool },

    /// Resize the viewport
    SetAspect { aspect: f32 },

    /// Write a message to the execution log
    Log { message: String },
}

impl ScenarioAction {
    /// Short label for log output
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioAction::SetStartPositionAndSize => "SetStartPositionAndSize",
            ScenarioAction::Step { .. } => "Step",
            ScenarioAction::AdvanceTime { .. } => "AdvanceTime",
            ScenarioAction::MoveTarget { .. } => "MoveTarget",
            ScenarioAction::MoveTargetBy { .. } => "MoveTargetBy",
            ScenarioAction::DriveTarget { .. } => "DriveTarget",
            ScenarioAction::SetActive { .. } => "SetActive",
            ScenarioAction::SetAspect { .. } => "SetAspect",
            ScenarioAction::Log { .. } => "Log",
        }
    }
}
