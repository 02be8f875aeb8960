//! Rig tuning parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::damping::Damping;

/// What the desired position does when no target is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyTargetPolicy {
    /// Keep the last horizontal position
    #[default]
    HoldLast,
    /// Drift back to the world origin
    Origin,
}

/// Tuning for [`crate::CameraRig`], fixed once the scene is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Approximate time for the camera to refocus (seconds)
    pub damp_time: f32,
    /// Space between the outermost target and the screen edge
    pub screen_edge_buffer: f32,
    /// Smallest orthographic size the camera will zoom in to
    pub min_size: f32,
    /// Optional cap on rig movement speed (units/sec)
    pub max_move_speed: Option<f32>,
    /// Optional cap on zoom speed (size units/sec)
    pub max_zoom_speed: Option<f32>,
    pub empty_targets: EmptyTargetPolicy,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            damp_time: 0.2,
            screen_edge_buffer: 4.0,
            min_size: 6.5,
            max_move_speed: None,
            max_zoom_speed: None,
            empty_targets: EmptyTargetPolicy::HoldLast,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigConfigError {
    #[error("damp_time must be positive and finite, got {0}")]
    InvalidDampTime(f32),
    #[error("screen_edge_buffer must be non-negative, got {0}")]
    NegativeEdgeBuffer(f32),
    #[error("min_size must be non-negative, got {0}")]
    NegativeMinSize(f32),
    #[error("{field} must be positive when set, got {value}")]
    InvalidMaxSpeed { field: &'static str, value: f32 },
}

impl RigConfig {
    pub fn validate(&self) -> Result<(), RigConfigError> {
        if !(self.damp_time > 0.0 && self.damp_time.is_finite()) {
            return Err(RigConfigError::InvalidDampTime(self.damp_time));
        }
        if !(self.screen_edge_buffer >= 0.0) {
            return Err(RigConfigError::NegativeEdgeBuffer(self.screen_edge_buffer));
        }
        if !(self.min_size >= 0.0) {
            return Err(RigConfigError::NegativeMinSize(self.min_size));
        }
        for (field, speed) in [
            ("max_move_speed", self.max_move_speed),
            ("max_zoom_speed", self.max_zoom_speed),
        ] {
            if let Some(value) = speed {
                if !(value > 0.0) {
                    return Err(RigConfigError::InvalidMaxSpeed { field, value });
                }
            }
        }
        Ok(())
    }

    pub fn move_damping(&self) -> Damping {
        Damping::new(self.damp_time).with_max_speed(self.max_move_speed)
    }

    pub fn zoom_damping(&self) -> Damping {
        Damping::new(self.damp_time).with_max_speed(self.max_zoom_speed)
    }
}
