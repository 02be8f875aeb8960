//! Targets the rig keeps in frame.
//!
//! The rig never owns its targets. Each step it borrows the host's list
//! through [`FramingTarget`] and only reads positions and active flags.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Read-only view of something the camera should keep on screen.
pub trait FramingTarget {
    /// World-space position
    fn position(&self) -> Vec3;

    /// Inactive targets are skipped entirely
    fn is_active(&self) -> bool;
}

impl<T: FramingTarget + ?Sized> FramingTarget for &T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Plain target record used by the scenario harness and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub position: Vec3,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Target {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl FramingTarget for Target {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Positions of the active targets, in list order.
pub fn active_positions<T: FramingTarget>(targets: &[T]) -> impl Iterator<Item = Vec3> + '_ {
    targets
        .iter()
        .filter(|t| t.is_active())
        .map(|t| t.position())
}
