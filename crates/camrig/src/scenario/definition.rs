//! Scenario definition and RON file loading

use anyhow::{Context, Result};
use camrig_core::{OrthographicCamera, RigConfig, RigNode, Target, Transform};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::actions::ScenarioAction;
use super::verification::VerificationCondition;

/// How the rig hierarchy is built before the scenario starts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSetup {
    /// Initial rig position
    pub position: Vec3,
    /// Downward tilt in degrees
    pub pitch: f32,
    /// Heading in degrees
    pub yaw: f32,
    /// Distance the camera sits behind the rig along its local Z
    pub camera_distance: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    /// Orthographic size before the first placement
    pub initial_size: f32,
    /// Leave the camera out to exercise the unbound path
    pub with_camera: bool,
}

impl Default for RigSetup {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            pitch: 40.0,
            yaw: 60.0,
            camera_distance: 65.0,
            aspect: 16.0 / 9.0,
            initial_size: 5.0,
            with_camera: true,
        }
    }
}

impl RigSetup {
    /// Build the `CameraRig` node with its `Main Camera` child.
    pub fn build_root(&self) -> RigNode {
        let transform = Transform::from_translation(self.position)
            .with_euler_degrees(self.pitch, self.yaw, 0.0);

        let mut camera_node = RigNode::new(
            "Main Camera",
            Transform::from_xyz(0.0, 0.0, -self.camera_distance),
        );
        if self.with_camera {
            camera_node =
                camera_node.with_camera(OrthographicCamera::new(self.initial_size, self.aspect));
        }

        RigNode::new("CameraRig", transform).with_child(camera_node)
    }
}

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Rig hierarchy setup
    #[serde(default)]
    pub rig: RigSetup,

    /// Rig tuning override (falls back to the app config)
    #[serde(default)]
    pub config: Option<RigConfig>,

    /// Targets, in the order the rig sees them
    pub targets: Vec<Target>,

    /// Initial setup actions (run before main scenario)
    #[serde(default)]
    pub setup: Vec<ScenarioAction>,

    /// Main scenario actions
    pub actions: Vec<ScenarioAction>,

    /// Verification checks to run after scenario
    #[serde(default)]
    pub verify: Vec<VerificationCondition>,
}

impl ScenarioDefinition {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))?;

        Ok(scenario)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Two tanks start apart, drive toward each other, then one is
    /// destroyed and the camera settles on the survivor.
    pub fn tank_duel() -> Self {
        Self {
            name: "Tank Duel".to_string(),
            description: "Two tanks close in, one is destroyed, the rig refocuses".to_string(),
            rig: RigSetup::default(),
            config: None,
            targets: vec![
                Target::new("Red Tank", Vec3::new(-25.0, 0.0, 10.0)),
                Target::new("Blue Tank", Vec3::new(25.0, 0.0, -10.0)),
            ],
            setup: vec![ScenarioAction::SetStartPositionAndSize],
            actions: vec![
                ScenarioAction::Log {
                    message: "Tanks advance".to_string(),
                },
                ScenarioAction::DriveTarget {
                    target: "Red Tank".to_string(),
                    vx: 6.0,
                    vz: -2.0,
                    steps: 100,
                },
                ScenarioAction::DriveTarget {
                    target: "Blue Tank".to_string(),
                    vx: -6.0,
                    vz: 2.0,
                    steps: 100,
                },
                ScenarioAction::Log {
                    message: "Blue Tank destroyed".to_string(),
                },
                ScenarioAction::SetActive {
                    target: "Blue Tank".to_string(),
                    active: false,
                },
                ScenarioAction::AdvanceTime {
                    seconds: 3.0,
                    frame_rate: None,
                },
            ],
            verify: vec![
                VerificationCondition::AllTargetsFramed,
                VerificationCondition::RigHeight {
                    y: 0.0,
                    tolerance: 1e-4,
                },
                VerificationCondition::RigPosition {
                    x: -13.0,
                    z: 6.0,
                    tolerance: 0.05,
                },
                VerificationCondition::SizeNear {
                    expected: 6.5,
                    tolerance: 0.05,
                },
            ],
        }
    }
}
