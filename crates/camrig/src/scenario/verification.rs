//! Verification conditions and state checks for scenarios

use camrig_core::{CameraRig, FramingTarget, Target};
use serde::{Deserialize, Serialize};

/// Slack for checks that compare against the visible extent
const FRAMING_EPSILON: f32 = 1e-3;

/// Conditions that can be verified against rig state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VerificationCondition {
    // === POSITION CHECKS ===
    /// Assert rig ground position (with tolerance)
    RigPosition { x: f32, z: f32, tolerance: f32 },

    /// Assert rig height
    RigHeight { y: f32, tolerance: f32 },

    // === SIZE CHECKS ===
    /// Assert orthographic size
    SizeNear { expected: f32, tolerance: f32 },

    /// Assert orthographic size is at least `min`
    SizeAtLeast { min: f32 },

    /// Assert every active target is inside the visible extent
    AllTargetsFramed,

    // === MOTION CHECKS ===
    /// Assert the rig has (almost) stopped moving and zooming
    VelocityBelow { max: f32 },

    // === LOGICAL OPERATORS ===
    /// All conditions must pass
    All {
        conditions: Vec<VerificationCondition>,
    },

    /// Any condition must pass
    Any {
        conditions: Vec<VerificationCondition>,
    },

    /// Condition must NOT pass
    Not {
        condition: Box<VerificationCondition>,
    },
}

/// Outcome of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
}

impl VerificationResult {
    fn pass(message: String) -> Self {
        Self {
            passed: true,
            message,
        }
    }

    fn check(passed: bool, message: String) -> Self {
        Self { passed, message }
    }
}

impl VerificationCondition {
    /// Evaluate this condition against the rig and the scenario's targets
    pub fn evaluate(&self, rig: &CameraRig, targets: &[Target]) -> VerificationResult {
        match self {
            VerificationCondition::RigPosition { x, z, tolerance } => {
                let position = rig.position();
                let distance = ((position.x - x).powi(2) + (position.z - z).powi(2)).sqrt();
                VerificationResult::check(
                    distance <= *tolerance,
                    format!(
                        "Rig at ({:.3}, {:.3}), expected ({:.3}, {:.3}) ±{}",
                        position.x, position.z, x, z, tolerance
                    ),
                )
            }

            VerificationCondition::RigHeight { y, tolerance } => {
                let height = rig.position().y;
                VerificationResult::check(
                    (height - y).abs() <= *tolerance,
                    format!("Rig height {:.4}, expected {:.4} ±{}", height, y, tolerance),
                )
            }

            VerificationCondition::SizeNear {
                expected,
                tolerance,
            } => match rig.orthographic_size() {
                Some(size) => VerificationResult::check(
                    (size - expected).abs() <= *tolerance,
                    format!("Size {:.3}, expected {:.3} ±{}", size, expected, tolerance),
                ),
                None => VerificationResult::check(false, "Rig has no camera".to_string()),
            },

            VerificationCondition::SizeAtLeast { min } => match rig.orthographic_size() {
                Some(size) => VerificationResult::check(
                    size >= *min,
                    format!("Size {:.3}, expected at least {:.3}", size, min),
                ),
                None => VerificationResult::check(false, "Rig has no camera".to_string()),
            },

            VerificationCondition::AllTargetsFramed => evaluate_framing(rig, targets),

            VerificationCondition::VelocityBelow { max } => {
                let speed = rig.move_velocity().length();
                let zoom = rig.zoom_speed().abs();
                VerificationResult::check(
                    speed <= *max && zoom <= *max,
                    format!("Move speed {:.4}, zoom speed {:.4}, max {}", speed, zoom, max),
                )
            }

            VerificationCondition::All { conditions } => {
                let failures: Vec<String> = conditions
                    .iter()
                    .map(|c| c.evaluate(rig, targets))
                    .filter(|r| !r.passed)
                    .map(|r| r.message)
                    .collect();

                if failures.is_empty() {
                    VerificationResult::pass(format!("All {} conditions passed", conditions.len()))
                } else {
                    VerificationResult::check(false, format!("Failed: {}", failures.join("; ")))
                }
            }

            VerificationCondition::Any { conditions } => {
                let results: Vec<VerificationResult> =
                    conditions.iter().map(|c| c.evaluate(rig, targets)).collect();

                match results.iter().find(|r| r.passed) {
                    Some(result) => VerificationResult::pass(result.message.clone()),
                    None => VerificationResult::check(
                        false,
                        format!(
                            "None passed: {}",
                            results
                                .iter()
                                .map(|r| r.message.as_str())
                                .collect::<Vec<_>>()
                                .join("; ")
                        ),
                    ),
                }
            }

            VerificationCondition::Not { condition } => {
                let result = condition.evaluate(rig, targets);
                VerificationResult::check(!result.passed, format!("NOT ({})", result.message))
            }
        }
    }
}

/// Every active target must sit inside the camera's visible rectangle.
fn evaluate_framing(rig: &CameraRig, targets: &[Target]) -> VerificationResult {
    let Some(camera) = rig.camera() else {
        return VerificationResult::check(false, "Rig has no camera".to_string());
    };

    let half_height = camera.orthographic_size + FRAMING_EPSILON;
    let half_width = camera.half_width() + FRAMING_EPSILON;
    let transform = rig.transform();

    let outside: Vec<&str> = targets
        .iter()
        .filter(|t| t.is_active())
        .filter(|t| {
            let local = transform.inverse_transform_point(t.position());
            local.y.abs() > half_height || local.x.abs() > half_width
        })
        .map(|t| t.name.as_str())
        .collect();

    if outside.is_empty() {
        VerificationResult::pass(format!(
            "All active targets inside {:.2} x {:.2}",
            half_width * 2.0,
            half_height * 2.0
        ))
    } else {
        VerificationResult::check(false, format!("Out of frame: {}", outside.join(", ")))
    }
}
