//! Integration tests for the rig driven the way a game drives it
//!
//! An elevated, rotated rig frames tanks driving on the ground plane, stepped
//! through the fixed timestep like a host engine would.

use camrig_core::{
    CameraRig, FixedTimestep, FramingTarget, OrthographicCamera, RigConfig, RigNode, Target,
    Transform,
};
use glam::Vec3;

// ============================================================================
// Helpers
// ============================================================================

/// Rig pitched down 40 degrees and yawed 60, camera on a child node.
fn tank_rig() -> CameraRig {
    let root = RigNode::new(
        "CameraRig",
        Transform::IDENTITY.with_euler_degrees(40.0, 60.0, 0.0),
    )
    .with_child(
        RigNode::new("Main Camera", Transform::from_xyz(0.0, 0.0, -65.0))
            .with_camera(OrthographicCamera::new(5.0, 16.0 / 9.0)),
    );
    CameraRig::new(RigConfig::default(), root)
}

/// Largest local-space offset requirement, recomputed independently.
fn lower_bound(rig: &CameraRig, targets: &[Target], aspect: f32) -> f32 {
    let transform = rig.transform();
    let desired_local = transform.inverse_transform_point(rig.desired_position());
    targets
        .iter()
        .filter(|t| t.is_active())
        .map(|t| {
            let offset = transform.inverse_transform_point(t.position) - desired_local;
            offset.y.abs().max(offset.x.abs() / aspect)
        })
        .fold(0.0, f32::max)
        + rig.config().screen_edge_buffer
}

struct Tank {
    position: Vec3,
    alive: bool,
}

impl FramingTarget for Tank {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_active(&self) -> bool {
        self.alive
    }
}

// ============================================================================
// Framing Tests
// ============================================================================

#[test]
fn test_required_size_covers_every_target() {
    let mut rig = tank_rig();
    let layouts = [
        vec![Target::new("a", Vec3::new(0.0, 0.0, 0.0))],
        vec![
            Target::new("a", Vec3::new(-20.0, 0.0, 5.0)),
            Target::new("b", Vec3::new(15.0, 0.0, -30.0)),
        ],
        vec![
            Target::new("a", Vec3::new(40.0, 0.0, 40.0)),
            Target::new("b", Vec3::new(-40.0, 0.0, 40.0)),
            Target::new("c", Vec3::new(0.0, 0.0, -40.0)),
            Target::new("d", Vec3::new(500.0, 0.0, 0.0)).inactive(),
        ],
    ];

    for targets in &layouts {
        rig.set_start_position_and_size(targets);
        let size = rig.orthographic_size().unwrap();
        let aspect = rig.camera().unwrap().aspect;

        assert!(size >= rig.config().min_size);
        assert!(size + 1e-4 >= lower_bound(&rig, targets, aspect));
    }
}

#[test]
fn test_rotated_rig_keeps_height() {
    let mut rig = tank_rig();
    rig.transform_mut().translation.y = 3.0;
    let targets = vec![
        Target::new("red", Vec3::new(10.0, 0.0, 0.0)),
        Target::new("blue", Vec3::new(0.0, 0.0, 10.0)),
    ];

    rig.set_start_position_and_size(&targets);
    assert_eq!(rig.position(), Vec3::new(5.0, 3.0, 5.0));

    for _ in 0..50 {
        rig.fixed_update(&targets, 0.02);
        assert_eq!(rig.desired_position().y, 3.0);
    }
}

#[test]
fn test_custom_target_type() {
    let mut rig = tank_rig();
    let tanks = vec![
        Tank {
            position: Vec3::new(-6.0, 0.0, 0.0),
            alive: true,
        },
        Tank {
            position: Vec3::new(6.0, 0.0, 0.0),
            alive: false,
        },
    ];

    rig.set_start_position_and_size(&tanks);
    assert_eq!(rig.position(), Vec3::new(-6.0, 0.0, 0.0));
}

// ============================================================================
// Damping Tests
// ============================================================================

#[test]
fn test_immediate_versus_damped_start() {
    let targets = vec![
        Target::new("red", Vec3::new(30.0, 0.0, -10.0)),
        Target::new("blue", Vec3::new(50.0, 0.0, 10.0)),
    ];

    let mut immediate = tank_rig();
    immediate.set_start_position_and_size(&targets);
    let framed = immediate.state();

    let mut damped = tank_rig();
    damped.fixed_update(&targets, 0.02);

    // Immediate placement is already settled
    immediate.fixed_update(&targets, 0.02);
    assert_eq!(immediate.position(), framed.position);
    assert_eq!(immediate.move_velocity(), Vec3::ZERO);

    // The damped rig has only just started moving
    let remaining = damped.position().distance(framed.position);
    assert!(remaining > 0.5 * framed.position.length());
}

#[test]
fn test_damped_rig_settles_within_a_few_damp_times() {
    let mut rig = tank_rig();
    let targets = vec![
        Target::new("red", Vec3::new(12.0, 0.0, 0.0)),
        Target::new("blue", Vec3::new(-4.0, 0.0, 8.0)),
    ];
    let mut timestep = FixedTimestep::new(0.02);

    // Two seconds of 60 fps frames, ten damp times
    for _ in 0..120 {
        for _ in 0..timestep.advance(1.0 / 60.0) {
            rig.fixed_update(&targets, timestep.step());
        }
    }

    let expected = Vec3::new(4.0, 0.0, 4.0);
    assert!(rig.position().distance(expected) < 1e-2);

    let required = rig.find_required_size(&targets).unwrap();
    assert!((rig.orthographic_size().unwrap() - required).abs() < 1e-2);
}

#[test]
fn test_target_destroyed_mid_round() {
    let mut rig = tank_rig();
    let mut targets = vec![
        Target::new("red", Vec3::new(-20.0, 0.0, 0.0)),
        Target::new("blue", Vec3::new(20.0, 0.0, 0.0)),
    ];
    rig.set_start_position_and_size(&targets);
    let wide = rig.orthographic_size().unwrap();

    targets[0].active = false;
    for _ in 0..200 {
        rig.fixed_update(&targets, 0.02);
    }

    assert!(rig.position().distance(Vec3::new(20.0, 0.0, 0.0)) < 1e-2);
    assert!(rig.orthographic_size().unwrap() < wide);
    assert!((rig.orthographic_size().unwrap() - 6.5).abs() < 1e-2);
}
