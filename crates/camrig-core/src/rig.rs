//! The camera rig: follows the average of its targets and zooms to fit them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{OrthographicCamera, RigNode};
use crate::config::{EmptyTargetPolicy, RigConfig};
use crate::target::{active_positions, FramingTarget};
use crate::transform::Transform;

/// Camera rig that keeps every active target on screen.
///
/// Call [`CameraRig::set_start_position_and_size`] once when the round
/// starts, then [`CameraRig::fixed_update`] every fixed step.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: RigConfig,
    root: RigNode,
    /// Where the camera was found under `root`, `None` when there is none
    camera_path: Option<Vec<usize>>,
    desired_position: Vec3,
    move_velocity: Vec3,
    zoom_speed: f32,
}

/// Observable rig state after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigState {
    pub position: Vec3,
    pub desired_position: Vec3,
    pub orthographic_size: Option<f32>,
    pub move_velocity: Vec3,
    pub zoom_speed: f32,
}

impl CameraRig {
    /// Bind the rig to the first camera in `root` or its descendants.
    ///
    /// A hierarchy without a camera is accepted; the rig still moves but
    /// every size operation becomes a no-op.
    pub fn new(config: RigConfig, root: RigNode) -> Self {
        let camera_path = root.find_camera_path();
        match &camera_path {
            Some(path) => log::debug!("Camera rig bound to {}", root.describe_path(path)),
            None => log::warn!(
                "Camera rig '{}' has no camera in its hierarchy, zoom is disabled",
                root.name
            ),
        }

        let desired_position = root.transform.translation;
        Self {
            config,
            root,
            camera_path,
            desired_position,
            move_velocity: Vec3::ZERO,
            zoom_speed: 0.0,
        }
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn root(&self) -> &RigNode {
        &self.root
    }

    pub fn transform(&self) -> &Transform {
        &self.root.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.root.transform
    }

    pub fn position(&self) -> Vec3 {
        self.root.transform.translation
    }

    /// Point the rig is currently heading for.
    pub fn desired_position(&self) -> Vec3 {
        self.desired_position
    }

    pub fn move_velocity(&self) -> Vec3 {
        self.move_velocity
    }

    pub fn zoom_speed(&self) -> f32 {
        self.zoom_speed
    }

    pub fn has_camera(&self) -> bool {
        self.camera().is_some()
    }

    pub fn camera(&self) -> Option<&OrthographicCamera> {
        let path = self.camera_path.as_deref()?;
        self.root.node_at(path)?.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut OrthographicCamera> {
        let path = self.camera_path.as_deref()?;
        self.root.node_at_mut(path)?.camera.as_mut()
    }

    pub fn orthographic_size(&self) -> Option<f32> {
        self.camera().map(|camera| camera.orthographic_size)
    }

    /// Forward a viewport resize to the bound camera.
    pub fn set_aspect(&mut self, aspect: f32) {
        if let Some(camera) = self.camera_mut() {
            camera.aspect = aspect;
        }
    }

    pub fn state(&self) -> RigState {
        RigState {
            position: self.position(),
            desired_position: self.desired_position,
            orthographic_size: self.orthographic_size(),
            move_velocity: self.move_velocity,
            zoom_speed: self.zoom_speed,
        }
    }

    /// One fixed simulation step: move toward the targets, then zoom.
    pub fn fixed_update<T: FramingTarget>(&mut self, targets: &[T], dt: f32) {
        self.move_toward_targets(targets, dt);
        self.zoom_to_fit(targets, dt);
    }

    /// Snap straight to the framing position and size, with no damping.
    ///
    /// Used when a round starts so the camera doesn't visibly pan and zoom
    /// in from wherever it was. Both velocity accumulators are cleared.
    pub fn set_start_position_and_size<T: FramingTarget>(&mut self, targets: &[T]) {
        self.update_desired_position(targets);
        self.root.transform.translation = self.desired_position;
        self.move_velocity = Vec3::ZERO;
        self.zoom_speed = 0.0;

        if let Some(size) = self.find_required_size(targets) {
            if let Some(camera) = self.camera_mut() {
                camera.orthographic_size = size;
            }
        }

        log::debug!(
            "Camera rig placed at {:?} with size {:?}",
            self.position(),
            self.orthographic_size()
        );
    }

    /// Orthographic size needed to frame the active targets with the bound
    /// camera's aspect, or `None` without a camera.
    pub fn find_required_size<T: FramingTarget>(&self, targets: &[T]) -> Option<f32> {
        let aspect = self.camera()?.aspect;
        Some(self.required_size_for_aspect(targets, aspect))
    }

    /// Orthographic size needed to frame the active targets around the
    /// desired position, measured in the rig's local space.
    ///
    /// A non-positive or non-finite `aspect` contributes no horizontal term.
    pub fn required_size_for_aspect<T: FramingTarget>(&self, targets: &[T], aspect: f32) -> f32 {
        let transform = &self.root.transform;
        let desired_local = transform.inverse_transform_point(self.desired_position);
        let use_width = aspect.is_finite() && aspect > 0.0;

        let mut size: f32 = 0.0;
        for position in active_positions(targets) {
            let offset = transform.inverse_transform_point(position) - desired_local;

            size = size.max(offset.y.abs());
            if use_width {
                size = size.max(offset.x.abs() / aspect);
            }
        }

        size += self.config.screen_edge_buffer;
        size.max(self.config.min_size)
    }

    fn move_toward_targets<T: FramingTarget>(&mut self, targets: &[T], dt: f32) {
        self.update_desired_position(targets);

        let damping = self.config.move_damping();
        let transform = &mut self.root.transform;
        transform.translation = damping.step(
            transform.translation,
            self.desired_position,
            &mut self.move_velocity,
            dt,
        );
    }

    fn zoom_to_fit<T: FramingTarget>(&mut self, targets: &[T], dt: f32) {
        let Some(required) = self.find_required_size(targets) else {
            return;
        };

        let damping = self.config.zoom_damping();
        let mut zoom_speed = self.zoom_speed;
        if let Some(camera) = self.camera_mut() {
            camera.orthographic_size =
                damping.step(camera.orthographic_size, required, &mut zoom_speed, dt);
        }
        self.zoom_speed = zoom_speed;
    }

    /// Average the active targets, keeping the rig's own height.
    fn update_desired_position<T: FramingTarget>(&mut self, targets: &[T]) {
        let (sum, count) = active_positions(targets)
            .fold((Vec3::ZERO, 0u32), |(sum, count), p| (sum + p, count + 1));

        let mut average = if count > 0 {
            sum / count as f32
        } else {
            match self.config.empty_targets {
                EmptyTargetPolicy::HoldLast => self.desired_position,
                EmptyTargetPolicy::Origin => Vec3::ZERO,
            }
        };

        average.y = self.root.transform.translation.y;
        self.desired_position = average;
    }
}
