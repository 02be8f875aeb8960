//! Orthographic camera and the node hierarchy it is bound from.

use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Non-perspective camera view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthographicCamera {
    /// Half the vertical extent visible, in world units
    pub orthographic_size: f32,
    /// Viewport width divided by height
    pub aspect: f32,
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            orthographic_size: 5.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl OrthographicCamera {
    pub fn new(orthographic_size: f32, aspect: f32) -> Self {
        Self {
            orthographic_size,
            aspect,
        }
    }

    /// Half the horizontal extent visible, in world units.
    pub fn half_width(&self) -> f32 {
        self.orthographic_size * self.aspect
    }
}

/// A node of the rig hierarchy. The root's transform is the rig transform;
/// any node may carry the camera the rig drives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RigNode {
    pub name: String,
    pub transform: Transform,
    #[serde(default)]
    pub camera: Option<OrthographicCamera>,
    #[serde(default)]
    pub children: Vec<RigNode>,
}

impl RigNode {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            camera: None,
            children: Vec::new(),
        }
    }

    pub fn with_camera(mut self, camera: OrthographicCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_child(mut self, child: RigNode) -> Self {
        self.children.push(child);
        self
    }

    /// Child indices leading to the first camera, searching this node first
    /// and then its children depth-first.
    pub fn find_camera_path(&self) -> Option<Vec<usize>> {
        if self.camera.is_some() {
            return Some(Vec::new());
        }
        self.children.iter().enumerate().find_map(|(i, child)| {
            child.find_camera_path().map(|mut path| {
                path.insert(0, i);
                path
            })
        })
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&RigNode> {
        path.iter().try_fold(self, |node, &i| node.children.get(i))
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut RigNode> {
        path.iter().try_fold(self, |node, &i| node.children.get_mut(i))
    }

    /// Dotted name path, e.g. `CameraRig/Main Camera`, for log messages.
    pub fn describe_path(&self, path: &[usize]) -> String {
        let mut names = vec![self.name.clone()];
        let mut node = self;
        for &i in path {
            match node.children.get(i) {
                Some(child) => {
                    names.push(child.name.clone());
                    node = child;
                }
                None => break,
            }
        }
        names.join("/")
    }
}
