//! # camrig-core
//!
//! Orthographic camera rig that keeps a set of moving targets in frame.
//!
//! This crate provides:
//! - Critically damped smoothing (`Damping`, `Dampable`)
//! - Scene transforms and the rig/camera hierarchy (`Transform`, `RigNode`, `OrthographicCamera`)
//! - The target seam (`FramingTarget`, `Target`)
//! - The rig itself (`CameraRig`) and its tuning (`RigConfig`)
//! - A fixed-step driver (`FixedTimestep`)

pub mod camera;
pub mod config;
pub mod damping;
pub mod rig;
pub mod target;
pub mod timestep;
pub mod transform;

pub use camera::{OrthographicCamera, RigNode};
pub use config::{EmptyTargetPolicy, RigConfig, RigConfigError};
pub use damping::{Dampable, Damping};
pub use rig::{CameraRig, RigState};
pub use target::{FramingTarget, Target};
pub use timestep::FixedTimestep;
pub use transform::Transform;
