//! # camrig - orthographic camera rig harness
//!
//! Runs scripted scenarios against the camera rig from `camrig-core` and
//! reports whether every target stayed in frame.

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod scenario;
