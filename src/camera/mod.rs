//! Orbit camera: pose state with derived matrices, and the controller
//! that turns camera commands into clamped (optionally smoothed) motion.

/// Orbit controller: limits, sensitivities, smoothing.
pub mod controller;
/// Camera state, orbit pose, and derived view/projection.
pub mod core;

pub use self::controller::{ControlMode, OrbitController, VelocityState};
pub use self::core::{viewport_aspect, CameraBasis, CameraState, OrbitPose};
