// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![warn(unused_results)]
#![warn(unused_qualifications)]
// Cast hygiene
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
// Tests may unwrap
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Orbit-camera 3D scene viewer core with touch-gesture control, built on
//! wgpu.
//!
//! Gyre renders a small fixed scene (ground grid, coordinate axes, a
//! shaded pyramid and an orbiting lit sphere) and lets the user steer an
//! orbit camera with touch gestures or the mouse.
//!
//! # Key entry points
//!
//! - [`scene::Scene`] - the scene and its per-frame update pipeline
//! - [`camera::OrbitController`] - the sole owner of the camera pose
//! - [`input::GestureTranslator`] - gestures to [`CameraCommand`]s
//! - [`engine::GyreEngine`] - the scene plus its wgpu backend
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Data flow
//!
//! Input events pass through the gesture translator, which emits camera
//! commands to the controller. Once per frame the scene advances its
//! animation, integrates camera smoothing, and derives the view,
//! projection, per-object and lighting uniforms the renderer uploads.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod lighting;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use camera::{CameraState, OrbitController};
pub use engine::command::{CameraCommand, CommandSink};
pub use engine::GyreEngine;
pub use error::GyreError;
pub use input::{GestureEvent, GesturePhase, GestureTranslator, InputEvent};
pub use lighting::{Light, LightingManager};
pub use options::Options;
pub use scene::{FrameSnapshot, Scene};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
