//! Shared utilities for the rendering engine.

/// Per-frame delta clock and FPS tracking.
pub mod frame_timing;
