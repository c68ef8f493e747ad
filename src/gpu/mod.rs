//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the lighting uniform
//! buffer, and the depth attachment.

/// Lighting uniform buffer and bind group.
pub mod lighting;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment texture.
pub mod texture;
