//! Rendering of the scene's meshes.
//!
//! One Blinn-Phong shader drives two pipelines: filled triangles for the
//! lit meshes and a line list for the grid and wireframe edges.

pub mod mesh;
pub(crate) mod pipeline_util;

pub use mesh::SceneRenderer;
