//! Renderable descriptions and the per-draw uniform bundle.

use glam::{Mat3, Mat4, Vec3};

use super::mesh_gen::{MeshData, Topology};

/// Phong material coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance.
    pub ambient: Vec3,
    /// Diffuse reflectance (also the flat color of unlit materials).
    pub diffuse: Vec3,
    /// Specular reflectance.
    pub specular: Vec3,
    /// Specular exponent.
    pub shininess: f32,
    /// Whether the lighting model applies; unlit materials draw `diffuse`
    /// as-is.
    pub lit: bool,
}

impl Material {
    /// Glossy red used by the pyramid.
    pub const RED: Self = Self {
        ambient: Vec3::new(0.1, 0.0, 0.0),
        diffuse: Vec3::new(1.0, 0.0, 0.0),
        specular: Vec3::ONE,
        shininess: 32.0,
        lit: true,
    };

    /// Cool blue with a tight highlight, used by the orbiting sphere.
    pub const SPHERE: Self = Self {
        ambient: Vec3::new(0.15, 0.15, 0.2),
        diffuse: Vec3::new(0.6, 0.7, 0.95),
        specular: Vec3::new(1.0, 1.0, 0.9),
        shininess: 128.0,
        lit: true,
    };

    /// Flat color, ignoring lights.
    #[must_use]
    pub const fn unlit(color: Vec3) -> Self {
        Self {
            ambient: Vec3::ZERO,
            diffuse: color,
            specular: Vec3::ZERO,
            shininess: 1.0,
            lit: false,
        }
    }
}

/// What a renderable depicts; decides how its model matrix is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderableKind {
    /// Static scenery at the origin.
    Static,
    /// The animated orbiting body.
    OrbitingBody,
}

/// One draw call's worth of scene content.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    /// Label used for GPU resources and logging.
    pub name: &'static str,
    /// Static or animated.
    pub kind: RenderableKind,
    /// Surface material.
    pub material: Material,
    /// Geometry, built once at scene construction.
    pub mesh: MeshData,
}

impl Renderable {
    /// Primitive assembly of the mesh.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.mesh.topology
    }
}

/// Inverse-transpose of the model's upper 3×3, for transforming normals.
/// A singular model yields the identity.
#[must_use]
pub fn normal_matrix(model: &Mat4) -> Mat3 {
    let upper = Mat3::from_mat4(*model);
    if upper.determinant().abs() <= f32::EPSILON {
        return Mat3::IDENTITY;
    }
    upper.inverse().transpose()
}

/// Everything a single draw needs, derived fresh each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Object-to-world transform.
    pub model: Mat4,
    /// World-to-view transform.
    pub view: Mat4,
    /// View-to-clip transform.
    pub proj: Mat4,
    /// Normal transform derived from `model`.
    pub normal: Mat3,
    /// Surface material.
    pub material: Material,
    /// Eye position in world space.
    pub camera_position: Vec3,
}

impl FrameUniforms {
    /// Bundle the matrices, deriving the normal matrix from `model`.
    #[must_use]
    pub fn new(
        model: Mat4,
        view: Mat4,
        proj: Mat4,
        material: Material,
        camera_position: Vec3,
    ) -> Self {
        Self {
            model,
            view,
            proj,
            normal: normal_matrix(&model),
            material,
            camera_position,
        }
    }

    /// Pack into the GPU layout.
    #[must_use]
    pub fn to_gpu(&self) -> ObjectUniform {
        let m = &self.material;
        ObjectUniform {
            model: self.model.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            proj: self.proj.to_cols_array_2d(),
            normal: Mat4::from_mat3(self.normal).to_cols_array_2d(),
            ambient: m.ambient.extend(1.0).to_array(),
            diffuse: m.diffuse.extend(1.0).to_array(),
            specular: m.specular.extend(1.0).to_array(),
            camera_position: self.camera_position.extend(1.0).to_array(),
            params: [m.shininess, if m.lit { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }
}

/// Per-object uniform buffer contents.
/// NOTE: Must match the WGSL `Object` struct layout exactly (336 bytes)
///
/// The normal matrix travels as a mat4 to sidestep mat3 column padding.
/// `params.x` is the shininess, `params.y` is 1.0 for lit materials.
#[repr(C)]
#[derive(
    Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct ObjectUniform {
    /// Object-to-world transform.
    pub model: [[f32; 4]; 4],
    /// World-to-view transform.
    pub view: [[f32; 4]; 4],
    /// View-to-clip transform.
    pub proj: [[f32; 4]; 4],
    /// Normal matrix (upper 3×3 meaningful).
    pub normal: [[f32; 4]; 4],
    /// Ambient reflectance (w unused).
    pub ambient: [f32; 4],
    /// Diffuse reflectance (w unused).
    pub diffuse: [f32; 4],
    /// Specular reflectance (w unused).
    pub specular: [f32; 4],
    /// Eye position (w unused).
    pub camera_position: [f32; 4],
    /// Shininess and lit flag.
    pub params: [f32; 4],
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec4};

    use super::*;

    #[test]
    fn object_uniform_size_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 336);
    }

    #[test]
    fn normal_matrix_of_rigid_transform_is_rotation() {
        let rotation = Quat::from_rotation_y(0.7);
        let model = Mat4::from_rotation_translation(rotation, Vec3::new(3.0, 1.0, 0.0));
        let normal = normal_matrix(&model);
        assert!(normal.abs_diff_eq(Mat3::from_quat(rotation), 1e-5));
    }

    #[test]
    fn normal_matrix_corrects_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(4.0, 1.0, 1.0));
        // A surface tilted in XY: the transformed normal must stay
        // perpendicular to the transformed tangent.
        let tangent = Vec3::new(1.0, -1.0, 0.0);
        let normal = Vec3::new(1.0, 1.0, 0.0);
        let world_tangent = model.transform_vector3(tangent);
        let world_normal = normal_matrix(&model) * normal;
        assert!(world_tangent.dot(world_normal).abs() < 1e-5);
    }

    #[test]
    fn singular_model_falls_back_to_identity() {
        let model = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(normal_matrix(&model), Mat3::IDENTITY);
    }

    #[test]
    fn to_gpu_packs_material_and_flags() {
        let uniforms = FrameUniforms::new(
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Mat4::IDENTITY,
            Material::RED,
            Vec3::new(1.0, 2.0, 3.0),
        );
        let gpu = uniforms.to_gpu();
        assert_eq!(gpu.diffuse, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(gpu.params, [32.0, 1.0, 0.0, 0.0]);
        assert_eq!(gpu.camera_position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(Vec4::from_array(gpu.normal[3]), Vec4::W);

        let unlit = FrameUniforms {
            material: Material::unlit(Vec3::ONE),
            ..uniforms
        };
        assert_eq!(unlit.to_gpu().params[1], 0.0);
    }
}
