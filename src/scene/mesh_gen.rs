//! Static geometry for the fixed scene: ground grid, coordinate axes,
//! the pyramid centerpiece, and the UV sphere.
//!
//! Everything here runs once at scene construction.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Vertex layout shared by every mesh: position and normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal (unit length).
    pub normal: [f32; 3],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// How the index buffer is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every three indices form a triangle.
    Triangles,
    /// Every two indices form a line segment.
    Lines,
}

/// Indexed vertex data ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Vertex array.
    pub vertices: Vec<MeshVertex>,
    /// Indices into `vertices`.
    pub indices: Vec<u32>,
    /// Primitive assembly.
    pub topology: Topology,
}

impl MeshData {
    fn new(topology: Topology) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::new(position, normal));
        index
    }
}

/// World axis selector for [`axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    /// Drawn in both directions along X.
    X,
    /// Drawn upward only.
    Y,
    /// Drawn in both directions along Z.
    Z,
}

/// Square line grid of side `size` on the y = 0 plane, centered on the
/// origin, with a line every `spacing` units in both directions.
#[must_use]
pub fn grid(size: f32, spacing: f32) -> MeshData {
    let mut mesh = MeshData::new(Topology::Lines);
    if !(size > 0.0 && spacing > 0.0) {
        return mesh;
    }
    let half = size / 2.0;
    // Epsilon absorbs float error so 33 / 0.33 yields 100 intervals.
    let steps = (size / spacing + 1e-3).floor() as u32;
    for i in 0..=steps {
        let offset = -half + i as f32 * spacing;
        for (a, b) in [
            (Vec3::new(-half, 0.0, offset), Vec3::new(half, 0.0, offset)),
            (Vec3::new(offset, 0.0, -half), Vec3::new(offset, 0.0, half)),
        ] {
            let ia = mesh.push_vertex(a, Vec3::Y);
            let ib = mesh.push_vertex(b, Vec3::Y);
            mesh.indices.extend([ia, ib]);
        }
    }
    mesh
}

/// One coordinate axis as thick-line quads. X and Z run from `-size` to
/// `size`; Y runs from the origin up to `size`.
#[must_use]
pub fn axis(id: AxisId, size: f32, thickness: f32) -> MeshData {
    let segments: &[(Vec3, Vec3)] = match id {
        AxisId::X => &[
            (Vec3::ZERO, Vec3::X),
            (Vec3::ZERO, Vec3::NEG_X),
        ],
        AxisId::Y => &[(Vec3::ZERO, Vec3::Y)],
        AxisId::Z => &[
            (Vec3::ZERO, Vec3::Z),
            (Vec3::ZERO, Vec3::NEG_Z),
        ],
    };
    let mut mesh = MeshData::new(Topology::Triangles);
    for &(start, dir) in segments {
        push_thick_line(&mut mesh, start, start + dir * size, thickness);
    }
    mesh
}

fn push_thick_line(mesh: &mut MeshData, start: Vec3, end: Vec3, thickness: f32) {
    let direction = (end - start).normalize_or_zero();
    let side = if direction.dot(Vec3::Y).abs() > 0.9 {
        direction.cross(Vec3::X)
    } else {
        direction.cross(Vec3::Y)
    }
    .normalize_or_zero();
    let offset = side * (thickness / 2.0);
    let normal = side.cross(direction).normalize_or(Vec3::Y);

    let base = mesh.vertices.len() as u32;
    for position in [start - offset, start + offset, end - offset, end + offset] {
        let _ = mesh.push_vertex(position, normal);
    }
    mesh.indices
        .extend([base, base + 1, base + 2, base + 1, base + 3, base + 2]);
}

/// Apex height of a triangular pyramid whose side faces meet at
/// `apex_angle` (radians) over a base inscribed in `base_radius`.
#[must_use]
pub fn pyramid_height(apex_angle: f32, base_radius: f32) -> f32 {
    let half_edge = base_radius * 3.0f32.sqrt() / 2.0;
    half_edge / (apex_angle / 2.0).tan()
}

fn pyramid_corners(apex_angle: f32, base_radius: f32) -> (Vec3, [Vec3; 3]) {
    let apex = Vec3::new(0.0, pyramid_height(apex_angle, base_radius), 0.0);
    let base = [0.0f32, 1.0, 2.0].map(|i| {
        let (sin, cos) = (i * TAU / 3.0).sin_cos();
        Vec3::new(base_radius * cos, 0.0, base_radius * sin)
    });
    (apex, base)
}

/// Open triangular pyramid standing on y = 0: three flat-shaded side faces
/// with outward normals, counter-clockwise when seen from outside.
#[must_use]
pub fn pyramid(apex_angle: f32, base_radius: f32) -> MeshData {
    let (apex, base) = pyramid_corners(apex_angle, base_radius);
    let mut mesh = MeshData::new(Topology::Triangles);
    for i in 0..3 {
        let (a, b) = (base[(i + 1) % 3], base[i]);
        let normal = (a - apex).cross(b - apex).normalize_or(Vec3::Y);
        for position in [apex, a, b] {
            let index = mesh.push_vertex(position, normal);
            mesh.indices.push(index);
        }
    }
    mesh
}

/// The six edges of the pyramid as a line list.
#[must_use]
pub fn pyramid_edges(apex_angle: f32, base_radius: f32) -> MeshData {
    let (apex, base) = pyramid_corners(apex_angle, base_radius);
    let mut mesh = MeshData::new(Topology::Lines);
    let top = mesh.push_vertex(apex, Vec3::Y);
    let corners = base.map(|corner| {
        let normal = (corner - apex).normalize_or(Vec3::Y);
        mesh.push_vertex(corner, normal)
    });
    for i in 0..3 {
        mesh.indices.extend([top, corners[i]]);
        mesh.indices.extend([corners[i], corners[(i + 1) % 3]]);
    }
    mesh
}

/// Latitude/longitude sphere centered on the origin.
#[must_use]
pub fn uv_sphere(radius: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::new(Topology::Triangles);
    for i in 0..=segments {
        let theta = i as f32 * PI / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for j in 0..=segments {
            let phi = j as f32 * TAU / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal =
                Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
            let _ = mesh.push_vertex(normal * radius, normal);
        }
    }
    let row = segments + 1;
    for i in 0..segments {
        for j in 0..segments {
            let first = i * row + j;
            let second = first + row;
            mesh.indices.extend([
                first,
                first + 1,
                second,
                second,
                first + 1,
                second + 1,
            ]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(mesh: &MeshData, index: u32) -> Vec3 {
        Vec3::from_array(mesh.vertices[index as usize].position)
    }

    #[test]
    fn grid_has_a_line_per_step_each_way() {
        let mesh = grid(33.0, 0.33);
        assert_eq!(mesh.topology, Topology::Lines);
        // 101 lines along each axis, two endpoints each.
        assert_eq!(mesh.vertices.len(), 404);
        assert_eq!(mesh.indices.len(), 404);
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.position[1] == 0.0 && v.position[0].abs() <= 16.5 + 1e-3));
    }

    #[test]
    fn degenerate_grid_is_empty() {
        assert!(grid(10.0, 0.0).vertices.is_empty());
        assert!(grid(-1.0, 1.0).indices.is_empty());
    }

    #[test]
    fn axes_extend_to_size() {
        let x = axis(AxisId::X, 33.0, 0.03);
        let y = axis(AxisId::Y, 33.0, 0.03);
        assert_eq!(x.vertices.len(), 8);
        assert_eq!(x.indices.len(), 12);
        assert_eq!(y.vertices.len(), 4);
        let max_x = x.vertices.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let min_x = x.vertices.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        assert!((max_x - 33.0).abs() < 1e-5);
        assert!((min_x + 33.0).abs() < 1e-5);
        assert!(y.vertices.iter().all(|v| v.position[1] >= 0.0));
        // Quad width equals the thickness.
        let width = (position(&y, 1) - position(&y, 0)).length();
        assert!((width - 0.03).abs() < 1e-6);
    }

    #[test]
    fn pyramid_faces_point_outward() {
        let mesh = pyramid(std::f32::consts::PI / 6.0, 1.5);
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.indices.len(), 9);
        let height = pyramid_height(std::f32::consts::PI / 6.0, 1.5);
        assert!((height - 4.848).abs() < 1e-3);
        let axis_point = Vec3::new(0.0, height / 3.0, 0.0);
        for face in mesh.indices.chunks(3) {
            let [a, b, c] = [face[0], face[1], face[2]].map(|i| position(&mesh, i));
            let normal = Vec3::from_array(mesh.vertices[face[0] as usize].normal);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid - axis_point) > 0.0);
            let winding = (b - a).cross(c - a).normalize();
            assert!(winding.abs_diff_eq(normal, 1e-5));
        }
    }

    #[test]
    fn pyramid_has_six_edges() {
        let mesh = pyramid_edges(std::f32::consts::PI / 6.0, 1.5);
        assert_eq!(mesh.topology, Topology::Lines);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 12);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = uv_sphere(0.3, 32);
        assert_eq!(mesh.vertices.len(), 33 * 33);
        assert_eq!(mesh.indices.len(), 32 * 32 * 6);
        for vertex in &mesh.vertices {
            let p = Vec3::from_array(vertex.position);
            let n = Vec3::from_array(vertex.normal);
            assert!((p.length() - 0.3).abs() < 1e-5);
            assert!(n.abs_diff_eq(p / 0.3, 1e-4));
        }
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }
}
