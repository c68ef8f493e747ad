//! Scene lights and their fixed-capacity GPU packing.
//!
//! Lights form a closed set of variants. The [`LightingManager`] keeps at
//! most [`MAX_DIRECTIONAL_LIGHTS`] directional and [`MAX_POINT_LIGHTS`]
//! point lights; adding past a cap evicts the oldest light of that kind.

use std::collections::VecDeque;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Directional light slots in the lighting uniform.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;
/// Point light slots in the lighting uniform.
pub const MAX_POINT_LIGHTS: usize = 8;
/// Radius given to point lights built without one.
pub const DEFAULT_POINT_RADIUS: f32 = 10.0;

/// A scene light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    /// Parallel rays from infinitely far away.
    Directional {
        /// Direction the light travels (unit length).
        direction: Vec3,
        /// Linear RGB color.
        color: Vec3,
        /// Brightness multiplier.
        intensity: f32,
    },
    /// Omnidirectional light with a finite reach.
    Point {
        /// World-space position.
        position: Vec3,
        /// Linear RGB color.
        color: Vec3,
        /// Brightness multiplier.
        intensity: f32,
        /// Distance beyond which the light contributes nothing.
        radius: f32,
    },
}

impl Light {
    /// Directional light; `direction` is normalized (zero falls back to
    /// straight down).
    #[must_use]
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self::Directional {
            direction: direction.normalize_or(Vec3::NEG_Y),
            color,
            intensity,
        }
    }

    /// Point light with the default radius.
    #[must_use]
    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self::point_with_radius(position, color, intensity, DEFAULT_POINT_RADIUS)
    }

    /// Point light with an explicit radius.
    #[must_use]
    pub fn point_with_radius(
        position: Vec3,
        color: Vec3,
        intensity: f32,
        radius: f32,
    ) -> Self {
        Self::Point {
            position,
            color,
            intensity,
            radius,
        }
    }

    /// Light color.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        match *self {
            Self::Directional { color, .. } | Self::Point { color, .. } => color,
        }
    }

    /// Light intensity.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        match *self {
            Self::Directional { intensity, .. }
            | Self::Point { intensity, .. } => intensity,
        }
    }
}

/// Owns the scene's lights and the ambient term.
#[derive(Debug, Clone)]
pub struct LightingManager {
    directional: VecDeque<Light>,
    point: VecDeque<Light>,
    ambient_color: Vec3,
}

impl Default for LightingManager {
    fn default() -> Self {
        Self {
            directional: VecDeque::with_capacity(MAX_DIRECTIONAL_LIGHTS),
            point: VecDeque::with_capacity(MAX_POINT_LIGHTS),
            ambient_color: Vec3::splat(0.2),
        }
    }
}

impl LightingManager {
    /// Empty manager with the given ambient color.
    #[must_use]
    pub fn new(ambient_color: Vec3) -> Self {
        Self {
            ambient_color,
            ..Self::default()
        }
    }

    /// Add a light, evicting the oldest light of the same kind when that
    /// kind is at capacity. Returns the evicted light, if any.
    pub fn add_light(&mut self, light: Light) -> Option<Light> {
        let (list, cap) = match light {
            Light::Directional { .. } => {
                (&mut self.directional, MAX_DIRECTIONAL_LIGHTS)
            }
            Light::Point { .. } => (&mut self.point, MAX_POINT_LIGHTS),
        };
        list.push_back(light);
        if list.len() > cap {
            let evicted = list.pop_front();
            log::debug!("light cap {cap} reached, evicted {evicted:?}");
            return evicted;
        }
        None
    }

    /// Set the global ambient color.
    pub fn set_ambient_color(&mut self, color: Vec3) {
        self.ambient_color = color;
    }

    /// Global ambient color.
    #[must_use]
    pub fn ambient_color(&self) -> Vec3 {
        self.ambient_color
    }

    /// Remove every light (ambient is kept).
    pub fn clear(&mut self) {
        self.directional.clear();
        self.point.clear();
    }

    /// Directional lights, oldest first.
    pub fn directional_lights(&self) -> impl Iterator<Item = &Light> {
        self.directional.iter()
    }

    /// Point lights, oldest first.
    pub fn point_lights(&self) -> impl Iterator<Item = &Light> {
        self.point.iter()
    }

    /// All lights: directional first, then point, each oldest first.
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.directional.iter().chain(self.point.iter())
    }

    /// Number of lights held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directional.len() + self.point.len()
    }

    /// Whether no lights are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pack the current lights into the fixed-capacity GPU layout.
    #[must_use]
    pub fn snapshot(&self) -> LightingUniform {
        LightingUniform::pack(self.ambient_color, self.lights())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// One directional light slot (32 bytes).
pub struct DirectionalLightData {
    /// Direction the light travels.
    pub direction: [f32; 3],
    /// Brightness multiplier.
    pub intensity: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    pub(crate) _pad: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// One point light slot (32 bytes).
pub struct PointLightData {
    /// World-space position.
    pub position: [f32; 3],
    /// Brightness multiplier.
    pub intensity: f32,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Reach of the light.
    pub radius: f32,
}

/// Lighting uniform shared by the lit shaders.
/// NOTE: Must match the WGSL `Lighting` struct layout exactly (416 bytes)
///
/// WGSL layout:
///   directional: array<DirectionalLight, 4>  (offset 0,   32 B each)
///   point: array<PointLight, 8>              (offset 128, 32 B each)
///   ambient: vec3<f32>                       (offset 384)
///   directional_count: u32                   (offset 396)
///   point_count: u32                         (offset 400)
///   _pad0, _pad1, _pad2: u32                 (offset 404..416)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Directional light slots; only the first `directional_count` are live.
    pub directional: [DirectionalLightData; MAX_DIRECTIONAL_LIGHTS],
    /// Point light slots; only the first `point_count` are live.
    pub point: [PointLightData; MAX_POINT_LIGHTS],
    /// Global ambient color.
    pub ambient: [f32; 3],
    /// Live directional slots.
    pub directional_count: u32,
    /// Live point slots.
    pub point_count: u32,
    pub(crate) _pad: [u32; 3],
}

impl Default for LightingUniform {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

impl LightingUniform {
    /// Pack lights in order; lights beyond a kind's capacity are dropped
    /// and unused slots stay zeroed.
    pub fn pack<'a>(
        ambient: Vec3,
        lights: impl IntoIterator<Item = &'a Light>,
    ) -> Self {
        let mut uniform = Self {
            ambient: ambient.to_array(),
            ..Self::default()
        };
        for light in lights {
            match *light {
                Light::Directional {
                    direction,
                    color,
                    intensity,
                } => {
                    let slot = uniform.directional_count as usize;
                    if slot < MAX_DIRECTIONAL_LIGHTS {
                        uniform.directional[slot] = DirectionalLightData {
                            direction: direction.to_array(),
                            intensity,
                            color: color.to_array(),
                            _pad: 0.0,
                        };
                        uniform.directional_count += 1;
                    }
                }
                Light::Point {
                    position,
                    color,
                    intensity,
                    radius,
                } => {
                    let slot = uniform.point_count as usize;
                    if slot < MAX_POINT_LIGHTS {
                        uniform.point[slot] = PointLightData {
                            position: position.to_array(),
                            intensity,
                            color: color.to_array(),
                            radius,
                        };
                        uniform.point_count += 1;
                    }
                }
            }
        }
        uniform
    }
}
