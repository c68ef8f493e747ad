use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::lighting::Light;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient term and the initial light list.
pub struct LightingOptions {
    /// Global ambient light color.
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient brightness multiplier applied on top of `ambient_color`.
    #[schemars(title = "Ambient", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub ambient_strength: f32,
    /// Lights installed when the scene is built, in insertion order.
    #[schemars(skip)]
    pub lights: Vec<Light>,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: [0.1, 0.1, 0.15],
            ambient_strength: 1.0,
            lights: vec![Light::directional(
                Vec3::new(0.3, 1.0, -0.5),
                Vec3::new(1.0, 0.95, 0.8),
                3.5,
            )],
        }
    }
}

impl LightingOptions {
    /// Ambient color scaled by the strength multiplier.
    #[must_use]
    pub fn ambient(&self) -> Vec3 {
        Vec3::from_array(self.ambient_color) * self.ambient_strength
    }
}
