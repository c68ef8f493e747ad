use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Parameters of the orbiting sphere.
pub struct AnimationOptions {
    /// Whether the sphere moves at startup.
    #[schemars(title = "Animate")]
    pub enabled: bool,
    /// Orbit radius along the world X axis.
    #[schemars(title = "Semi-major Axis", range(min = 1.0, max = 16.0), extend("step" = 0.5))]
    pub semi_major_axis: f32,
    /// Orbit radius along the world Z axis.
    #[schemars(title = "Semi-minor Axis", range(min = 1.0, max = 16.0), extend("step" = 0.5))]
    pub semi_minor_axis: f32,
    /// Height of the orbit plane.
    #[schemars(skip)]
    pub height: f32,
    /// Orbital angular speed in radians per second.
    #[schemars(title = "Orbit Speed", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub orbit_speed: f32,
    /// Self-rotation speed in radians per second.
    #[schemars(title = "Spin Speed", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub spin_speed: f32,
    /// Sphere radius.
    #[schemars(skip)]
    pub radius: f32,
    /// Latitude/longitude subdivisions of the sphere mesh.
    #[schemars(skip)]
    pub segments: u32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            semi_major_axis: 8.0,
            semi_minor_axis: 5.0,
            height: 2.0,
            orbit_speed: 0.5,
            spin_speed: 1.5,
            radius: 0.3,
            segments: 32,
        }
    }
}
