use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbit Controls", inline)]
#[serde(default)]
/// Limits and sensitivities for the orbit camera controller.
pub struct OrbitOptions {
    /// Lowest allowed pitch in radians.
    #[schemars(skip)]
    pub min_pitch: f32,
    /// Highest allowed pitch in radians.
    #[schemars(skip)]
    pub max_pitch: f32,
    /// Closest allowed distance to the target.
    #[schemars(title = "Min Distance", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub min_distance: f32,
    /// Farthest allowed distance from the target.
    #[schemars(title = "Max Distance", range(min = 10.0, max = 500.0), extend("step" = 1.0))]
    pub max_distance: f32,
    /// Radians of rotation per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotation_sensitivity: f32,
    /// Zoom rate per unit of pinch delta.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_sensitivity: f32,
    /// Pan rate per pixel, scaled by the current distance.
    #[schemars(title = "Pan Speed", range(min = 0.0005, max = 0.01), extend("step" = 0.0005))]
    pub pan_sensitivity: f32,
    /// Fraction of velocity lost per update in smoothed mode.
    #[schemars(title = "Damping", range(min = 0.01, max = 0.9), extend("step" = 0.01))]
    pub smoothing_factor: f32,
    /// Integrate orbit and zoom input as decaying velocity.
    #[schemars(title = "Inertia")]
    pub enable_smoothing: bool,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        let pitch_limit = std::f32::consts::FRAC_PI_2 - 0.1;
        Self {
            min_pitch: -pitch_limit,
            max_pitch: pitch_limit,
            min_distance: 0.5,
            max_distance: 100.0,
            rotation_sensitivity: 0.005,
            zoom_sensitivity: 0.05,
            pan_sensitivity: 0.002,
            smoothing_factor: 0.1,
            enable_smoothing: false,
        }
    }
}
