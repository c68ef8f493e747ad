use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection parameters and the home pose restored by a reset.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Home yaw in radians.
    #[schemars(title = "Home Yaw", range(min = -3.15, max = 3.15), extend("step" = 0.01))]
    pub home_yaw: f32,
    /// Home pitch in radians.
    #[schemars(title = "Home Pitch", range(min = -1.47, max = 1.47), extend("step" = 0.01))]
    pub home_pitch: f32,
    /// Home distance from the target.
    #[schemars(title = "Home Distance", range(min = 0.5, max = 100.0), extend("step" = 0.5))]
    pub home_distance: f32,
    /// Home orbit target in world space.
    #[schemars(skip)]
    pub home_target: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.1,
            zfar: 100.0,
            home_yaw: std::f32::consts::FRAC_PI_3,
            home_pitch: std::f32::consts::PI / 7.0,
            home_distance: 16.0,
            home_target: [0.0; 3],
        }
    }
}
