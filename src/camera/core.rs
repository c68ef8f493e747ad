use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Orbit pose: the subset of [`CameraState`] that gestures change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    /// Horizontal orbit angle in radians.
    pub yaw: f32,
    /// Vertical orbit angle in radians.
    pub pitch: f32,
    /// Distance from the target.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl OrbitPose {
    /// Pose that shows two faces of the pyramid at the scene origin.
    pub const HOME: Self = Self {
        yaw: std::f32::consts::FRAC_PI_3,
        pitch: std::f32::consts::PI / 7.0,
        distance: 16.0,
        target: Vec3::ZERO,
    };

    /// Home pose described by the camera options.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            yaw: options.home_yaw,
            pitch: options.home_pitch,
            distance: options.home_distance,
            target: Vec3::from_array(options.home_target),
        }
    }
}

impl Default for OrbitPose {
    fn default() -> Self {
        Self::HOME
    }
}

/// Orthonormal camera frame derived from yaw and pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Screen-right direction in world space.
    pub right: Vec3,
    /// Screen-up direction in world space.
    pub up: Vec3,
    /// View direction (eye toward target).
    pub forward: Vec3,
}

/// Orbit camera parameters plus projection settings.
///
/// Position, view and projection are always derived on demand from the
/// orbit parameters, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Horizontal orbit angle in radians.
    pub yaw: f32,
    /// Vertical orbit angle in radians.
    pub pitch: f32,
    /// Distance from the target.
    pub distance: f32,
    /// Look-at target position.
    pub target: Vec3,
    /// World up direction used by the look-at matrix.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 16.0,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 60.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl CameraState {
    /// Default pose with projection parameters taken from the options.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        Self {
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            ..Self::default()
        }
    }

    /// Current orbit pose.
    #[must_use]
    pub fn pose(&self) -> OrbitPose {
        OrbitPose {
            yaw: self.yaw,
            pitch: self.pitch,
            distance: self.distance,
            target: self.target,
        }
    }

    /// Overwrite the orbit parameters, leaving projection untouched.
    pub fn set_pose(&mut self, pose: OrbitPose) {
        self.yaw = pose.yaw;
        self.pitch = pose.pitch;
        self.distance = pose.distance;
        self.target = pose.target;
    }

    /// Offset from target to eye (spherical to Cartesian).
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
            * self.distance
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.target + self.offset()
    }

    /// Right/up/forward frame. `right` stays horizontal; `up` is the
    /// camera's tilted up, not the world up.
    #[must_use]
    pub fn basis(&self) -> CameraBasis {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let forward =
            -Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
        let up = right.cross(forward);
        CameraBasis { right, up, forward }
    }

    /// Right-handed look-at view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, self.up)
    }

    /// Right-handed perspective projection for the given aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            aspect,
            self.znear,
            self.zfar,
        )
    }
}

/// Width over height, or 1.0 for a degenerate (zero-sized) viewport.
#[must_use]
pub fn viewport_aspect(width: f32, height: f32) -> f32 {
    if height <= 0.0 || width <= 0.0 || !width.is_finite() || !height.is_finite()
    {
        return 1.0;
    }
    width / height
}
