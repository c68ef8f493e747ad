//! The animated sphere on its elliptical orbit.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use crate::options::AnimationOptions;

/// Wrap an angle into `[0, TAU)`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// A body travelling an axis-aligned ellipse in a horizontal plane while
/// spinning about its own vertical axis.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    semi_major_axis: f32,
    semi_minor_axis: f32,
    height: f32,
    orbit_speed: f32,
    spin_speed: f32,
    orbit_angle: f32,
    spin_angle: f32,
    running: bool,
}

impl Default for OrbitingBody {
    fn default() -> Self {
        Self::new(&AnimationOptions::default())
    }
}

impl OrbitingBody {
    /// Start at angle zero, running if the options enable it.
    #[must_use]
    pub fn new(options: &AnimationOptions) -> Self {
        let mut body = Self {
            semi_major_axis: 0.0,
            semi_minor_axis: 0.0,
            height: 0.0,
            orbit_speed: 0.0,
            spin_speed: 0.0,
            orbit_angle: 0.0,
            spin_angle: 0.0,
            running: options.enabled,
        };
        body.apply_options(options);
        body
    }

    /// Adopt new orbit parameters, keeping the current angles.
    pub fn apply_options(&mut self, options: &AnimationOptions) {
        self.semi_major_axis = options.semi_major_axis;
        self.semi_minor_axis = options.semi_minor_axis;
        self.height = options.height;
        self.orbit_speed = options.orbit_speed;
        self.spin_speed = options.spin_speed;
    }

    /// Advance both angles by `dt` seconds. Does nothing while paused or
    /// for a non-finite or negative `dt`.
    pub fn advance(&mut self, dt: f32) {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.orbit_angle = wrap_angle(self.orbit_angle + self.orbit_speed * dt);
        self.spin_angle = wrap_angle(self.spin_angle + self.spin_speed * dt);
    }

    /// Whether [`advance`](Self::advance) moves the body.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Flip between paused and running; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Current orbital angle in radians.
    #[must_use]
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }

    /// Current self-rotation angle in radians.
    #[must_use]
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    /// Center of the body in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.semi_major_axis * self.orbit_angle.cos(),
            self.height,
            self.semi_minor_axis * self.orbit_angle.sin(),
        )
    }

    /// Object-to-world transform: spin about Y, then translate onto the
    /// orbit.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::ONE,
            Quat::from_rotation_y(self.spin_angle),
            self.position(),
        )
    }
}
