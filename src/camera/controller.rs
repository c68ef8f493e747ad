use glam::Vec3;

use crate::camera::core::{CameraState, OrbitPose};
use crate::engine::command::{CameraCommand, CommandSink};
use crate::options::OrbitOptions;

/// Velocities below this magnitude snap to zero.
pub const VELOCITY_EPSILON: f32 = 0.001;

/// Lower bound on the smoothed zoom divisor `1 + v·dt`. A zoom-out step
/// can at most double the distance, and the sign never flips.
const MIN_ZOOM_DIVISOR: f32 = 0.5;

/// How orbit and zoom input reaches the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Input is applied to the pose immediately.
    Direct,
    /// Input accumulates as velocity, integrated and damped by
    /// [`OrbitController::update`].
    Smoothed,
}

/// Pending angular and zoom velocity in smoothed mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityState {
    /// Yaw velocity in radians per second.
    pub yaw: f32,
    /// Pitch velocity in radians per second.
    pub pitch: f32,
    /// Zoom velocity (positive moves closer).
    pub distance: f32,
}

impl VelocityState {
    /// Whether every component is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0 && self.distance == 0.0
    }
}

/// Owns the [`CameraState`] and is the only thing that mutates it.
///
/// Every mutating path ends by clamping pitch and distance into the
/// configured limits, so callers can pass any finite delta. Non-finite
/// input is dropped before it reaches the pose.
#[derive(Debug, Clone)]
pub struct OrbitController {
    camera: CameraState,
    config: OrbitOptions,
    home: OrbitPose,
    velocity: VelocityState,
}

impl OrbitController {
    /// Create a controller around `camera`. The pose is clamped into the
    /// configured limits immediately.
    #[must_use]
    pub fn new(camera: CameraState, config: OrbitOptions, home: OrbitPose) -> Self {
        let mut controller = Self {
            camera,
            config,
            home,
            velocity: VelocityState::default(),
        };
        controller.clamp_pitch();
        controller.clamp_distance();
        controller
    }

    /// Read-only camera state.
    #[must_use]
    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Active limits and sensitivities.
    #[must_use]
    pub fn config(&self) -> &OrbitOptions {
        &self.config
    }

    /// Replace limits and sensitivities, re-clamping the pose.
    pub fn set_config(&mut self, config: OrbitOptions) {
        let smoothing = config.enable_smoothing;
        self.config = config;
        self.set_smoothing(smoothing);
        self.clamp_pitch();
        self.clamp_distance();
    }

    /// Pose restored by [`reset`](Self::reset).
    #[must_use]
    pub fn home(&self) -> OrbitPose {
        self.home
    }

    /// Current velocity (always zero in direct mode).
    #[must_use]
    pub fn velocity(&self) -> VelocityState {
        self.velocity
    }

    /// Current control mode.
    #[must_use]
    pub fn mode(&self) -> ControlMode {
        if self.config.enable_smoothing {
            ControlMode::Smoothed
        } else {
            ControlMode::Direct
        }
    }

    /// Enable or disable smoothing. Leaving smoothed mode drops any
    /// pending velocity.
    pub fn set_smoothing(&mut self, enabled: bool) {
        self.config.enable_smoothing = enabled;
        if !enabled {
            self.velocity = VelocityState::default();
        }
    }

    /// Update the projection parameters without touching the pose.
    pub fn set_projection(&mut self, fovy: f32, znear: f32, zfar: f32) {
        self.camera.fovy = fovy;
        self.camera.znear = znear;
        self.camera.zfar = zfar;
    }

    /// Rotate around the target.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if !(delta_yaw.is_finite() && delta_pitch.is_finite()) {
            log::debug!("ignoring non-finite orbit ({delta_yaw}, {delta_pitch})");
            return;
        }
        let yaw = delta_yaw * self.config.rotation_sensitivity;
        let pitch = delta_pitch * self.config.rotation_sensitivity;
        match self.mode() {
            ControlMode::Direct => {
                self.camera.yaw += yaw;
                self.camera.pitch += pitch;
                self.clamp_pitch();
            }
            ControlMode::Smoothed => {
                self.velocity.yaw += yaw;
                self.velocity.pitch += pitch;
            }
        }
    }

    /// Dolly along the view axis; positive `delta` moves closer.
    ///
    /// Direct mode scales the distance by `exp(-delta * sensitivity)`, so
    /// equal gestures give equal relative motion at any range.
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::debug!("ignoring non-finite zoom {delta}");
            return;
        }
        let amount = delta * self.config.zoom_sensitivity;
        match self.mode() {
            ControlMode::Direct => {
                self.camera.distance *= (-amount).exp();
                self.clamp_distance();
            }
            ControlMode::Smoothed => self.velocity.distance += amount,
        }
    }

    /// Translate the target in the camera's right/up plane. Always
    /// immediate; speed scales with the current distance.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        if !(delta_x.is_finite() && delta_y.is_finite()) {
            log::debug!("ignoring non-finite pan ({delta_x}, {delta_y})");
            return;
        }
        let basis = self.camera.basis();
        let scale = self.config.pan_sensitivity * self.camera.distance;
        self.camera.target +=
            basis.right * (delta_x * scale) + basis.up * (delta_y * scale);
    }

    /// Integrate and damp pending velocity. No-op in direct mode.
    pub fn update(&mut self, dt: f32) {
        if self.mode() == ControlMode::Direct {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let decay = 1.0 - self.config.smoothing_factor;

        if self.velocity.yaw.abs() > VELOCITY_EPSILON {
            self.camera.yaw += self.velocity.yaw * dt;
            self.velocity.yaw *= decay;
        } else {
            self.velocity.yaw = 0.0;
        }

        if self.velocity.pitch.abs() > VELOCITY_EPSILON {
            self.camera.pitch += self.velocity.pitch * dt;
            self.velocity.pitch *= decay;
            self.clamp_pitch();
        } else {
            self.velocity.pitch = 0.0;
        }

        if self.velocity.distance.abs() > VELOCITY_EPSILON {
            let divisor =
                (1.0 + self.velocity.distance * dt).max(MIN_ZOOM_DIVISOR);
            self.camera.distance /= divisor;
            self.clamp_distance();
            self.velocity.distance *= decay;
        } else {
            self.velocity.distance = 0.0;
        }
    }

    /// Return to the home pose and stop all motion.
    pub fn reset(&mut self) {
        self.camera.set_pose(self.home);
        self.velocity = VelocityState::default();
        self.clamp_pitch();
        self.clamp_distance();
    }

    /// Point the camera at `target`, keeping angles and distance.
    pub fn look_at(&mut self, target: Vec3) {
        if !target.is_finite() {
            log::debug!("ignoring non-finite look-at target {target}");
            return;
        }
        self.camera.target = target;
    }

    /// Set the orbit distance, clamped into the limits.
    pub fn set_distance(&mut self, distance: f32) {
        if !distance.is_finite() {
            log::debug!("ignoring non-finite distance {distance}");
            return;
        }
        self.camera.distance = distance;
        self.clamp_distance();
    }

    fn clamp_pitch(&mut self) {
        self.camera.pitch = clamp_range(
            self.camera.pitch,
            self.config.min_pitch,
            self.config.max_pitch,
        );
    }

    fn clamp_distance(&mut self) {
        self.camera.distance = clamp_range(
            self.camera.distance,
            self.config.min_distance,
            self.config.max_distance,
        );
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(
            CameraState::default(),
            OrbitOptions::default(),
            OrbitPose::HOME,
        )
    }
}

impl CommandSink for OrbitController {
    fn execute(&mut self, command: CameraCommand) {
        if !command.is_finite() {
            log::debug!("dropping non-finite {command:?}");
            return;
        }
        match command {
            CameraCommand::Orbit {
                delta_yaw,
                delta_pitch,
            } => self.orbit(delta_yaw, delta_pitch),
            CameraCommand::Zoom { delta } => self.zoom(delta),
            CameraCommand::Pan { delta_x, delta_y } => self.pan(delta_x, delta_y),
            CameraCommand::Reset => self.reset(),
        }
    }
}

/// Like `f32::clamp` but never panics on inverted limits (`max` wins).
fn clamp_range(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoothed() -> OrbitController {
        let config = OrbitOptions {
            enable_smoothing: true,
            ..OrbitOptions::default()
        };
        OrbitController::new(CameraState::default(), config, OrbitPose::HOME)
    }

    #[test]
    fn orbit_applies_rotation_sensitivity() {
        let mut controller = OrbitController::default();
        controller.orbit(100.0, 0.0);
        assert_eq!(controller.camera().yaw, 0.5);
        let position = controller.camera().position();
        let expected = Vec3::new(
            16.0 * 0.0f32.cos() * 0.5f32.sin(),
            16.0 * 0.0f32.sin(),
            16.0 * 0.0f32.cos() * 0.5f32.cos(),
        );
        assert!(position.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn pitch_stays_clamped_for_any_orbit_sequence() {
        let mut controller = OrbitController::default();
        let (min, max) = (controller.config().min_pitch, controller.config().max_pitch);
        assert!((max - 1.4708).abs() < 1e-3);
        for i in 0..200 {
            let delta = if i % 3 == 0 { -750.0 } else { 420.0 };
            controller.orbit(13.0, delta);
            let pitch = controller.camera().pitch;
            assert!((min..=max).contains(&pitch), "pitch {pitch} escaped");
        }
        controller.orbit(0.0, 1.0e6);
        assert_eq!(controller.camera().pitch, max);
        controller.orbit(0.0, -1.0e6);
        assert_eq!(controller.camera().pitch, min);
    }

    #[test]
    fn distance_stays_clamped_for_any_zoom_sequence() {
        let mut controller = OrbitController::default();
        for delta in [5.0, 50.0, 500.0, -3.0, -400.0, 1.0e4, -1.0e4] {
            controller.zoom(delta);
            let distance = controller.camera().distance;
            assert!((0.5..=100.0).contains(&distance), "distance {distance}");
        }
    }

    #[test]
    fn zoom_direction_convention() {
        let mut controller = OrbitController::default();
        controller.zoom(0.1);
        assert!(controller.camera().distance < 16.0);

        let mut controller = OrbitController::default();
        controller.zoom(-0.1);
        assert!(controller.camera().distance > 16.0);
    }

    #[test]
    fn zoom_is_multiplicative() {
        let mut near = OrbitController::default();
        near.set_distance(4.0);
        near.zoom(1.0);
        let mut far = OrbitController::default();
        far.set_distance(40.0);
        far.zoom(1.0);
        let near_ratio = near.camera().distance / 4.0;
        let far_ratio = far.camera().distance / 40.0;
        assert!((near_ratio - far_ratio).abs() < 1e-6);
    }

    #[test]
    fn pan_scales_with_distance() {
        let mut near = OrbitController::default();
        near.set_distance(10.0);
        near.pan(30.0, -12.0);
        let mut far = OrbitController::default();
        far.set_distance(20.0);
        far.pan(30.0, -12.0);
        let near_move = near.camera().target;
        let far_move = far.camera().target;
        assert!(far_move.abs_diff_eq(near_move * 2.0, 1e-6));
        assert!(near_move.length() > 0.0);
    }

    #[test]
    fn pan_moves_along_camera_right() {
        let mut controller = OrbitController::default();
        controller.pan(100.0, 0.0);
        // 100 px * 0.002 * 16
        assert!(controller
            .camera()
            .target
            .abs_diff_eq(Vec3::new(3.2, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn pan_is_immediate_in_smoothed_mode() {
        let mut controller = smoothed();
        controller.pan(0.0, 50.0);
        assert!(controller.camera().target.y > 0.0);
        assert!(controller.velocity().is_zero());
    }

    #[test]
    fn reset_is_idempotent_and_stops_motion() {
        let mut controller = smoothed();
        controller.orbit(300.0, 80.0);
        controller.zoom(2.0);
        controller.pan(5.0, 5.0);
        controller.update(1.0 / 60.0);

        controller.reset();
        let first = *controller.camera();
        assert!(controller.velocity().is_zero());
        controller.reset();
        assert_eq!(*controller.camera(), first);
        assert!(controller.velocity().is_zero());
        assert_eq!(first.pose(), OrbitPose::HOME);
    }

    #[test]
    fn smoothed_orbit_defers_to_update() {
        let mut controller = smoothed();
        controller.orbit(100.0, 0.0);
        assert_eq!(controller.camera().yaw, 0.0);
        assert_eq!(controller.velocity().yaw, 0.5);
        controller.update(0.1);
        assert!((controller.camera().yaw - 0.05).abs() < 1e-6);
    }

    #[test]
    fn smoothing_decay_terminates() {
        let mut controller = smoothed();
        controller.orbit(100.0, 0.0);
        let mut previous = controller.velocity().yaw.abs();
        let mut steps = 0;
        while controller.velocity().yaw != 0.0 {
            controller.update(1.0 / 60.0);
            let current = controller.velocity().yaw.abs();
            assert!(current < previous);
            previous = current;
            steps += 1;
            assert!(steps <= 100, "velocity never settled");
        }
        // 0.5 * 0.9^n drops below 0.001 after 59 decays, then snaps.
        assert_eq!(steps, 60);
        assert!(controller.velocity().is_zero());
    }

    #[test]
    fn smoothed_zoom_moves_closer_and_stays_clamped() {
        let mut controller = smoothed();
        controller.zoom(2.0);
        for _ in 0..200 {
            controller.update(1.0 / 60.0);
            let distance = controller.camera().distance;
            assert!((0.5..=100.0).contains(&distance));
        }
        assert!(controller.camera().distance < 16.0);
        assert_eq!(controller.velocity().distance, 0.0);
    }

    #[test]
    fn smoothed_pitch_is_clamped_every_step() {
        let mut controller = smoothed();
        let (min, max) = (
            controller.config().min_pitch,
            controller.config().max_pitch,
        );
        controller.orbit(0.0, 1.0e6);
        for _ in 0..300 {
            controller.update(0.5);
            let pitch = controller.camera().pitch;
            assert!((min..=max).contains(&pitch), "pitch {pitch} escaped");
        }
        assert_eq!(controller.camera().pitch, max);
    }

    #[test]
    fn smoothed_zoom_out_survives_long_frames() {
        let mut controller = smoothed();
        let start = controller.camera().distance;
        controller.zoom(-10.0);
        controller.update(3.0);
        let distance = controller.camera().distance;
        assert!(distance > start, "zoom-out moved closer: {distance}");
        assert!((start..=100.0).contains(&distance));
        for _ in 0..100 {
            controller.update(3.0);
            assert!(controller.camera().distance >= start);
        }
    }

    #[test]
    fn update_is_noop_in_direct_mode() {
        let mut controller = OrbitController::default();
        let before = *controller.camera();
        controller.update(1.0);
        assert_eq!(*controller.camera(), before);
    }

    #[test]
    fn disabling_smoothing_drops_velocity() {
        let mut controller = smoothed();
        controller.orbit(50.0, 50.0);
        controller.set_smoothing(false);
        assert!(controller.velocity().is_zero());
        assert_eq!(controller.mode(), ControlMode::Direct);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut controller = OrbitController::default();
        let before = *controller.camera();
        controller.orbit(f32::NAN, 1.0);
        controller.zoom(f32::INFINITY);
        controller.pan(1.0, f32::NAN);
        controller.set_distance(f32::NAN);
        controller.look_at(Vec3::splat(f32::NAN));
        assert_eq!(*controller.camera(), before);
    }

    #[test]
    fn set_distance_and_look_at() {
        let mut controller = OrbitController::default();
        controller.set_distance(1000.0);
        assert_eq!(controller.camera().distance, 100.0);
        controller.set_distance(0.0);
        assert_eq!(controller.camera().distance, 0.5);
        controller.look_at(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(controller.camera().target, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn execute_dispatches_commands() {
        let mut controller = OrbitController::default();
        controller.execute(CameraCommand::Orbit {
            delta_yaw: 100.0,
            delta_pitch: 0.0,
        });
        controller.execute(CameraCommand::Zoom { delta: 1.0 });
        assert_eq!(controller.camera().yaw, 0.5);
        assert!(controller.camera().distance < 16.0);
        controller.execute(CameraCommand::Reset);
        assert_eq!(controller.camera().pose(), OrbitPose::HOME);
    }

    #[test]
    fn execute_drops_non_finite_commands() {
        let mut controller = smoothed();
        controller.execute(CameraCommand::Orbit {
            delta_yaw: f32::NAN,
            delta_pitch: 1.0,
        });
        controller.execute(CameraCommand::Pan {
            delta_x: f32::INFINITY,
            delta_y: 0.0,
        });
        assert!(controller.velocity().is_zero());
        assert_eq!(controller.camera().target, Vec3::ZERO);
    }
}
