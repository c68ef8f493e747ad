//! Converts recognized gestures into camera commands.
//!
//! The `GestureTranslator` is the only thing between a gesture source and
//! a [`CommandSink`]. It holds no camera reference: the owner passes the
//! sink to [`dispatch`](GestureTranslator::dispatch) on each call, so the
//! controller is borrowed only for the duration of one event.

use glam::Vec2;

use super::event::{GestureEvent, GesturePhase};
use crate::engine::command::{CameraCommand, CommandSink};
use crate::options::InputOptions;

/// Maps gesture deltas to normalized [`CameraCommand`]s.
///
/// Stateless apart from the "two-finger pan active" flag, which keeps a
/// concurrently-recognized one-finger pan from also orbiting the camera.
///
/// # Usage
///
/// ```ignore
/// // In the gesture callback:
/// translator.dispatch(event, &mut controller);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GestureTranslator {
    /// Fling threshold and scale.
    options: InputOptions,
    /// Set while a two-finger pan is live.
    two_finger_active: bool,
}

impl GestureTranslator {
    /// Create a translator with the given fling tuning.
    #[must_use]
    pub fn new(options: InputOptions) -> Self {
        Self {
            options,
            two_finger_active: false,
        }
    }

    /// Replace the fling tuning.
    pub fn set_options(&mut self, options: InputOptions) {
        self.options = options;
    }

    /// Whether a two-finger pan is currently live.
    #[must_use]
    pub fn two_finger_active(&self) -> bool {
        self.two_finger_active
    }

    /// Process a gesture event and return zero or one commands.
    pub fn handle_event(&mut self, event: GestureEvent) -> Option<CameraCommand> {
        match event {
            GestureEvent::Pan {
                phase,
                delta,
                velocity,
            } => match phase {
                GesturePhase::Began => {
                    self.on_pan_begin();
                    None
                }
                GesturePhase::Changed => self.on_pan_changed(delta.x, delta.y),
                GesturePhase::Ended => self.on_pan_end(velocity.x, velocity.y),
                // An aborted drag leaves the camera where it is; only a real
                // release flings.
                GesturePhase::Cancelled => None,
            },
            GestureEvent::TwoFingerPan { phase, delta } => match phase {
                GesturePhase::Began => {
                    self.two_finger_active = true;
                    None
                }
                GesturePhase::Changed => {
                    self.on_two_finger_pan_changed(delta.x, delta.y)
                }
                GesturePhase::Ended | GesturePhase::Cancelled => {
                    self.on_two_finger_pan_end();
                    None
                }
            },
            GestureEvent::Pinch { phase, scale } => match phase {
                GesturePhase::Changed => self.on_pinch_changed(scale),
                _ => None,
            },
            GestureEvent::DoubleTap => self.on_double_tap(),
        }
    }

    /// Translate `event` and hand the resulting command (if any) to `sink`.
    /// Returns whether a command was emitted.
    pub fn dispatch(
        &mut self,
        event: GestureEvent,
        sink: &mut impl CommandSink,
    ) -> bool {
        match self.handle_event(event) {
            Some(command) => {
                sink.execute(command);
                true
            }
            None => false,
        }
    }

    /// A one-finger pan started. Deltas arrive relative, so there is no
    /// accumulator to clear here.
    pub fn on_pan_begin(&mut self) {
        log::debug!("pan began (two-finger active: {})", self.two_finger_active);
    }

    /// One-finger drag: orbit, with screen Y inverted so dragging up looks
    /// up. Suppressed while a two-finger pan is live.
    pub fn on_pan_changed(&mut self, dx: f32, dy: f32) -> Option<CameraCommand> {
        if self.two_finger_active || !finite_pair(dx, dy) {
            return None;
        }
        Some(CameraCommand::Orbit {
            delta_yaw: dx,
            delta_pitch: -dy,
        })
    }

    /// One-finger drag released. A fast release yields one small "fling"
    /// orbit scaled down from the release velocity.
    pub fn on_pan_end(&mut self, vx: f32, vy: f32) -> Option<CameraCommand> {
        if self.two_finger_active || !finite_pair(vx, vy) {
            return None;
        }
        let velocity = Vec2::new(vx, vy);
        if velocity.length() <= self.options.fling_threshold {
            return None;
        }
        let scale = self.options.fling_scale;
        log::debug!("fling at {:.1} px/s", velocity.length());
        Some(CameraCommand::Orbit {
            delta_yaw: vx * scale,
            delta_pitch: -vy * scale,
        })
    }

    /// Pinch update. Spreading (`scale > 1`) zooms out, so the command
    /// carries `1 - scale`.
    pub fn on_pinch_changed(&mut self, scale: f32) -> Option<CameraCommand> {
        if !scale.is_finite() || scale <= 0.0 {
            log::debug!("rejecting pinch scale {scale}");
            return None;
        }
        Some(CameraCommand::Zoom { delta: 1.0 - scale })
    }

    /// Two-finger drag: pan the target, with screen Y inverted.
    pub fn on_two_finger_pan_changed(
        &mut self,
        dx: f32,
        dy: f32,
    ) -> Option<CameraCommand> {
        self.two_finger_active = true;
        if !finite_pair(dx, dy) {
            return None;
        }
        Some(CameraCommand::Pan {
            delta_x: dx,
            delta_y: -dy,
        })
    }

    /// Two-finger drag ended or was cancelled.
    pub fn on_two_finger_pan_end(&mut self) {
        self.two_finger_active = false;
    }

    /// Double tap always resets.
    pub fn on_double_tap(&mut self) -> Option<CameraCommand> {
        Some(CameraCommand::Reset)
    }
}

fn finite_pair(a: f32, b: f32) -> bool {
    let ok = a.is_finite() && b.is_finite();
    if !ok {
        log::debug!("rejecting non-finite gesture delta ({a}, {b})");
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitController;

    fn pan(phase: GesturePhase, delta: Vec2, velocity: Vec2) -> GestureEvent {
        GestureEvent::Pan {
            phase,
            delta,
            velocity,
        }
    }

    #[test]
    fn pan_changed_orbits_with_inverted_y() {
        let mut translator = GestureTranslator::default();
        assert_eq!(
            translator.on_pan_changed(12.0, 5.0),
            Some(CameraCommand::Orbit {
                delta_yaw: 12.0,
                delta_pitch: -5.0,
            })
        );
    }

    #[test]
    fn two_finger_pan_suppresses_orbit_until_it_ends() {
        let mut translator = GestureTranslator::default();
        assert_eq!(
            translator.on_two_finger_pan_changed(4.0, 6.0),
            Some(CameraCommand::Pan {
                delta_x: 4.0,
                delta_y: -6.0,
            })
        );
        assert!(translator.two_finger_active());
        assert_eq!(translator.on_pan_changed(10.0, 10.0), None);
        assert_eq!(translator.on_pan_end(500.0, 0.0), None);

        translator.on_two_finger_pan_end();
        assert!(translator.on_pan_changed(10.0, 10.0).is_some());
    }

    #[test]
    fn cancelled_two_finger_pan_clears_flag() {
        let mut translator = GestureTranslator::default();
        let _ = translator.handle_event(GestureEvent::TwoFingerPan {
            phase: GesturePhase::Began,
            delta: Vec2::ZERO,
        });
        assert!(translator.two_finger_active());
        let _ = translator.handle_event(GestureEvent::TwoFingerPan {
            phase: GesturePhase::Cancelled,
            delta: Vec2::ZERO,
        });
        assert!(!translator.two_finger_active());
    }

    #[test]
    fn fling_requires_speed_above_threshold() {
        let mut translator = GestureTranslator::default();
        assert_eq!(translator.on_pan_end(30.0, 30.0), None);
        assert_eq!(translator.on_pan_end(50.0, 0.0), None);

        let Some(CameraCommand::Orbit {
            delta_yaw,
            delta_pitch,
        }) = translator.on_pan_end(1000.0, 400.0)
        else {
            panic!("expected a fling orbit");
        };
        assert!((delta_yaw - 0.1).abs() < 1e-6);
        assert!((delta_pitch + 0.04).abs() < 1e-6);
    }

    #[test]
    fn fling_tuning_comes_from_options() {
        let mut translator = GestureTranslator::new(InputOptions {
            fling_threshold: 1000.0,
            ..InputOptions::default()
        });
        assert_eq!(translator.on_pan_end(600.0, 0.0), None);
    }

    #[test]
    fn pinch_spread_zooms_out() {
        let mut translator = GestureTranslator::default();
        let Some(CameraCommand::Zoom { delta }) =
            translator.on_pinch_changed(1.25)
        else {
            panic!("expected zoom");
        };
        assert!((delta + 0.25).abs() < 1e-6);
        assert_eq!(
            translator.on_pinch_changed(0.5),
            Some(CameraCommand::Zoom { delta: 0.5 })
        );
    }

    #[test]
    fn degenerate_input_is_rejected() {
        let mut translator = GestureTranslator::default();
        assert_eq!(translator.on_pan_changed(f32::NAN, 0.0), None);
        assert_eq!(translator.on_pan_end(f32::INFINITY, 0.0), None);
        assert_eq!(translator.on_pinch_changed(f32::NAN), None);
        assert_eq!(translator.on_pinch_changed(0.0), None);
        assert_eq!(translator.on_pinch_changed(-2.0), None);
        assert_eq!(translator.on_two_finger_pan_changed(0.0, f32::NAN), None);
    }

    #[test]
    fn double_tap_resets() {
        let mut translator = GestureTranslator::default();
        assert_eq!(
            translator.handle_event(GestureEvent::DoubleTap),
            Some(CameraCommand::Reset)
        );
    }

    #[test]
    fn begin_and_terminal_phases_emit_nothing() {
        let mut translator = GestureTranslator::default();
        let fast = Vec2::new(900.0, 0.0);
        assert_eq!(
            translator.handle_event(pan(GesturePhase::Began, Vec2::ONE, fast)),
            None
        );
        assert_eq!(
            translator.handle_event(pan(GesturePhase::Cancelled, Vec2::ONE, fast)),
            None
        );
        for phase in [GesturePhase::Began, GesturePhase::Ended] {
            assert_eq!(
                translator.handle_event(GestureEvent::Pinch { phase, scale: 2.0 }),
                None
            );
        }
    }

    #[test]
    fn dispatch_drives_controller() {
        let mut translator = GestureTranslator::default();
        let mut controller = OrbitController::default();
        let moved = translator.dispatch(
            pan(GesturePhase::Changed, Vec2::new(100.0, 0.0), Vec2::ZERO),
            &mut controller,
        );
        assert!(moved);
        assert_eq!(controller.camera().yaw, 0.5);

        let emitted = translator.dispatch(
            pan(GesturePhase::Ended, Vec2::ZERO, Vec2::new(10.0, 0.0)),
            &mut controller,
        );
        assert!(!emitted);
    }

    #[test]
    fn drag_up_looks_up() {
        let mut translator = GestureTranslator::default();
        let mut sink = Vec::new();
        // Screen y decreases when dragging up.
        let _ = translator.dispatch(
            pan(GesturePhase::Changed, Vec2::new(0.0, -20.0), Vec2::ZERO),
            &mut sink,
        );
        assert_eq!(
            sink,
            vec![CameraCommand::Orbit {
                delta_yaw: 0.0,
                delta_pitch: 20.0,
            }]
        );
    }
}
