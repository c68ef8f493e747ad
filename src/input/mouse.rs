//! Desktop pointer adapter: folds mouse drags, wheel scrolls and double
//! clicks into the touch gesture vocabulary.

use glam::Vec2;
use web_time::{Duration, Instant};

use super::event::{GestureEvent, GesturePhase, InputEvent, MouseButton};
use crate::options::InputOptions;

/// Total cursor travel (px) below which a press/release counts as a click.
const CLICK_SLOP: f32 = 3.0;
/// A release this long after the last movement carries no fling velocity.
const RELEASE_STILL: Duration = Duration::from_millis(100);
/// Smallest pinch scale a single scroll step can produce.
const MIN_SCROLL_SCALE: f32 = 0.05;

/// Which gesture a mouse drag stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragKind {
    OneFinger,
    TwoFinger,
}

/// An active drag started by a button press.
#[derive(Debug, Clone, Copy)]
struct Drag {
    kind: DragKind,
    button: MouseButton,
    travel: f32,
    velocity: Vec2,
    last_move: Instant,
}

/// Converts raw [`InputEvent`]s into [`GestureEvent`]s.
///
/// Left drag is a one-finger pan; right drag, middle drag and shift+left
/// drag are two-finger pans; the wheel is a pinch; two quick clicks
/// without movement are a double tap. All deltas it emits are relative to
/// the previous event, as the translator requires.
#[derive(Debug, Clone)]
pub struct PointerGestures {
    options: InputOptions,
    cursor: Option<Vec2>,
    shift_pressed: bool,
    drag: Option<Drag>,
    last_click: Option<Instant>,
}

impl PointerGestures {
    /// Create an adapter with the given scroll and double-click tuning.
    #[must_use]
    pub fn new(options: InputOptions) -> Self {
        Self {
            options,
            cursor: None,
            shift_pressed: false,
            drag: None,
            last_click: None,
        }
    }

    /// Replace the tuning parameters.
    pub fn set_options(&mut self, options: InputOptions) {
        self.options = options;
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Process a raw event observed at `now`. Returns the gestures it
    /// completes, in order (at most two).
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> Vec<GestureEvent> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y), now)
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.handle_press(button, now)
                } else {
                    self.handle_release(button, now)
                }
            }
            InputEvent::Scroll { delta } => self.handle_scroll(delta),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                Vec::new()
            }
        }
    }

    fn handle_cursor_moved(
        &mut self,
        position: Vec2,
        now: Instant,
    ) -> Vec<GestureEvent> {
        if !position.is_finite() {
            return Vec::new();
        }
        let previous = self.cursor.replace(position);
        let (Some(previous), Some(drag)) = (previous, self.drag.as_mut()) else {
            return Vec::new();
        };

        let delta = position - previous;
        if delta == Vec2::ZERO {
            return Vec::new();
        }
        let dt = now.duration_since(drag.last_move).as_secs_f32();
        if dt > 0.0 {
            drag.velocity = delta / dt;
        }
        drag.last_move = now;
        drag.travel += delta.length();

        let event = match drag.kind {
            DragKind::OneFinger => GestureEvent::Pan {
                phase: GesturePhase::Changed,
                delta,
                velocity: drag.velocity,
            },
            DragKind::TwoFinger => GestureEvent::TwoFingerPan {
                phase: GesturePhase::Changed,
                delta,
            },
        };
        vec![event]
    }

    fn handle_press(
        &mut self,
        button: MouseButton,
        now: Instant,
    ) -> Vec<GestureEvent> {
        if self.drag.is_some() {
            return Vec::new();
        }
        let kind = match button {
            MouseButton::Left if !self.shift_pressed => DragKind::OneFinger,
            _ => DragKind::TwoFinger,
        };
        self.drag = Some(Drag {
            kind,
            button,
            travel: 0.0,
            velocity: Vec2::ZERO,
            last_move: now,
        });
        vec![begin_event(kind)]
    }

    fn handle_release(
        &mut self,
        button: MouseButton,
        now: Instant,
    ) -> Vec<GestureEvent> {
        let Some(drag) = self.drag.filter(|d| d.button == button) else {
            return Vec::new();
        };
        self.drag = None;

        let mut events = Vec::with_capacity(2);
        match drag.kind {
            DragKind::OneFinger => {
                let still = now.duration_since(drag.last_move) > RELEASE_STILL;
                let velocity = if still { Vec2::ZERO } else { drag.velocity };
                events.push(GestureEvent::Pan {
                    phase: GesturePhase::Ended,
                    delta: Vec2::ZERO,
                    velocity,
                });
            }
            DragKind::TwoFinger => events.push(GestureEvent::TwoFingerPan {
                phase: GesturePhase::Ended,
                delta: Vec2::ZERO,
            }),
        }

        if button == MouseButton::Left && drag.travel < CLICK_SLOP {
            if self.register_click(now) {
                events.push(GestureEvent::DoubleTap);
            }
        } else {
            self.last_click = None;
        }
        events
    }

    /// Record a click; returns whether it completes a double click.
    fn register_click(&mut self, now: Instant) -> bool {
        let window = Duration::from_millis(self.options.double_click_ms);
        match self.last_click.take() {
            Some(previous) if now.duration_since(previous) <= window => true,
            _ => {
                self.last_click = Some(now);
                false
            }
        }
    }

    fn handle_scroll(&mut self, delta: f32) -> Vec<GestureEvent> {
        if !delta.is_finite() || delta == 0.0 {
            return Vec::new();
        }
        let scale =
            (1.0 - delta * self.options.scroll_zoom_step).max(MIN_SCROLL_SCALE);
        vec![GestureEvent::Pinch {
            phase: GesturePhase::Changed,
            scale,
        }]
    }
}

impl Default for PointerGestures {
    fn default() -> Self {
        Self::new(InputOptions::default())
    }
}

fn begin_event(kind: DragKind) -> GestureEvent {
    match kind {
        DragKind::OneFinger => GestureEvent::Pan {
            phase: GesturePhase::Began,
            delta: Vec2::ZERO,
            velocity: Vec2::ZERO,
        },
        DragKind::TwoFinger => GestureEvent::TwoFingerPan {
            phase: GesturePhase::Began,
            delta: Vec2::ZERO,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn left_drag_emits_relative_pan() {
        let mut pointer = PointerGestures::default();
        let t0 = Instant::now();
        let _ = pointer.handle_event(moved(100.0, 100.0), t0);
        let began = pointer.handle_event(button(MouseButton::Left, true), t0);
        assert!(matches!(
            began[..],
            [GestureEvent::Pan { phase: GesturePhase::Began, .. }]
        ));

        let first = pointer
            .handle_event(moved(110.0, 95.0), t0 + Duration::from_millis(10));
        let second = pointer
            .handle_event(moved(115.0, 95.0), t0 + Duration::from_millis(20));
        assert!(matches!(
            first[..],
            [GestureEvent::Pan { phase: GesturePhase::Changed, delta, .. }]
                if delta == Vec2::new(10.0, -5.0)
        ));
        assert!(matches!(
            second[..],
            [GestureEvent::Pan { delta, .. }] if delta == Vec2::new(5.0, 0.0)
        ));
    }

    #[test]
    fn quick_release_carries_velocity() {
        let mut pointer = PointerGestures::default();
        let t0 = Instant::now();
        let _ = pointer.handle_event(moved(0.0, 0.0), t0);
        let _ = pointer.handle_event(button(MouseButton::Left, true), t0);
        let _ = pointer
            .handle_event(moved(20.0, 0.0), t0 + Duration::from_millis(10));
        let released = pointer.handle_event(
            button(MouseButton::Left, false),
            t0 + Duration::from_millis(15),
        );
        let [GestureEvent::Pan {
            phase: GesturePhase::Ended,
            velocity,
            ..
        }] = released[..]
        else {
            panic!("expected pan end, got {released:?}");
        };
        assert!((velocity.x - 2000.0).abs() < 1.0);
    }

    #[test]
    fn still_release_has_no_velocity() {
        let mut pointer = PointerGestures::default();
        let t0 = Instant::now();
        let _ = pointer.handle_event(moved(0.0, 0.0), t0);
        let _ = pointer.handle_event(button(MouseButton::Left, true), t0);
        let _ = pointer
            .handle_event(moved(20.0, 0.0), t0 + Duration::from_millis(10));
        let released = pointer.handle_event(
            button(MouseButton::Left, false),
            t0 + Duration::from_millis(500),
        );
        assert!(matches!(
            released[..],
            [GestureEvent::Pan { velocity, .. }] if velocity == Vec2::ZERO
        ));
    }

    #[test]
    fn right_and_shift_drag_are_two_finger_pans() {
        let mut pointer = PointerGestures::default();
        let t0 = Instant::now();
        let began = pointer.handle_event(button(MouseButton::Right, true), t0);
        assert!(matches!(
            began[..],
            [GestureEvent::TwoFingerPan { phase: GesturePhase::Began, .. }]
        ));
        let ended = pointer.handle_event(button(MouseButton::Right, false), t0);
        assert!(matches!(
            ended[..],
            [GestureEvent::TwoFingerPan { phase: GesturePhase::Ended, .. }]
        ));

        let _ = pointer
            .handle_event(InputEvent::ModifiersChanged { shift: true }, t0);
        let began = pointer.handle_event(button(MouseButton::Left, true), t0);
        assert!(matches!(began[..], [GestureEvent::TwoFingerPan { .. }]));
    }

    #[test]
    fn two_clicks_make_a_double_tap() {
        let mut pointer = PointerGestures::default();
        let t0 = Instant::now();
        let _ = pointer.handle_event(button(MouseButton::Left, true), t0);
        let first = pointer.handle_event(button(MouseButton::Left, false), t0);
        assert!(!first.contains(&GestureEvent::DoubleTap));

        let t1 = t0 + Duration::from_millis(150);
        let _ = pointer.handle_event(button(MouseButton::Left, true), t1);
        let second = pointer.handle_event(button(MouseButton::Left, false), t1);
        assert_eq!(second.last(), Some(&GestureEvent::DoubleTap));
    }

    #[test]
    fn slow_clicks_do_not_double_tap() {
        let mut pointer = PointerGestures::default();
        let t0 = Instant::now();
        let _ = pointer.handle_event(button(MouseButton::Left, true), t0);
        let _ = pointer.handle_event(button(MouseButton::Left, false), t0);
        let t1 = t0 + Duration::from_millis(900);
        let _ = pointer.handle_event(button(MouseButton::Left, true), t1);
        let second = pointer.handle_event(button(MouseButton::Left, false), t1);
        assert!(!second.contains(&GestureEvent::DoubleTap));
    }

    #[test]
    fn scroll_up_pinches_in() {
        let mut pointer = PointerGestures::default();
        let events =
            pointer.handle_event(InputEvent::Scroll { delta: 1.0 }, Instant::now());
        let [GestureEvent::Pinch { scale, .. }] = events[..] else {
            panic!("expected pinch");
        };
        assert!((scale - 0.9).abs() < 1e-6);

        let events = pointer
            .handle_event(InputEvent::Scroll { delta: 100.0 }, Instant::now());
        assert!(matches!(
            events[..],
            [GestureEvent::Pinch { scale, .. }] if scale == MIN_SCROLL_SCALE
        ));
    }
}
