//! Platform-agnostic input events.
//!
//! Touch platforms deliver [`GestureEvent`]s directly. Desktop platforms
//! deliver raw [`InputEvent`]s, which
//! [`PointerGestures`](super::PointerGestures) folds into the same gesture
//! vocabulary.

use glam::Vec2;

/// Lifecycle stage of a continuous gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// Gesture recognized; no movement delivered yet.
    Began,
    /// Gesture moved since the previous event.
    Changed,
    /// Gesture finished normally.
    Ended,
    /// Gesture aborted by the platform.
    Cancelled,
}

/// A recognized gesture.
///
/// Deltas and scales are relative to the previous event of the same
/// gesture; the source must reset its own accumulator after each event.
///
/// # Example
///
/// ```ignore
/// let cmd = translator.handle_event(GestureEvent::Pinch {
///     phase: GesturePhase::Changed,
///     scale: 0.9,
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// One-finger drag.
    Pan {
        /// Gesture stage.
        phase: GesturePhase,
        /// Movement in pixels since the previous event (y grows downward).
        delta: Vec2,
        /// Release velocity in pixels per second (meaningful on end).
        velocity: Vec2,
    },
    /// Two-finger drag.
    TwoFingerPan {
        /// Gesture stage.
        phase: GesturePhase,
        /// Movement in pixels since the previous event (y grows downward).
        delta: Vec2,
    },
    /// Pinch; `scale > 1` means the fingers spread apart.
    Pinch {
        /// Gesture stage.
        phase: GesturePhase,
        /// Scale factor since the previous event.
        scale: f32,
    },
    /// Two quick taps.
    DoubleTap,
}

/// Raw pointer events from a desktop window.
///
/// These are fed into a [`PointerGestures`](super::PointerGestures) adapter
/// which converts them into [`GestureEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in lines (positive = zoom in, negative = zoom out).
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::TouchPhase> for GesturePhase {
    fn from(phase: winit::event::TouchPhase) -> Self {
        match phase {
            winit::event::TouchPhase::Started => Self::Began,
            winit::event::TouchPhase::Moved => Self::Changed,
            winit::event::TouchPhase::Ended => Self::Ended,
            winit::event::TouchPhase::Cancelled => Self::Cancelled,
        }
    }
}

#[cfg(all(test, feature = "viewer"))]
mod tests {
    use winit::event::TouchPhase;

    use super::*;

    #[test]
    fn touch_phases_map_onto_gesture_phases() {
        assert_eq!(GesturePhase::from(TouchPhase::Started), GesturePhase::Began);
        assert_eq!(GesturePhase::from(TouchPhase::Moved), GesturePhase::Changed);
        assert_eq!(GesturePhase::from(TouchPhase::Ended), GesturePhase::Ended);
        assert_eq!(
            GesturePhase::from(TouchPhase::Cancelled),
            GesturePhase::Cancelled
        );
    }
}
