//! Input handling: gesture and pointer event types, the desktop pointer
//! adapter, and the translator that converts gestures into camera
//! commands.

/// Platform-agnostic input events.
pub mod event;
/// Key-bindable viewer actions.
pub mod keyboard;
/// Mouse-to-gesture adapter for desktop windows.
pub mod mouse;
/// Converts gestures into camera commands.
pub mod processor;

pub use event::{GestureEvent, GesturePhase, InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use mouse::PointerGestures;
pub use processor::GestureTranslator;
