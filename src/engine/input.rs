//! Input methods for GyreEngine

use web_time::Instant;

use super::GyreEngine;
use crate::engine::command::CameraCommand;
use crate::input::{GestureEvent, InputEvent};

impl GyreEngine {
    /// Process a raw pointer event from the window.
    ///
    /// Mouse drags, scrolls and double clicks are folded into the touch
    /// gesture vocabulary before they reach the camera. Returns `true` if
    /// the camera received a command.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.scene.handle_input(event, Instant::now())
    }

    /// Process a gesture from a platform recognizer (touch screens).
    pub fn handle_gesture(&mut self, event: GestureEvent) -> Option<CameraCommand> {
        self.scene.handle_gesture(event)
    }

    /// Process a key press given as a key-code string (e.g. `"KeyR"`).
    /// Returns `true` if the key is bound to an action.
    pub fn handle_key(&mut self, key: &str) -> bool {
        let Some(action) = self.options.keybindings.lookup(key) else {
            return false;
        };
        log::debug!("key {key} -> {action:?}");
        self.scene.apply_key_action(action);
        true
    }
}
