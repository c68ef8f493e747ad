use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// reset_camera = "KeyR"
/// toggle_animation = "Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Return the camera to its home pose.
    ResetCamera,
    /// Switch the orbit controller between direct and smoothed mode.
    ToggleSmoothing,
    /// Pause or resume the orbiting sphere.
    ToggleAnimation,
}
