//! Centralized viewer options with TOML preset support.
//!
//! Camera projection, orbit limits and sensitivities, gesture tuning,
//! lighting, animation and keybindings are consolidated here. Options
//! serialize to/from TOML so a preset can override any subset of them.

mod animation;
mod camera;
mod input;
mod keybindings;
mod lighting;
mod orbit;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use input::InputOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use orbit::OrbitOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::GyreError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[orbit]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and home pose.
    pub camera: CameraOptions,
    /// Orbit controller limits and sensitivities.
    pub orbit: OrbitOptions,
    /// Gesture interpretation parameters.
    pub input: InputOptions,
    /// Ambient term and initial lights.
    pub lighting: LightingOptions,
    /// Orbiting sphere parameters.
    pub animation: AnimationOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, GyreError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| GyreError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, GyreError> {
        let content = std::fs::read_to_string(path).map_err(GyreError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), GyreError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GyreError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GyreError::Io)?;
        }
        std::fs::write(path, content).map_err(GyreError::Io)
    }

    /// Set one field by section and name from a JSON value, as sent by a
    /// schema-driven options panel. Returns `false` (leaving `self`
    /// untouched) if the section or field does not exist or the value has
    /// the wrong type.
    pub fn set_field(
        &mut self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> bool {
        let Ok(mut root) = serde_json::to_value(&*self) else {
            return false;
        };
        let Some(slot) = root
            .get_mut(section)
            .and_then(|section| section.get_mut(field))
        else {
            log::warn!("unknown option {section}.{field}");
            return false;
        };
        *slot = value;
        match serde_json::from_value::<Self>(root) {
            Ok(mut updated) => {
                updated.keybindings.rebuild_reverse_map();
                *self = updated;
                true
            }
            Err(e) => {
                log::warn!("rejected value for {section}.{field}: {e}");
                false
            }
        }
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lighting::Light;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[orbit]
enable_smoothing = true
zoom_sensitivity = 0.1
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert!(opts.orbit.enable_smoothing);
        assert_eq!(opts.orbit.zoom_sensitivity, 0.1);
        // Everything else should be default
        assert_eq!(opts.orbit.rotation_sensitivity, 0.005);
        assert_eq!(opts.camera.fovy, 60.0);
        assert_eq!(opts.input.fling_threshold, 50.0);
    }

    #[test]
    fn lights_parse_from_tagged_tables() {
        let toml_str = r#"
[[lighting.lights]]
kind = "point"
position = [1.0, 2.0, 3.0]
color = [1.0, 1.0, 1.0]
intensity = 2.0
radius = 5.0
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.lighting.lights.len(), 1);
        assert!(matches!(
            opts.lighting.lights[0],
            Light::Point { radius, .. } if radius == 5.0
        ));
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[orbit\nmin_pitch = ").unwrap_err();
        assert!(matches!(err, GyreError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("KeyR"),
            Some(KeyAction::ResetCamera)
        );
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(KeyAction::ToggleAnimation)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn custom_keybindings_rebuild_reverse_map() {
        use crate::input::KeyAction;
        let toml_str = r#"
[keybindings.bindings]
reset_camera = "Home"
"#;
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("Home"),
            Some(KeyAction::ResetCamera)
        );
        assert_eq!(opts.keybindings.lookup("KeyR"), None);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir()
            .join(format!("gyre-options-{}", std::process::id()));
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.orbit.enable_smoothing = true;
        opts.animation.orbit_speed = 1.25;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["preset".to_owned()]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn set_field_updates_one_value() {
        let mut opts = Options::default();
        assert!(opts.set_field("orbit", "enable_smoothing", serde_json::json!(true)));
        assert!(opts.orbit.enable_smoothing);
        assert_eq!(opts.camera, CameraOptions::default());
    }

    #[test]
    fn set_field_rejects_unknown_or_mistyped() {
        let mut opts = Options::default();
        assert!(!opts.set_field("orbit", "warp_speed", serde_json::json!(9)));
        assert!(!opts.set_field("nope", "fovy", serde_json::json!(9)));
        assert!(!opts.set_field("camera", "fovy", serde_json::json!("wide")));
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn set_field_keeps_keybindings_usable() {
        let mut opts = Options::default();
        assert!(opts.set_field("animation", "orbit_speed", serde_json::json!(1.0)));
        assert!(opts.keybindings.lookup("KeyR").is_some());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("orbit"));
        assert!(props.contains_key("input"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("animation"));
        assert!(!props.contains_key("keybindings"));

        let orbit = &props["orbit"]["properties"];
        assert!(orbit.get("zoom_sensitivity").is_some());
        assert!(orbit.get("min_pitch").is_none());
        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("ambient_strength").is_some());
        assert!(lighting.get("lights").is_none());
    }
}
