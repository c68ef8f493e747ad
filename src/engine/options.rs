//! Options methods for GyreEngine

use std::path::Path;

use super::GyreEngine;
use crate::options::Options;

impl GyreEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Name of the last preset loaded or saved, if any.
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Replace options and push them into the scene. Geometry, camera pose
    /// and animation phase are kept.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.scene.apply_options(&self.options);
    }

    /// Set a single option by section and field name, e.g. from an options
    /// panel. Returns `true` if the value was accepted.
    pub fn apply_option(
        &mut self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> bool {
        if !self.options.set_field(section, field, value) {
            return false;
        }
        self.scene.apply_options(&self.options);
        true
    }

    /// Load a named preset from the presets directory.
    /// Returns true on success.
    pub fn load_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match Options::load(&path) {
            Ok(opts) => {
                log::info!("Loaded preset '{name}'");
                self.set_options(opts);
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to load preset '{name}': {e}");
                false
            }
        }
    }

    /// Save the current options as a named preset.
    /// Returns true on success.
    pub fn save_preset(&mut self, name: &str, presets_dir: &Path) -> bool {
        let path = presets_dir.join(format!("{name}.toml"));
        match self.options.save(&path) {
            Ok(()) => {
                log::info!("Saved preset '{name}'");
                self.active_preset = Some(name.to_owned());
                true
            }
            Err(e) => {
                log::error!("Failed to save preset '{name}': {e}");
                false
            }
        }
    }
}
