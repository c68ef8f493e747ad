use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Gesture interpretation parameters.
pub struct InputOptions {
    /// Release speed (px/s) above which a pan end emits a fling orbit.
    #[schemars(title = "Fling Threshold", range(min = 0.0, max = 1000.0), extend("step" = 10.0))]
    pub fling_threshold: f32,
    /// Multiplier applied to the release velocity of a fling.
    #[schemars(skip)]
    pub fling_scale: f32,
    /// Pinch scale change per scroll-wheel line.
    #[schemars(title = "Scroll Zoom Step", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub scroll_zoom_step: f32,
    /// Maximum gap between clicks of a double click, in milliseconds.
    #[schemars(skip)]
    pub double_click_ms: u64,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            fling_threshold: 50.0,
            fling_scale: 0.0001,
            scroll_zoom_step: 0.1,
            double_click_ms: 400,
        }
    }
}
