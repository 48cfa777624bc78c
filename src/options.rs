//! Serializable run options.
//!
//! [`RunOptions`] captures everything the prompts collect, in a JSON-friendly
//! format, so a run can be logged or replayed programmatically.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "platforms": ["macos", "android"],
//!   "background": "#171717",
//!   "gradient": false,
//!   "shape": "squircle"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::geometry::MaskShape;
use crate::icon::BackgroundFill;
use crate::platform::Platform;

/// Options chosen for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Platforms to generate icons for.
    pub platforms: Vec<Platform>,

    /// Base background color.
    pub background: HexColor,

    /// Paint a gradient derived from `background` instead of a flat fill.
    #[serde(default)]
    pub gradient: bool,

    /// Tile shape for masked platforms. `None` keeps the tile square.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<MaskShape>,
}

impl RunOptions {
    /// Creates options with a solid background and no shape.
    pub fn new(platforms: impl IntoIterator<Item = Platform>, background: HexColor) -> Self {
        Self {
            platforms: platforms.into_iter().collect(),
            background,
            gradient: false,
            shape: None,
        }
    }

    pub fn with_gradient(mut self, gradient: bool) -> Self {
        self.gradient = gradient;
        self
    }

    pub fn with_shape(mut self, shape: Option<MaskShape>) -> Self {
        self.shape = shape;
        self
    }

    /// The background as a tagged fill.
    pub fn fill(&self) -> BackgroundFill {
        BackgroundFill::new(self.background, self.gradient)
    }

    /// Selected platforms, deduplicated, in processing order.
    pub fn ordered_platforms(&self) -> Vec<Platform> {
        let mut platforms = self.platforms.clone();
        platforms.sort();
        platforms.dedup();
        platforms
    }

    pub fn includes(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    /// Serializes the options to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the options to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
