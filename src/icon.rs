//! Icon description types.
//!
//! An [`IconSpec`] describes one rendered output: where the source lives,
//! where the result goes, and how the canvas around the icon is built.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::Result;
use crate::geometry::{Layout, MaskShape, TARGET_SIZE, validate_padding};

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the parent
    pub x: u32,
    /// Y offset from the top edge of the parent
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Background painted behind the icon.
///
/// The two modes are mutually exclusive; a transparent background is
/// expressed as `Option::<BackgroundFill>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "color", rename_all = "kebab-case")]
pub enum BackgroundFill {
    /// Flat fill with a single color.
    Solid(HexColor),
    /// Dual radial gradient derived from a base color.
    Gradient(HexColor),
}

impl BackgroundFill {
    pub fn new(color: HexColor, gradient: bool) -> Self {
        if gradient {
            Self::Gradient(color)
        } else {
            Self::Solid(color)
        }
    }

    /// The color the fill is built from.
    pub fn base(&self) -> HexColor {
        match *self {
            Self::Solid(color) | Self::Gradient(color) => color,
        }
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Self::Gradient(_))
    }
}

/// Everything needed to render one output icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSpec {
    /// Source icon (SVG or raster).
    pub input: PathBuf,
    /// Destination PNG.
    pub output: PathBuf,
    /// Edge length of the square output.
    pub target_size: u32,
    /// Space between the tile edge and the icon, relative to the tile.
    pub padding: f64,
    /// Transparent margin around the tile, relative to the canvas.
    ///
    /// `None` means the tile fills the whole canvas.
    pub tile_inset: Option<f64>,
    /// Tile background; `None` is transparent.
    pub background: Option<BackgroundFill>,
    /// Clip shape applied to the tile.
    pub shape: Option<MaskShape>,
}

impl IconSpec {
    /// Creates a spec with no padding, no background and no shape.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            target_size: TARGET_SIZE,
            padding: 0.0,
            tile_inset: None,
            background: None,
            shape: None,
        }
    }

    /// Sets the icon padding. Rejects values outside `0.0..=0.3`.
    pub fn with_padding(mut self, padding: f64) -> Result<Self> {
        self.padding = validate_padding(padding)?;
        Ok(self)
    }

    /// Floats the tile inside a transparent margin. Rejects values outside `0.0..=0.3`.
    pub fn with_tile_inset(mut self, inset: f64) -> Result<Self> {
        self.tile_inset = Some(validate_padding(inset)?);
        Ok(self)
    }

    pub fn with_background(mut self, background: Option<BackgroundFill>) -> Self {
        self.background = background;
        self
    }

    pub fn with_shape(mut self, shape: Option<MaskShape>) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_target_size(mut self, size: u32) -> Self {
        self.target_size = size;
        self
    }

    /// Resolves the nested padding stages into pixel rectangles.
    pub fn layout(&self) -> Result<Layout> {
        Layout::compute(self.target_size, self.tile_inset, self.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::DARK;
    use crate::error::Error;

    #[test]
    fn rect_px_new() {
        let rect = RectPx::new(10, 20, 100, 200);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 220);
    }

    #[test]
    fn spec_defaults() {
        let spec = IconSpec::new("assets/icon.png", "out.png");
        assert_eq!(spec.target_size, 1024);
        assert_eq!(spec.padding, 0.0);
        assert!(spec.background.is_none());
        assert!(spec.shape.is_none());
        let layout = spec.layout().unwrap();
        assert_eq!(layout.icon, RectPx::from_size(1024, 1024));
    }

    #[test]
    fn spec_rejects_padding_outside_range() {
        let spec = IconSpec::new("in.png", "out.png");
        assert!(matches!(
            spec.clone().with_padding(0.5),
            Err(Error::InvalidPadding(_))
        ));
        assert!(matches!(
            spec.with_tile_inset(-0.1),
            Err(Error::InvalidPadding(_))
        ));
    }

    #[test]
    fn background_fill_modes() {
        let solid = BackgroundFill::new(DARK, false);
        let gradient = BackgroundFill::new(DARK, true);
        assert_eq!(solid, BackgroundFill::Solid(DARK));
        assert!(gradient.is_gradient());
        assert_eq!(gradient.base(), DARK);
    }

    #[test]
    fn background_fill_serializes_tagged() {
        let json = serde_json::to_string(&BackgroundFill::Gradient(DARK)).unwrap();
        assert_eq!(json, r##"{"kind":"gradient","color":"#171717"}"##);
    }
}
