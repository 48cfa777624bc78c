//! Hex colors and the HSL adjustments used for backgrounds.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use palette::{Hsl, IntoColor, Srgb};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// Light preset offered by the background prompt.
pub const LIGHT: HexColor = HexColor::new(0xff, 0xff, 0xff);

/// Dark preset offered by the background prompt.
pub const DARK: HexColor = HexColor::new(0x17, 0x17, 0x17);

/// An opaque sRGB color written as `#RRGGBB`.
///
/// Parsing accepts either case; formatting always emits lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns true if `input` is a well-formed `#RRGGBB` string.
    pub fn is_valid(input: &str) -> bool {
        HEX_PATTERN.is_match(input)
    }

    /// Perceived brightness in `0.0..=1.0`.
    ///
    /// Uses the `(299 r + 587 g + 114 b) / 1000` weighting, so only pure
    /// white reaches `1.0`.
    pub fn brightness(&self) -> f32 {
        let weighted = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        weighted as f32 / 1000.0 / 255.0
    }

    /// Raises HSL lightness by `amount` (absolute, clamped to 1.0).
    pub fn lighten(&self, amount: f32) -> Self {
        self.map_hsl(|hsl| hsl.lightness = (hsl.lightness + amount).min(1.0))
    }

    /// Lowers HSL lightness by `amount` (absolute, clamped to 0.0).
    pub fn darken(&self, amount: f32) -> Self {
        self.map_hsl(|hsl| hsl.lightness = (hsl.lightness - amount).max(0.0))
    }

    /// Rotates the hue by `degrees`.
    pub fn rotate_hue(&self, degrees: f32) -> Self {
        self.map_hsl(|hsl| hsl.hue += degrees)
    }

    /// RGBA channels with the given alpha.
    pub fn to_rgba(&self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Android `#AARRGGBB` notation.
    pub fn to_android_argb(&self, opacity: f32) -> String {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}{:02x}", alpha, self.r, self.g, self.b)
    }

    fn map_hsl(&self, adjust: impl FnOnce(&mut Hsl)) -> Self {
        let rgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let mut hsl: Hsl = rgb.into_color();
        adjust(&mut hsl);
        let out: Srgb = hsl.into_color();
        Self::new(to_channel(out.red), to_channel(out.green), to_channel(out.blue))
    }
}

fn to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !Self::is_valid(trimmed) {
            return Err(Error::InvalidHexColor(input.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&trimmed[range], 16)
                .map_err(|_| Error::InvalidHexColor(input.to_string()))
        };
        Ok(Self::new(channel(1..3)?, channel(3..5)?, channel(5..7)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_either_case() {
        assert_eq!("#171717".parse::<HexColor>().unwrap(), DARK);
        assert_eq!("#FFFFFF".parse::<HexColor>().unwrap(), LIGHT);
        assert_eq!(
            "#A0b1C2".parse::<HexColor>().unwrap(),
            HexColor::new(0xa0, 0xb1, 0xc2)
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["171717", "#17171", "#1717171", "#GGGGGG", "", "#fff"] {
            assert!(
                matches!(bad.parse::<HexColor>(), Err(Error::InvalidHexColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn formats_lowercase() {
        assert_eq!(HexColor::new(0xAB, 0x0C, 0xFF).to_string(), "#ab0cff");
    }

    #[test]
    fn brightness_bands() {
        assert!(DARK.brightness() < 0.3);
        assert!(LIGHT.brightness() >= 1.0);
        let gray = HexColor::new(0x80, 0x80, 0x80);
        assert!(gray.brightness() >= 0.3 && gray.brightness() < 1.0);
    }

    #[test]
    fn lighten_and_darken_move_lightness() {
        let gray = HexColor::new(0x80, 0x80, 0x80);
        assert!(gray.lighten(0.2).r > gray.r);
        assert!(gray.darken(0.2).r < gray.r);
        assert_eq!(LIGHT.lighten(0.5), LIGHT);
        assert_eq!(HexColor::new(0, 0, 0).darken(0.5), HexColor::new(0, 0, 0));
    }

    #[test]
    fn hue_rotation_turns_red_towards_green() {
        let red = HexColor::new(255, 0, 0);
        let rotated = red.rotate_hue(120.0);
        assert!(rotated.g > rotated.r);
    }

    #[test]
    fn android_notation_includes_alpha() {
        assert_eq!(DARK.to_android_argb(0.6), "#99171717");
        assert_eq!(DARK.to_android_argb(0.0), "#00171717");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&DARK).unwrap();
        assert_eq!(json, "\"#171717\"");
        let back: HexColor = serde_json::from_str("\"#FFFFFF\"").unwrap();
        assert_eq!(back, LIGHT);
        assert!(serde_json::from_str::<HexColor>("\"white\"").is_err());
    }
}
