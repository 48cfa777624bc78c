//! Two-tone radial gradient backgrounds.
//!
//! A base color is split into two accent variants depending on how bright it
//! is. The variants light the tile from the top-left and the bottom-right
//! over a solid base fill. The same description is emitted as SVG (for the
//! raster compositor) and as an Android `layer-list` drawable.

use image::RgbaImage;

use crate::color::HexColor;
use crate::compositor::raster::render_svg;
use crate::error::{Error, Result};

/// Opacity of each accent at the center of its gradient.
pub const PEAK_OPACITY: f32 = 0.6;

/// Hue shift applied to the accents, in degrees.
const HUE_SHIFT: f32 = 20.0;

/// Which rule set produced a [`GradientVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessBand {
    /// Brightness below 0.3; accents are lightened.
    Dark,
    /// Maximal brightness (pure white); accents are darkened.
    Light,
    /// Everything in between; one accent up, one down.
    Mid,
}

impl BrightnessBand {
    pub fn of(color: HexColor) -> Self {
        let brightness = color.brightness();
        if brightness < 0.3 {
            Self::Dark
        } else if brightness >= 1.0 {
            Self::Light
        } else {
            Self::Mid
        }
    }
}

/// The two accent colors derived from a base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientVariant {
    /// Top-left accent.
    pub variant_a: HexColor,
    /// Bottom-right accent.
    pub variant_b: HexColor,
}

impl GradientVariant {
    /// Derives both accents from `base`.
    pub fn derive(base: HexColor) -> Self {
        let (variant_a, variant_b) = match BrightnessBand::of(base) {
            BrightnessBand::Dark => (base.lighten(0.20), base.lighten(0.08)),
            BrightnessBand::Light => (base.darken(0.15), base.darken(0.30)),
            BrightnessBand::Mid => (base.lighten(0.08), base.darken(0.08)),
        };
        Self {
            variant_a: variant_a.rotate_hue(HUE_SHIFT),
            variant_b: variant_b.rotate_hue(-HUE_SHIFT),
        }
    }
}

/// A radial light source, positions and radius relative to the tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialLight {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub color: HexColor,
}

impl GradientVariant {
    /// Top-left and bottom-right lights, in paint order.
    pub fn lights(&self) -> [RadialLight; 2] {
        [
            RadialLight {
                center_x: 0.0,
                center_y: 0.1,
                radius: 0.9,
                color: self.variant_a,
            },
            RadialLight {
                center_x: 1.0,
                center_y: 1.0,
                radius: 0.8,
                color: self.variant_b,
            },
        ]
    }
}

fn percent(value: f32) -> String {
    format!("{}%", (value * 100.0).round() as i32)
}

/// SVG document painting the gradient background at `width` x `height`.
pub fn gradient_svg(base: HexColor, width: u32, height: u32) -> String {
    let variant = GradientVariant::derive(base);
    let lights = variant.lights();

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}"><defs>"#
    );
    for (index, light) in lights.iter().enumerate() {
        svg.push_str(&format!(
            r#"<radialGradient id="light{index}" cx="{cx}" cy="{cy}" r="{r}"><stop offset="0%" stop-color="{color}" stop-opacity="{peak}"/><stop offset="100%" stop-color="{color}" stop-opacity="0"/></radialGradient>"#,
            cx = percent(light.center_x),
            cy = percent(light.center_y),
            r = percent(light.radius),
            color = light.color,
            peak = PEAK_OPACITY,
        ));
    }
    svg.push_str(&format!(
        r#"</defs><rect width="{width}" height="{height}" fill="{base}"/>"#
    ));
    for index in 0..lights.len() {
        svg.push_str(&format!(
            r#"<rect width="{width}" height="{height}" fill="url(#light{index})"/>"#
        ));
    }
    svg.push_str("</svg>");
    svg
}

/// Rasterizes the gradient background into an `edge` x `edge` image.
pub fn render_gradient(base: HexColor, edge: u32) -> Result<RgbaImage> {
    let image = render_svg(&gradient_svg(base, edge, edge), edge)?;
    if image.width() != edge || image.height() != edge {
        return Err(Error::Render("gradient background"));
    }
    Ok(image)
}

/// Android `layer-list` drawable with the same two-tone look.
pub fn android_layer_list(base: HexColor) -> String {
    let variant = GradientVariant::derive(base);
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <layer-list xmlns:android=\"http://schemas.android.com/apk/res/android\">\n",
    );
    xml.push_str(&format!(
        "    <item>\n        <shape android:shape=\"rectangle\">\n            <solid android:color=\"{base}\" />\n        </shape>\n    </item>\n"
    ));
    for light in variant.lights() {
        xml.push_str(&format!(
            "    <item>\n        <shape android:shape=\"rectangle\">\n            <gradient\n                android:type=\"radial\"\n                android:centerX=\"{cx:.1}\"\n                android:centerY=\"{cy:.1}\"\n                android:gradientRadius=\"{r}\"\n                android:startColor=\"{start}\"\n                android:endColor=\"{end}\" />\n        </shape>\n    </item>\n",
            cx = light.center_x,
            cy = light.center_y,
            r = percent(light.radius),
            start = light.color.to_android_argb(PEAK_OPACITY),
            end = light.color.to_android_argb(0.0),
        ));
    }
    xml.push_str("</layer-list>\n");
    xml
}
