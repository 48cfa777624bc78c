//! Raster helpers built on resvg/tiny-skia.
//!
//! SVG rendering, mask rasterization, and the two blend modes the
//! compositor needs (source-over and destination-in).

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{FillRule, Mask, Path, Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{Error, Result};

// ============================================================================
// SVG Rendering
// ============================================================================

/// Renders an SVG string to an RGBA image that fits in `size` x `size`.
///
/// The SVG is scaled while preserving aspect ratio (the larger dimension
/// will be `size`).
pub fn render_svg(svg_data: &str, size: u32) -> Result<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts)?;

    // Calculate scale to fit within size x size
    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = ((svg_size.width() * scale).round() as u32).clamp(1, size.max(1));
    let height = ((svg_size.height() * scale).round() as u32).clamp(1, size.max(1));

    let mut pixmap = Pixmap::new(width, height).ok_or(Error::Render("svg document"))?;
    let transform = Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for (index, pixel) in pixmap.pixels().iter().enumerate() {
        let x = index as u32 % width;
        let y = index as u32 / width;
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(x, y, Rgba([r, g, b, a]));
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Masks
// ============================================================================

/// Rasterizes a closed path into an anti-aliased coverage mask.
pub fn rasterize_mask(path: &Path, width: u32, height: u32) -> Result<Mask> {
    let mut mask = Mask::new(width, height).ok_or(Error::Render("shape mask"))?;
    mask.fill_path(path, FillRule::Winding, true, Transform::identity());
    Ok(mask)
}

/// Keeps `dest` only where `mask` is opaque (destination-in).
///
/// The mask must have the same dimensions as `dest`.
pub fn destination_in(dest: &mut RgbaImage, mask: &Mask) -> Result<()> {
    if dest.width() != mask.width() || dest.height() != mask.height() {
        return Err(Error::Render("mask with mismatched size"));
    }
    for (pixel, &coverage) in dest.pixels_mut().zip(mask.data()) {
        let alpha = (pixel[3] as u32 * coverage as u32 + 127) / 255;
        if alpha == 0 {
            pixel.0 = [0, 0, 0, 0];
        } else {
            pixel[3] = alpha as u8;
        }
    }
    Ok(())
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let dx = x + sx as i32;
            let dy = y + sy as i32;

            // Skip if outside destination bounds
            if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
                continue;
            }

            let src_pixel = src.get_pixel(sx, sy);
            if src_pixel[3] == 0 {
                continue;
            }
            let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
            let blended = alpha_blend(*src_pixel, *dst_pixel);
            dest.put_pixel(dx as u32, dy as u32, blended);
        }
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
