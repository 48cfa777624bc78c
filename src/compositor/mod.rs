//! Icon compositing pipeline.
//!
//! Turns an [`IconSpec`] into one square PNG:
//!
//! ```text
//! source icon ──► contain-resize into the icon box
//!                        │
//! background ──► mask (destination-in) ──► icon (source-over)
//!                        │
//!                        ▼
//!         floating tile? ──► transparent canvas at the tile offset
//!                        │
//!                        ▼
//!                       PNG
//! ```
//!
//! Rendering is deterministic: the same spec and the same source bytes give
//! byte-identical output.

pub mod raster;
pub mod source;

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::gradient::render_gradient;
use crate::icon::{BackgroundFill, IconSpec};
use raster::{composite_over, destination_in, rasterize_mask};

/// Renders `spec` into an in-memory image of `target_size` x `target_size`.
pub fn render(spec: &IconSpec) -> Result<RgbaImage> {
    let layout = spec.layout()?;
    let icon = source::load_contained(&spec.input, layout.icon.width)?;

    let tile_edge = layout.tile.width;
    let mut tile = background(spec.background, tile_edge)?;

    if let Some(shape) = spec.shape {
        let path = shape.path(tile_edge).ok_or(Error::Render("mask shape"))?;
        let mask = rasterize_mask(&path, tile_edge, tile_edge)?;
        destination_in(&mut tile, &mask)?;
    }

    composite_over(&mut tile, &icon, layout.icon.x as i32, layout.icon.y as i32);

    if !layout.has_outer_margin() {
        return Ok(tile);
    }

    let mut canvas = RgbaImage::new(layout.canvas, layout.canvas);
    composite_over(&mut canvas, &tile, layout.tile.x as i32, layout.tile.y as i32);
    Ok(canvas)
}

/// Renders `spec` and writes it as PNG to `spec.output`.
pub fn compose(spec: &IconSpec) -> Result<()> {
    let image = render(spec)?;
    write_png(&image, &spec.output)?;
    tracing::debug!(
        event = "icon_composed",
        input = %spec.input.display(),
        output = %spec.output.display(),
        size = spec.target_size,
        padding = spec.padding,
        tile_inset = ?spec.tile_inset,
        background = ?spec.background,
        shape = ?spec.shape,
    );
    Ok(())
}

/// Builds the tile background.
fn background(fill: Option<BackgroundFill>, edge: u32) -> Result<RgbaImage> {
    match fill {
        None => Ok(RgbaImage::new(edge, edge)),
        Some(BackgroundFill::Solid(color)) => Ok(RgbaImage::from_pixel(
            edge,
            edge,
            Rgba(color.to_rgba(255)),
        )),
        Some(BackgroundFill::Gradient(color)) => render_gradient(color, edge),
    }
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })
}
