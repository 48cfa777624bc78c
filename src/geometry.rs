//! Padding math and vector mask shapes.
//!
//! Everything here is resolution independent and free of image I/O. Masks
//! are returned as [`tiny_skia::Path`] values; the compositor decides how to
//! rasterize them.

use std::f64::consts::TAU;

use resvg::tiny_skia::{Path, PathBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::icon::RectPx;

/// Edge length of every rendered icon.
pub const TARGET_SIZE: u32 = 1024;

/// Largest padding percentage accepted for any stage.
pub const MAX_PADDING: f64 = 0.3;

/// Corner radius of the rounded-rectangle mask, relative to the tile edge.
pub const CORNER_RADIUS_RATIO: f32 = 0.2237;

/// Superellipse exponent; higher values give a squarer silhouette.
pub const SQUIRCLE_EXPONENT: f64 = 3.7;

/// Number of angular samples taken along the squircle boundary.
pub const SQUIRCLE_STEPS: usize = 360;

// Circle-to-cubic control point factor.
const KAPPA: f32 = 0.552_284_75;

// ============================================================================
// Padding
// ============================================================================

/// Checks that `percent` lies in `0.0..=MAX_PADDING`.
pub fn validate_padding(percent: f64) -> Result<f64> {
    if percent.is_finite() && (0.0..=MAX_PADDING).contains(&percent) {
        Ok(percent)
    } else {
        Err(Error::InvalidPadding(percent))
    }
}

/// Padding in pixels for one side of an `edge`-long square.
pub fn padding_px(edge: u32, percent: f64) -> u32 {
    (edge as f64 * percent).round() as u32
}

/// One padding stage: the margin on each side and the edge left inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inset {
    pub padding: u32,
    pub inner: u32,
}

impl Inset {
    /// Applies `percent` padding to an `edge`-long square.
    ///
    /// Fails when nothing would be left inside the padding.
    pub fn compute(edge: u32, percent: f64, stage: &'static str) -> Result<Self> {
        let padding = padding_px(edge, percent);
        let remaining = edge as i64 - 2 * padding as i64;
        if remaining <= 0 {
            return Err(Error::DegenerateCanvas {
                stage,
                edge,
                padding,
                remaining,
            });
        }
        Ok(Self {
            padding,
            inner: remaining as u32,
        })
    }
}

/// Placement of the background tile and the icon on the output canvas.
///
/// `tile` is expressed in canvas coordinates, `icon` in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub canvas: u32,
    pub tile: RectPx,
    pub icon: RectPx,
}

impl Layout {
    /// Computes the nested padding stages for a square canvas.
    ///
    /// The outer stage (`tile_inset`) floats the tile inside the canvas with a
    /// transparent margin; the inner stage (`padding`) floats the icon inside
    /// the tile.
    pub fn compute(canvas: u32, tile_inset: Option<f64>, padding: f64) -> Result<Self> {
        let outer = match tile_inset {
            Some(percent) => Inset::compute(canvas, validate_padding(percent)?, "floating tile")?,
            None => Inset {
                padding: 0,
                inner: canvas,
            },
        };
        let inner = Inset::compute(outer.inner, validate_padding(padding)?, "icon area")?;
        Ok(Self {
            canvas,
            tile: RectPx::new(outer.padding, outer.padding, outer.inner, outer.inner),
            icon: RectPx::new(inner.padding, inner.padding, inner.inner, inner.inner),
        })
    }

    /// True when the tile floats inside a transparent margin.
    pub fn has_outer_margin(&self) -> bool {
        self.tile.x > 0
    }
}

// ============================================================================
// Mask Shapes
// ============================================================================

/// Clip shape applied to the background tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskShape {
    /// Rounded square with the desktop icon corner radius.
    RoundedRectangle,
    /// Superellipse with exponent [`SQUIRCLE_EXPONENT`].
    Squircle,
}

impl MaskShape {
    /// Returns the outline of this shape for a square tile.
    pub fn path(&self, edge: u32) -> Option<Path> {
        let edge = edge as f32;
        match self {
            Self::RoundedRectangle => rounded_rect_path(edge, edge, edge * CORNER_RADIUS_RATIO),
            Self::Squircle => squircle_path(edge, edge),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RoundedRectangle => "Rounded rectangle",
            Self::Squircle => "Squircle",
        }
    }
}

/// Rounded rectangle anchored at the origin.
///
/// The radius is clamped to half of the shorter side.
pub fn rounded_rect_path(width: f32, height: f32, radius: f32) -> Option<Path> {
    let r = radius.max(0.0).min(width / 2.0).min(height / 2.0);
    let k = r * (1.0 - KAPPA);

    let mut pb = PathBuilder::new();
    pb.move_to(r, 0.0);
    pb.line_to(width - r, 0.0);
    pb.cubic_to(width - k, 0.0, width, k, width, r);
    pb.line_to(width, height - r);
    pb.cubic_to(width, height - k, width - k, height, width - r, height);
    pb.line_to(r, height);
    pb.cubic_to(k, height, 0.0, height - k, 0.0, height - r);
    pb.line_to(0.0, r);
    pb.cubic_to(0.0, k, k, 0.0, r, 0.0);
    pb.close();
    pb.finish()
}

/// Samples the superellipse boundary inscribed in a `width` x `height` box.
///
/// Points are taken at [`SQUIRCLE_STEPS`] equal angular steps, starting at
/// the middle of the right edge and running clockwise in image coordinates.
pub fn squircle_points(width: f32, height: f32) -> Vec<(f32, f32)> {
    let a = width as f64 / 2.0;
    let b = height as f64 / 2.0;
    let power = 2.0 / SQUIRCLE_EXPONENT;

    (0..SQUIRCLE_STEPS)
        .map(|step| {
            let theta = step as f64 / SQUIRCLE_STEPS as f64 * TAU;
            let (sin, cos) = theta.sin_cos();
            let x = a * cos.signum() * cos.abs().powf(power);
            let y = b * sin.signum() * sin.abs().powf(power);
            ((a + x) as f32, (b + y) as f32)
        })
        .collect()
}

/// Closed polygon approximating the squircle.
pub fn squircle_path(width: f32, height: f32) -> Option<Path> {
    let points = squircle_points(width, height);
    let (first, rest) = points.split_first()?;

    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}
