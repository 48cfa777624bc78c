//! Loading the source icon into a square working image.

use std::path::Path;

use image::RgbaImage;
use image::imageops::FilterType;

use super::raster::{composite_over, render_svg};
use crate::error::{Error, Result};

/// Loads `path` and fits it inside an `edge` x `edge` transparent square.
///
/// SVG sources are rendered directly at the target size; raster sources are
/// resized with Lanczos3. The aspect ratio is preserved and the image is
/// centered, never cropped.
pub fn load_contained(path: &Path, edge: u32) -> Result<RgbaImage> {
    let fitted = if is_svg(path) {
        let data = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        render_svg(&data, edge)?
    } else {
        let decoded = image::open(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;
        decoded.resize(edge, edge, FilterType::Lanczos3).to_rgba8()
    };
    Ok(center_on_square(&fitted, edge))
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Centers `image` on a transparent `edge` x `edge` canvas.
pub fn center_on_square(image: &RgbaImage, edge: u32) -> RgbaImage {
    if image.width() == edge && image.height() == edge {
        return image.clone();
    }
    let mut square = RgbaImage::new(edge, edge);
    let x = (edge as i32 - image.width() as i32) / 2;
    let y = (edge as i32 - image.height() as i32) / 2;
    composite_over(&mut square, image, x, y);
    square
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn wide_raster_is_letterboxed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbaImage::from_pixel(200, 100, Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();

        let square = load_contained(&path, 50).unwrap();

        assert_eq!(square.dimensions(), (50, 50));
        assert_eq!(square.get_pixel(25, 2)[3], 0);
        assert_eq!(square.get_pixel(25, 25).0, [0, 0, 255, 255]);
        assert_eq!(square.get_pixel(25, 47)[3], 0);
    }

    #[test]
    fn small_raster_is_scaled_to_fit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let square = load_contained(&path, 32).unwrap();

        assert_eq!(square.dimensions(), (32, 32));
        assert_eq!(square.get_pixel(16, 16).0, [255, 0, 0, 255]);
    }

    #[test]
    fn svg_source_is_rendered_at_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        std::fs::write(
            &path,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="20"><rect width="10" height="20" fill="#00ff00"/></svg>"##,
        )
        .unwrap();

        let square = load_contained(&path, 40).unwrap();

        assert_eq!(square.dimensions(), (40, 40));
        assert_eq!(square.get_pixel(20, 20).0, [0, 255, 0, 255]);
        assert_eq!(square.get_pixel(2, 20)[3], 0);
    }

    #[test]
    fn undecodable_raster_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = load_contained(&path, 16).unwrap_err();
        assert!(matches!(err, Error::Image { .. }));
        assert!(err.to_string().contains("broken.png"));
    }
}
