//! Logo compositing onto a rendered canvas

use crate::color::Color;
use crate::error::{Error, Result};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::ops::RangeInclusive;
use std::path::Path;

/// Accepted logo sizes, in percent of the canvas side
pub const LOGO_SIZE_RANGE: RangeInclusive<u8> = 10..=30;

/// Extra radius of the white disc behind the logo, in pixels
pub const LOGO_BACKDROP_PADDING: u32 = 10;

/// Load a logo from disk; anything that does not decode as an image is rejected.
pub fn load_logo(path: &Path) -> Result<DynamicImage> {
    let invalid = |reason: String| Error::InvalidLogo {
        path: path.display().to_string(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| invalid(e.to_string()))?;
    image::guess_format(&bytes).map_err(|_| invalid("not an image file".to_string()))?;
    image::load_from_memory(&bytes).map_err(|e| invalid(e.to_string()))
}

/// Draw `logo` centred on `canvas` over a white disc.
///
/// The logo side is `canvas_width * size_percent / 100`; the disc radius is
/// half that plus [`LOGO_BACKDROP_PADDING`].
pub fn overlay_logo(canvas: &mut RgbaImage, logo: &DynamicImage, size_percent: u8) {
    let canvas_size = canvas.width().min(canvas.height());
    let logo_px = (canvas_size * u32::from(size_percent) / 100).max(1);
    let offset = (canvas_size - logo_px.min(canvas_size)) / 2;

    let centre = canvas_size as f32 / 2.0;
    let radius = logo_px as f32 / 2.0 + LOGO_BACKDROP_PADDING as f32;
    fill_disc(canvas, centre, centre, radius, Color::WHITE);

    let scaled = imageops::resize(&logo.to_rgba8(), logo_px, logo_px, FilterType::Lanczos3);
    imageops::overlay(canvas, &scaled, i64::from(offset), i64::from(offset));

    tracing::debug!(logo_px, offset, radius, "Composited logo onto QR canvas");
}

fn fill_disc(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Color) {
    let pixel = color.to_rgba();
    let r2 = radius * radius;
    let (width, height) = canvas.dimensions();

    let x0 = (cx - radius).floor().max(0.0) as u32;
    let y0 = (cy - radius).floor().max(0.0) as u32;
    let x1 = ((cx + radius).ceil() as u32).min(width);
    let y1 = ((cy + radius).ceil() as u32).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            // Sample at pixel centres, like a canvas arc fill
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                canvas.put_pixel(x, y, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn red_logo() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn logo_is_centred_and_sized() {
        let mut canvas = RgbaImage::from_pixel(300, 300, Rgba([0, 0, 0, 255]));
        overlay_logo(&mut canvas, &red_logo(), 20);

        // 60px logo at offset 120
        assert_eq!(canvas.get_pixel(150, 150), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(121, 121), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(178, 178), &Rgba([255, 0, 0, 255]));
        // Disc radius 40: just outside the logo but inside the disc is white
        assert_eq!(canvas.get_pixel(150, 115), &Rgba([255, 255, 255, 255]));
        // Far corner untouched
        assert_eq!(canvas.get_pixel(5, 5), &Rgba([0, 0, 0, 255]));
        // Beyond the disc radius along the axis
        assert_eq!(canvas.get_pixel(150, 105), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn transparent_logo_shows_backdrop() {
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        let clear = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])));
        overlay_logo(&mut canvas, &clear, 30);
        assert_eq!(canvas.get_pixel(50, 50), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn non_image_logo_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "definitely not a png").unwrap();
        let err = load_logo(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidLogo { .. }), "got {err:?}");
    }

    #[test]
    fn missing_logo_is_rejected() {
        let err = load_logo(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(matches!(err, Error::InvalidLogo { .. }));
    }

    #[test]
    fn png_logo_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        RgbaImage::from_pixel(16, 16, Rgba([0, 0, 255, 255]))
            .save(&path)
            .unwrap();
        let logo = load_logo(&path).unwrap();
        assert_eq!((logo.width(), logo.height()), (16, 16));
    }
}
