//! Placeholder fill from an embedded 1x1 PNG
//!
//! The pixel is decoded once per call and tiled over the whole canvas, so
//! the output still has the requested dimensions.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;

use super::canvas::{Canvas, Rgba};
use super::IconError;

/// 1x1 opaque black RGBA PNG
const PLACEHOLDER_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR4nGNgYGD4DwABBAEAX+XDSwAAAABJRU5ErkJggg==";

/// Decode the embedded image and return its top-left pixel
pub fn placeholder_pixel() -> Result<Rgba, IconError> {
    let bytes = STANDARD
        .decode(PLACEHOLDER_PNG)
        .map_err(|e| IconError::Placeholder(e.to_string()))?;
    let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .map_err(|e| IconError::Placeholder(e.to_string()))?
        .to_rgba8();

    img.pixels()
        .next()
        .map(|p| p.0)
        .ok_or_else(|| IconError::Placeholder("embedded image is empty".to_string()))
}

pub fn draw(canvas: &mut Canvas) -> Result<(), IconError> {
    let pixel = placeholder_pixel()?;
    tracing::debug!(?pixel, "Tiling placeholder pixel");
    canvas.fill(pixel);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::canvas::{PixelMode, BLACK};

    #[test]
    fn test_embedded_pixel_is_black() {
        assert_eq!(placeholder_pixel().unwrap(), BLACK);
    }

    #[test]
    fn test_draw_tiles_whole_canvas() {
        let mut canvas = Canvas::new(24, PixelMode::Rgba).unwrap();
        draw(&mut canvas).unwrap();
        let img = canvas.to_image().to_rgba8();
        assert!(img.pixels().all(|p| p.0 == BLACK));
    }
}
