//! Raster canvas backed by a tiny-skia pixmap
//!
//! Drawing happens in premultiplied RGBA; the pixel mode only decides the
//! background and how the pixmap is flattened when encoded.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tiny_skia::{Color, Paint, Pixmap, PixmapMut, Rect, Transform};

use super::layout::Bounds;
use super::IconError;

/// Straight (non-premultiplied) RGBA color
pub type Rgba = [u8; 4];

pub const TRANSPARENT: Rgba = [0, 0, 0, 0];
pub const BLACK: Rgba = [0, 0, 0, 255];
pub const WHITE: Rgba = [255, 255, 255, 255];

/// Pixel format written to the PNG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// RGBA with a transparent background
    Rgba,
    /// RGB with an implied opaque black background
    Rgb,
}

impl PixelMode {
    pub fn background(&self) -> Rgba {
        match self {
            PixelMode::Rgba => TRANSPARENT,
            PixelMode::Rgb => BLACK,
        }
    }
}

/// Square in-memory image that marks are drawn onto
pub struct Canvas {
    pixmap: Pixmap,
    mode: PixelMode,
}

impl Canvas {
    /// Allocate a `size` x `size` canvas filled with the mode's background
    pub fn new(size: u32, mode: PixelMode) -> Result<Self, IconError> {
        let mut pixmap = Pixmap::new(size, size).ok_or(IconError::Canvas(size))?;
        pixmap.fill(to_color(mode.background()));
        Ok(Self { pixmap, mode })
    }

    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    /// Flood the whole canvas with one color
    pub fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(to_color(color));
    }

    /// Fill an axis-aligned rectangle. Empty bounds draw nothing.
    pub fn fill_rect(&mut self, bounds: Bounds, color: Rgba) {
        if bounds.is_empty() {
            return;
        }
        let Some(rect) = Rect::from_xywh(
            bounds.x as f32,
            bounds.y as f32,
            bounds.width as f32,
            bounds.height as f32,
        ) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], color[3]);
        paint.anti_alias = false;
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    /// Mutable view for renderers that draw straight into the pixmap
    pub fn pixmap_mut(&mut self) -> PixmapMut<'_> {
        self.pixmap.as_mut()
    }

    /// Flatten to an `image` buffer in the canvas's pixel mode
    pub fn to_image(&self) -> DynamicImage {
        let size = self.size();
        let mut raw = Vec::with_capacity(rgba_len(size));
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        // The buffer length always matches the pixmap dimensions
        let rgba = RgbaImage::from_raw(size, size, raw).unwrap_or_else(|| RgbaImage::new(size, size));
        match self.mode {
            PixelMode::Rgba => DynamicImage::ImageRgba8(rgba),
            PixelMode::Rgb => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        }
    }

    /// Encode the canvas as PNG bytes
    pub fn encode_png(&self) -> Result<Vec<u8>, IconError> {
        let mut buf = Cursor::new(Vec::new());
        self.to_image().write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }

    /// Encode, then write in one step so a failed write leaves no partial file
    /// behind from the encoder.
    pub fn save_png(&self, path: &Path) -> Result<(), IconError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|source| IconError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Bytes in a `size` x `size` RGBA buffer
fn rgba_len(size: u32) -> usize {
    size as usize * size as usize * 4
}

fn to_color(c: Rgba) -> Color {
    Color::from_rgba8(c[0], c[1], c[2], c[3])
}
