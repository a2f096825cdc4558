//! Built-in 5x7 bitmap font
//!
//! Used when no scalable font can be loaded. Glyphs are drawn at a fixed
//! scale whatever the canvas size, the same way a bitmap default font would.

use super::canvas::{Canvas, Rgba};
use super::layout::Bounds;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Pixels per glyph cell
pub const SCALE: u32 = 3;

/// One glyph; each row uses the low five bits, bit 4 is the leftmost column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    rows: [u8; GLYPH_HEIGHT as usize],
}

const FALLBACK: Glyph = Glyph {
    ch: '?',
    rows: [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
};

#[rustfmt::skip]
const GLYPHS: &[Glyph] = &[
    Glyph { ch: 'A', rows: [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11] },
    Glyph { ch: 'B', rows: [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E] },
    Glyph { ch: 'C', rows: [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E] },
    Glyph { ch: 'D', rows: [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C] },
    Glyph { ch: 'E', rows: [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F] },
    Glyph { ch: 'F', rows: [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10] },
    Glyph { ch: 'G', rows: [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F] },
    Glyph { ch: 'H', rows: [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11] },
    Glyph { ch: 'I', rows: [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E] },
    Glyph { ch: 'J', rows: [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C] },
    Glyph { ch: 'K', rows: [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11] },
    Glyph { ch: 'L', rows: [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F] },
    Glyph { ch: 'M', rows: [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11] },
    Glyph { ch: 'N', rows: [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11] },
    Glyph { ch: 'O', rows: [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E] },
    Glyph { ch: 'P', rows: [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10] },
    Glyph { ch: 'Q', rows: [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D] },
    Glyph { ch: 'R', rows: [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11] },
    Glyph { ch: 'S', rows: [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E] },
    Glyph { ch: 'T', rows: [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04] },
    Glyph { ch: 'U', rows: [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E] },
    Glyph { ch: 'V', rows: [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04] },
    Glyph { ch: 'W', rows: [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A] },
    Glyph { ch: 'X', rows: [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11] },
    Glyph { ch: 'Y', rows: [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04] },
    Glyph { ch: 'Z', rows: [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F] },
    Glyph { ch: '0', rows: [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E] },
    Glyph { ch: '1', rows: [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E] },
    Glyph { ch: '2', rows: [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F] },
    Glyph { ch: '3', rows: [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E] },
    Glyph { ch: '4', rows: [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02] },
    Glyph { ch: '5', rows: [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E] },
    Glyph { ch: '6', rows: [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E] },
    Glyph { ch: '7', rows: [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08] },
    Glyph { ch: '8', rows: [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E] },
    Glyph { ch: '9', rows: [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C] },
];

/// Look up a glyph. Lowercase maps to uppercase; anything else missing
/// renders as `?`.
pub fn glyph(ch: char) -> &'static Glyph {
    let upper = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|g| g.ch == upper)
        .unwrap_or(&FALLBACK)
}

impl Glyph {
    pub fn is_set(&self, col: u32, row: u32) -> bool {
        if col >= GLYPH_WIDTH || row >= GLYPH_HEIGHT {
            return false;
        }
        self.rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
    }

    /// Bounding box of the inked cells in scaled pixels, relative to the
    /// glyph's top-left corner
    pub fn ink_bounds(&self) -> Bounds {
        let mut ink: Option<(u32, u32, u32, u32)> = None;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !self.is_set(col, row) {
                    continue;
                }
                ink = Some(match ink {
                    None => (col, row, col, row),
                    Some((l, t, r, b)) => (l.min(col), t.min(row), r.max(col), b.max(row)),
                });
            }
        }

        match ink {
            Some((l, t, r, b)) => Bounds::new(
                l * SCALE,
                t * SCALE,
                (r - l + 1) * SCALE,
                (b - t + 1) * SCALE,
            ),
            None => Bounds::new(0, 0, 0, 0),
        }
    }

    /// Draw with the glyph's top-left cell corner at `(x, y)`
    pub fn draw(&self, canvas: &mut Canvas, x: u32, y: u32, color: Rgba) {
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if self.is_set(col, row) {
                    let cell = Bounds::new(x + col * SCALE, y + row * SCALE, SCALE, SCALE);
                    canvas.fill_rect(cell, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::canvas::{PixelMode, WHITE};

    #[test]
    fn test_lookup() {
        assert_eq!(glyph('J').ch, 'J');
        assert_eq!(glyph('j').ch, 'J');
        assert_eq!(glyph('7').ch, '7');
        assert_eq!(glyph('€').ch, '?');
        assert_eq!(glyph('#').ch, '?');
    }

    #[test]
    fn test_every_glyph_has_ink() {
        for g in GLYPHS.iter().chain(std::iter::once(&FALLBACK)) {
            assert!(!g.ink_bounds().is_empty(), "glyph {:?} is blank", g.ch);
            assert!(g.rows.iter().all(|r| *r < 0x20), "glyph {:?} overflows", g.ch);
        }
    }

    #[test]
    fn test_ink_bounds() {
        // J touches all five columns (the hook reaches column 0)
        assert_eq!(glyph('J').ink_bounds(), Bounds::new(0, 0, 15, 21));
        // I only spans the middle three
        assert_eq!(glyph('I').ink_bounds(), Bounds::new(3, 0, 9, 21));
    }

    #[test]
    fn test_draw_matches_bits() {
        let mut canvas = Canvas::new(40, PixelMode::Rgb).unwrap();
        let g = glyph('T');
        g.draw(&mut canvas, 10, 10, WHITE);
        let img = canvas.to_image().to_rgb8();

        // Top bar
        assert_eq!(img.get_pixel(10, 10).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(24, 12).0, [255, 255, 255]);
        // Beside the stem on row 3
        assert_eq!(img.get_pixel(10, 19).0, [0, 0, 0]);
        // Stem
        assert_eq!(img.get_pixel(17, 30).0, [255, 255, 255]);
    }
}
