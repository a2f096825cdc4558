//! Geometric mark: a dark plate with a blocky white "J"

use super::canvas::{Canvas, BLACK, WHITE};
use super::layout::Bounds;

/// Rectangles making up the mark for a given canvas size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometricMark {
    /// Margin-inset square behind the letter
    pub plate: Bounds,
    /// Vertical stroke, right-hand side of the glyph box
    pub stem: Bounds,
    /// Horizontal stroke along the bottom of the glyph box
    pub foot: Bounds,
}

impl GeometricMark {
    pub fn for_size(size: u32) -> Self {
        let margin = size / 8;
        let stroke = size / 4;
        let height = size / 2;

        // The glyph box is two strokes wide so the stem and foot together
        // stay centered
        let glyph = Bounds::centered(size, stroke * 2, height);

        Self {
            plate: Bounds::inset(size, margin),
            stem: Bounds::new(glyph.x + stroke, glyph.y, stroke, height),
            foot: Bounds::new(glyph.x, glyph.bottom() - stroke, stroke * 2, stroke),
        }
    }

    /// Bounding box of the letter alone
    pub fn glyph(&self) -> Bounds {
        self.stem.union(&self.foot)
    }
}

pub fn draw(canvas: &mut Canvas) {
    let mark = GeometricMark::for_size(canvas.size());
    tracing::debug!(?mark, glyph = ?mark.glyph(), "Drawing geometric mark");

    canvas.fill_rect(mark.plate, BLACK);
    canvas.fill_rect(mark.stem, WHITE);
    canvas.fill_rect(mark.foot, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::canvas::{PixelMode, TRANSPARENT};

    #[test]
    fn test_mark_proportions_192() {
        let mark = GeometricMark::for_size(192);
        assert_eq!(mark.plate, Bounds::new(24, 24, 144, 144));
        assert_eq!(mark.stem, Bounds::new(96, 48, 48, 96));
        assert_eq!(mark.foot, Bounds::new(48, 96, 96, 48));
        assert_eq!(mark.glyph(), Bounds::new(48, 48, 96, 96));
    }

    #[test]
    fn test_mark_is_centered() {
        for size in [8, 16, 33, 192, 255, 512] {
            let mark = GeometricMark::for_size(size);
            for part in [mark.plate, mark.glyph()] {
                let (dx, dy) = part.center_offset(size);
                assert!(dx.abs() <= 1.0, "size {size}: dx {dx}");
                assert!(dy.abs() <= 1.0, "size {size}: dy {dy}");
            }
        }
    }

    #[test]
    fn test_glyph_inside_plate() {
        let mark = GeometricMark::for_size(512);
        let glyph = mark.glyph();
        assert!(glyph.x >= mark.plate.x && glyph.right() <= mark.plate.right());
        assert!(glyph.y >= mark.plate.y && glyph.bottom() <= mark.plate.bottom());
    }

    #[test]
    fn test_draw_pixels() {
        let mut canvas = Canvas::new(192, PixelMode::Rgba).unwrap();
        draw(&mut canvas);
        let img = canvas.to_image().to_rgba8();

        // Corner outside the plate stays transparent
        assert_eq!(img.get_pixel(0, 0).0, TRANSPARENT);
        // Plate, away from the letter
        assert_eq!(img.get_pixel(30, 30).0, BLACK);
        // Stem and foot
        assert_eq!(img.get_pixel(120, 60).0, WHITE);
        assert_eq!(img.get_pixel(60, 130).0, WHITE);
        // Hollow of the J above the foot
        assert_eq!(img.get_pixel(60, 60).0, BLACK);
    }

    #[test]
    fn test_tiny_canvas_does_not_panic() {
        let mut canvas = Canvas::new(1, PixelMode::Rgba).unwrap();
        draw(&mut canvas);
        assert_eq!(canvas.size(), 1);
    }
}
