//! Integer rectangle math for placing marks on a square canvas

/// Half-open pixel rectangle: covers `x..x + width` by `y..y + height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given extent centered on a `size` x `size` canvas.
    ///
    /// Odd leftovers are dropped on the leading edge, so the mark sits at most
    /// half a pixel up-left of true center.
    pub fn centered(size: u32, width: u32, height: u32) -> Self {
        Self {
            x: size.saturating_sub(width) / 2,
            y: size.saturating_sub(height) / 2,
            width: width.min(size),
            height: height.min(size),
        }
    }

    /// Square covering the canvas minus `margin` on every side
    pub fn inset(size: u32, margin: u32) -> Self {
        let side = size.saturating_sub(margin.saturating_mul(2));
        Self::centered(size, side, side)
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Bounds) -> Bounds {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Distance between this rectangle's center and the canvas center, in
    /// pixels, as `(dx, dy)`.
    #[cfg(test)]
    pub fn center_offset(&self, size: u32) -> (f32, f32) {
        let canvas_center = size as f32 / 2.0;
        let cx = self.x as f32 + self.width as f32 / 2.0;
        let cy = self.y as f32 + self.height as f32 / 2.0;
        (cx - canvas_center, cy - canvas_center)
    }
}
