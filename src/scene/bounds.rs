use crate::transform::{QUERY_X_OFFSET, QUERY_Y_OFFSET};

///
/// An axis-aligned bounding box in stage coordinates (y increases upwards)
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

///
/// An integer rectangle in readback space (origin at the lower-left of the
/// stage surface)
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    ///
    /// Cheap reject test: true if the two boxes cannot overlap. The collision
    /// oracle must not issue any GPU work for a pair that fails this test.
    ///
    pub fn disjoint(&self, other: &Bounds) -> bool {
        self.bottom >= other.top
            || other.bottom >= self.top
            || self.left >= other.right
            || other.left >= self.right
    }

    ///
    /// The overlapping region of two bounding boxes, if there is one
    ///
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if self.disjoint(other) {
            return None;
        }

        Some(Bounds {
            left:   self.left.max(other.left),
            right:  self.right.min(other.right),
            bottom: self.bottom.max(other.bottom),
            top:    self.top.min(other.top)
        })
    }

    ///
    /// Snaps these bounds to a pixel rectangle in readback space, expanding
    /// outwards and never producing a rectangle smaller than 1x1
    ///
    pub fn to_pixel_rect(&self) -> PixelRect {
        let left    = self.left.floor() as i32;
        let right   = self.right.ceil() as i32;
        let bottom  = self.bottom.floor() as i32;
        let top     = self.top.ceil() as i32;

        PixelRect {
            x:      left + QUERY_X_OFFSET,
            y:      bottom + QUERY_Y_OFFSET,
            width:  (right - left).max(1),
            height: (top - bottom).max(1)
        }
    }
}

impl PixelRect {
    ///
    /// Clips this rectangle against a surface of the given size, preserving
    /// the 1x1 minimum
    ///
    pub fn clip_to_surface(&self, width: i32, height: i32) -> PixelRect {
        let x = self.x.max(0).min(width - 1);
        let y = self.y.max(0).min(height - 1);

        PixelRect {
            x,
            y,
            width:  (self.x + self.width - x).min(width - x).max(1),
            height: (self.y + self.height - y).min(height - y).max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(cx: f32, cy: f32, size: f32) -> Bounds {
        let half = size / 2.0;
        Bounds { left: cx-half, right: cx+half, bottom: cy-half, top: cy+half }
    }

    #[test]
    fn overlapping_squares_intersect() {
        // Two 50x50 sprites centred at (0,0) and (20,0): overlap region is 30x50
        let a = square(0.0, 0.0, 50.0);
        let b = square(20.0, 0.0, 50.0);

        assert!(!a.disjoint(&b));

        let overlap = a.intersection(&b).unwrap();
        assert!(overlap.right - overlap.left == 30.0, "Unexpected overlap: {:?}", overlap);
        assert!(overlap.top - overlap.bottom == 50.0, "Unexpected overlap: {:?}", overlap);
    }

    #[test]
    fn distant_squares_reject() {
        // Moving the second sprite to (100,0) leaves no bounding-box overlap
        let a = square(0.0, 0.0, 50.0);
        let b = square(100.0, 0.0, 50.0);

        assert!(a.disjoint(&b));
        assert!(b.disjoint(&a));
        assert!(a.intersection(&b).is_none());
    }

    #[test]
    fn touching_edges_reject() {
        // Shared edge counts as no overlap (left >= right)
        let a = Bounds { left: 0.0, right: 10.0, bottom: 0.0, top: 10.0 };
        let b = Bounds { left: 10.0, right: 20.0, bottom: 0.0, top: 10.0 };

        assert!(a.disjoint(&b));
    }

    #[test]
    fn pixel_rect_has_minimum_size() {
        let sliver = Bounds { left: 1.0, right: 1.0, bottom: -3.0, top: -3.0 };
        let rect   = sliver.to_pixel_rect();

        assert!(rect.width == 1 && rect.height == 1, "Unexpected rect: {:?}", rect);
        assert!(rect.x == 241 && rect.y == 177, "Unexpected rect: {:?}", rect);
    }

    #[test]
    fn pixel_rect_expands_outwards() {
        let bounds = Bounds { left: -0.5, right: 0.5, bottom: -0.5, top: 0.5 };
        let rect   = bounds.to_pixel_rect();

        assert!(rect == PixelRect { x: 239, y: 179, width: 2, height: 2 }, "Unexpected rect: {:?}", rect);
    }

    #[test]
    fn clipping_preserves_minimum() {
        let rect    = PixelRect { x: -5, y: 470, width: 3, height: 20 };
        let clipped = rect.clip_to_surface(480, 360);

        assert!(clipped.x >= 0 && clipped.y <= 359, "Unexpected rect: {:?}", clipped);
        assert!(clipped.width >= 1 && clipped.height >= 1, "Unexpected rect: {:?}", clipped);
        assert!(clipped.x + clipped.width <= 480 && clipped.y + clipped.height <= 360, "Unexpected rect: {:?}", clipped);
    }
}
