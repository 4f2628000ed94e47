use serde::{Deserialize, Serialize};

/// Bounding box in the tracker-native form.
///
/// Supports three common bounding box formats:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height (stored)
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
/// - XYAH: Center X, Center Y, Aspect Ratio (w/h), Height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Create a Rect from XYAH format (center x, center y, aspect ratio, height).
    #[inline]
    pub fn from_xyah(cx: f32, cy: f32, aspect_ratio: f32, height: f32) -> Self {
        let width = aspect_ratio * height;
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to XYAH format: (center_x, center_y, aspect_ratio, height).
    #[inline]
    pub fn to_xyah(&self) -> [f32; 4] {
        let (cx, cy) = self.center();
        let aspect_ratio = if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        };
        [cx, cy, aspect_ratio, self.height]
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Same size, moved by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Intersection with the `width` x `height` frame, or `None` if nothing is left.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<Rect> {
        let [x1, y1, x2, y2] = self.to_tlbr();
        let x1 = x1.max(0.0);
        let y1 = y1.max(0.0);
        let x2 = x2.min(width as f32);
        let y2 = y2.min(height as f32);

        let clamped = Rect::from_tlbr(x1, y1, x2, y2);
        (!clamped.is_empty()).then_some(clamped)
    }
}

/// Axis-aligned box in integer pixel corners (x1, y1) top-left, (x2, y2) bottom-right.
///
/// This is the form stored as an object's `coords` and `borders`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    #[inline]
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Corner form of a TLWH rect. Both corners truncate toward zero.
    #[inline]
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            x1: rect.x as i32,
            y1: rect.y as i32,
            x2: (rect.x + rect.width) as i32,
            y2: (rect.y + rect.height) as i32,
        }
    }

    #[inline]
    pub fn to_rect(&self) -> Rect {
        Rect::from_tlbr(self.x1 as f32, self.y1 as f32, self.x2 as f32, self.y2 as f32)
    }

    #[inline]
    pub fn top_left(&self) -> (i32, i32) {
        (self.x1, self.y1)
    }

    #[inline]
    pub fn bottom_right(&self) -> (i32, i32) {
        (self.x2, self.y2)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    /// Strict containment: `inner` must lie inside on all four sides.
    /// A box touching a boundary line counts as outside.
    #[inline]
    pub fn contains(&self, inner: &BoundingBox) -> bool {
        self.x1 < inner.x1 && self.y1 < inner.y1 && inner.x2 < self.x2 && inner.y2 < self.y2
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::from_rect(&rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);

        let xyah = rect.to_xyah();
        assert_eq!(xyah[0], 25.0);
        assert_eq!(xyah[1], 40.0);
        assert!((xyah[2] - 0.75).abs() < 1e-6);
        assert_eq!(xyah[3], 40.0);
    }

    #[test]
    fn test_from_xyah() {
        let rect = Rect::from_xyah(25.0, 40.0, 0.75, 40.0);
        assert!((rect.x - 10.0).abs() < 1e-6);
        assert!((rect.y - 20.0).abs() < 1e-6);
        assert!((rect.width - 30.0).abs() < 1e-6);
        assert!((rect.height - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_to_frame() {
        let rect = Rect::new(-5.0, 90.0, 20.0, 20.0);
        assert_eq!(rect.clamp_to(100, 100), Some(Rect::new(0.0, 90.0, 15.0, 10.0)));
        assert_eq!(Rect::new(120.0, 0.0, 10.0, 10.0).clamp_to(100, 100), None);
    }

    #[test]
    fn test_corners_truncate_like_int_cast() {
        let bbox = BoundingBox::from_rect(&Rect::new(10.7, 20.2, 5.6, 3.9));
        assert_eq!(bbox, BoundingBox::new(10, 20, 16, 24));
        assert_eq!(bbox.top_left(), (10, 20));
        assert_eq!(bbox.bottom_right(), (16, 24));
    }

    #[test]
    fn test_strict_containment() {
        let borders = BoundingBox::new(0, 0, 100, 100);
        assert!(borders.contains(&BoundingBox::new(10, 10, 90, 90)));
        assert!(!borders.contains(&BoundingBox::new(0, 0, 100, 100)));
        assert!(!borders.contains(&BoundingBox::new(1, 1, 100, 99)));
        assert!(!borders.contains(&BoundingBox::new(60, 60, 120, 80)));
    }
}
