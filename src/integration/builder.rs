//! Builder for creating named detections from various box formats.

use crate::integration::NamedDetection;
use crate::tracker::Rect;

/// Builder for creating `NamedDetection` objects from various input formats.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    name: String,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the object name shown as its label.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (left, top, width, height), same as [`tlwh`](Self::tlwh).
    pub fn xywh(self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.tlwh(x, y, w, h)
    }

    /// Set bounding box from its center (center_x, center_y, width, height).
    pub fn cxcywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Set bounding box in TLWH format (left, top, width, height).
    pub fn tlwh(mut self, x: f32, y: f32, w: f32, h: f32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + w;
        self.y2 = y + h;
        self
    }

    /// Build the final `NamedDetection`.
    pub fn build(self) -> NamedDetection {
        NamedDetection::new(self.name, Rect::from_tlbr(self.x1, self.y1, self.x2, self.y2))
    }
}
