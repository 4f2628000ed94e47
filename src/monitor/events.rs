//! Records emitted by the monitor for rendering and alerting collaborators.

use serde::{Deserialize, Serialize};

use crate::tracker::BoundingBox;

/// An object was found outside its assigned boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryViolation {
    /// Position of the object in its tracking set.
    pub index: usize,
    pub name: String,
    pub borders: BoundingBox,
    pub coords: BoundingBox,
}

/// An object has gone unfound for `frames` consecutive frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectLost {
    pub index: usize,
    pub name: String,
    pub frames: u32,
}

/// Drawing directive for the rendering collaborator. Coordinates are native frame pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// Tracked box, labelled at its top-left corner.
    Object { bbox: BoundingBox, label: String },
    /// Boundary rectangle assigned to a tracked object.
    Boundary { bbox: BoundingBox },
}

/// Everything produced by one processed frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub annotations: Vec<Annotation>,
    pub violations: Vec<BoundaryViolation>,
    pub lost: Vec<ObjectLost>,
}

impl FrameReport {
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.violations.is_empty() && self.lost.is_empty()
    }
}
