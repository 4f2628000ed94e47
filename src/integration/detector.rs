//! Trait for the detection/selection collaborator that seeds a tracking set.

use serde::{Deserialize, Serialize};

use crate::tracker::{Frame, Rect};

/// An object to start tracking: a label and its box (TLWH, native frame pixels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDetection {
    /// Label, not required to be unique.
    pub name: String,
    pub rect: Rect,
}

impl NamedDetection {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
        }
    }
}

/// Source of the objects to track: an object detector, or a user selecting
/// regions by hand.
///
/// # Example
///
/// ```ignore
/// use boundwatch::{DetectionSource, Frame, NamedDetection, Rect};
///
/// struct FixedRegion;
///
/// impl DetectionSource for FixedRegion {
///     type Error = std::convert::Infallible;
///
///     fn detect(&mut self, _frame: &Frame) -> Result<Vec<NamedDetection>, Self::Error> {
///         Ok(vec![NamedDetection::new("cup", Rect::new(10.0, 10.0, 20.0, 20.0))])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error: std::fmt::Display;

    /// Find the objects to track in `frame`, in the order they should be tracked.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<NamedDetection>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `NamedDetection`.
pub trait IntoDetections {
    /// Convert the output into a vector of detections.
    fn into_detections(self) -> Vec<NamedDetection>;
}

impl IntoDetections for Vec<NamedDetection> {
    fn into_detections(self) -> Vec<NamedDetection> {
        self
    }
}

impl<S: Into<String>> IntoDetections for Vec<(S, Rect)> {
    fn into_detections(self) -> Vec<NamedDetection> {
        self.into_iter()
            .map(|(name, rect)| NamedDetection::new(name, rect))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_into_detections() {
        let dets = vec![
            ("cup", Rect::new(1.0, 2.0, 3.0, 4.0)),
            ("pen", Rect::new(5.0, 6.0, 7.0, 8.0)),
        ]
        .into_detections();
        assert_eq!(dets[0], NamedDetection::new("cup", Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(dets[1].name, "pen");
    }
}
