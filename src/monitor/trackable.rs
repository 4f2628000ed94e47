//! A single tracked object: its tracker, last known box and boundary.

use std::fmt;

use crate::error::{MonitorError, TrackerError};
use crate::tracker::{BoundingBox, Frame, Rect, VisualTracker};

/// One object followed by its own tracker.
///
/// The tracker is primed when the object is created, so an object that
/// exists can always be updated.
pub struct TrackableObject {
    name: String,
    coords: BoundingBox,
    borders: Option<BoundingBox>,
    tracker: Box<dyn VisualTracker>,
    object_not_found: u32,
}

impl TrackableObject {
    /// Prime `tracker` on `initial` (TLWH) in `frame`.
    pub fn initialize(
        name: impl Into<String>,
        mut tracker: Box<dyn VisualTracker>,
        frame: &Frame,
        initial: Rect,
    ) -> Result<Self, TrackerError> {
        tracker.init(frame, initial)?;
        Ok(Self {
            name: name.into(),
            coords: BoundingBox::from_rect(&initial),
            borders: None,
            tracker,
            object_not_found: 0,
        })
    }

    /// Locate the object in `frame`.
    ///
    /// On success `coords` takes the new box and the miss counter resets.
    /// On failure `coords` keeps the last known box and the counter grows by one.
    pub fn update(&mut self, frame: &Frame) -> bool {
        match self.tracker.update(frame) {
            Some(rect) => {
                self.coords = BoundingBox::from_rect(&rect);
                self.object_not_found = 0;
                true
            }
            None => {
                self.object_not_found = self.object_not_found.saturating_add(1);
                false
            }
        }
    }

    /// Assign the boundary (TLWH). Repeating the same boundary is a no-op;
    /// a different one is refused since borders never change once set.
    pub fn set_borders(&mut self, region: Rect) -> Result<(), MonitorError> {
        let borders = BoundingBox::from_rect(&region);
        match self.borders {
            None => {
                self.borders = Some(borders);
                Ok(())
            }
            Some(current) if current == borders => Ok(()),
            Some(_) => Err(MonitorError::BordersAlreadyAssigned {
                name: self.name.clone(),
            }),
        }
    }

    /// Whether `coords` lies strictly inside `borders`.
    /// Vacuously true for an unmonitored object.
    pub fn is_inside_borders(&self) -> bool {
        self.borders
            .is_none_or(|borders| borders.contains(&self.coords))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coords(&self) -> BoundingBox {
        self.coords
    }

    pub fn borders(&self) -> Option<BoundingBox> {
        self.borders
    }

    pub fn is_monitored(&self) -> bool {
        self.borders.is_some()
    }

    /// Consecutive frames the tracker failed to find the object.
    pub fn object_not_found(&self) -> u32 {
        self.object_not_found
    }

    pub fn tracker_name(&self) -> &str {
        self.tracker.name()
    }
}

impl fmt::Debug for TrackableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackableObject")
            .field("name", &self.name)
            .field("coords", &self.coords)
            .field("borders", &self.borders)
            .field("tracker", &self.tracker.name())
            .field("object_not_found", &self.object_not_found)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Replays a fixed sequence of update outcomes.
    struct Scripted(VecDeque<Option<Rect>>);

    impl VisualTracker for Scripted {
        fn init(&mut self, _frame: &Frame, _region: Rect) -> Result<(), TrackerError> {
            Ok(())
        }

        fn update(&mut self, _frame: &Frame) -> Option<Rect> {
            self.0.pop_front().flatten()
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn object(script: Vec<Option<Rect>>) -> (TrackableObject, Frame) {
        let frame = Frame::filled(100, 100, 3, 0).unwrap();
        let obj = TrackableObject::initialize(
            "cup",
            Box::new(Scripted(script.into())),
            &frame,
            Rect::new(10.0, 10.0, 80.0, 80.0),
        )
        .unwrap();
        (obj, frame)
    }

    #[test]
    fn test_initial_coords_in_corner_form() {
        let (obj, _) = object(vec![]);
        assert_eq!(obj.coords(), BoundingBox::new(10, 10, 90, 90));
        assert_eq!(obj.object_not_found(), 0);
        assert!(!obj.is_monitored());
    }

    #[test]
    fn test_inside_borders_is_strict() {
        let (mut obj, frame) = object(vec![Some(Rect::new(0.0, 0.0, 100.0, 100.0))]);
        obj.set_borders(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert!(obj.is_inside_borders());

        assert!(obj.update(&frame));
        assert_eq!(obj.coords(), BoundingBox::new(0, 0, 100, 100));
        assert!(!obj.is_inside_borders());
    }

    #[test]
    fn test_unmonitored_is_always_inside() {
        let (mut obj, frame) = object(vec![Some(Rect::new(500.0, 500.0, 10.0, 10.0))]);
        obj.update(&frame);
        assert!(obj.is_inside_borders());
    }

    #[test]
    fn test_failed_update_keeps_coords_and_counts() {
        let (mut obj, frame) = object(vec![None, None]);
        let before = obj.coords();

        assert!(!obj.update(&frame));
        assert_eq!(obj.coords(), before);
        assert_eq!(obj.object_not_found(), 1);

        assert!(!obj.update(&frame));
        assert_eq!(obj.object_not_found(), 2);
    }

    #[test]
    fn test_success_resets_counter_after_any_streak() {
        let mut script = vec![None; 7];
        script.push(Some(Rect::new(12.0, 14.0, 80.0, 80.0)));
        let (mut obj, frame) = object(script);

        for _ in 0..7 {
            obj.update(&frame);
        }
        assert_eq!(obj.object_not_found(), 7);

        assert!(obj.update(&frame));
        assert_eq!(obj.object_not_found(), 0);
        assert_eq!(obj.coords(), BoundingBox::new(12, 14, 92, 94));
    }

    #[test]
    fn test_set_borders_is_idempotent() {
        let (mut obj, _) = object(vec![]);
        obj.set_borders(Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
        obj.set_borders(Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();
        assert_eq!(obj.borders(), Some(BoundingBox::new(0, 0, 50, 50)));

        assert_eq!(
            obj.set_borders(Rect::new(5.0, 5.0, 50.0, 50.0)),
            Err(MonitorError::BordersAlreadyAssigned {
                name: "cup".to_string()
            })
        );
        assert_eq!(obj.borders(), Some(BoundingBox::new(0, 0, 50, 50)));
    }

    #[test]
    fn test_init_failure_propagates() {
        struct Refuses;

        impl VisualTracker for Refuses {
            fn init(&mut self, _frame: &Frame, region: Rect) -> Result<(), TrackerError> {
                Err(TrackerError::FeaturelessRegion(region))
            }

            fn update(&mut self, _frame: &Frame) -> Option<Rect> {
                None
            }

            fn name(&self) -> &str {
                "refuses"
            }
        }

        let frame = Frame::filled(10, 10, 1, 0).unwrap();
        let region = Rect::new(1.0, 1.0, 4.0, 4.0);
        let err = TrackableObject::initialize("x", Box::new(Refuses), &frame, region).unwrap_err();
        assert_eq!(err, TrackerError::FeaturelessRegion(region));
    }
}
