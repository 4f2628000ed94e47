//! Ordered set of tracked objects built from one detection pass.

use crate::error::{MonitorError, TrackerError};
use crate::integration::NamedDetection;
use crate::monitor::events::{Annotation, BoundaryViolation, FrameReport};
use crate::monitor::trackable::TrackableObject;
use crate::tracker::{Frame, Rect, TrackerFactory};

/// A detection whose tracker could not be primed.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedDetection {
    /// Position of the detection in the input list.
    pub index: usize,
    pub name: String,
    pub error: TrackerError,
}

/// Objects tracked together, in detection order.
///
/// Objects are never added or removed after the set is built; a new
/// detection pass builds a new set.
#[derive(Debug, Default)]
pub struct TrackingSet {
    objects: Vec<TrackableObject>,
    rejected: Vec<RejectedDetection>,
}

impl TrackingSet {
    /// Create and prime one tracker per detection against `frame`.
    ///
    /// Detections whose tracker fails to initialize are dropped and logged;
    /// the remaining objects keep their relative input order.
    pub fn build<F>(detections: &[NamedDetection], frame: &Frame, factory: &F) -> Self
    where
        F: TrackerFactory + ?Sized,
    {
        let mut objects = Vec::with_capacity(detections.len());
        let mut rejected = Vec::new();

        for (index, det) in detections.iter().enumerate() {
            match TrackableObject::initialize(det.name.clone(), factory.create(), frame, det.rect) {
                Ok(obj) => {
                    log::debug!(
                        "tracking '{}' at {:?} with {}",
                        obj.name(),
                        obj.coords(),
                        obj.tracker_name()
                    );
                    objects.push(obj);
                }
                Err(error) => {
                    log::warn!(
                        "dropping detection {} ('{}'): tracker init failed: {}",
                        index,
                        det.name,
                        error
                    );
                    rejected.push(RejectedDetection {
                        index,
                        name: det.name.clone(),
                        error,
                    });
                }
            }
        }

        Self { objects, rejected }
    }

    /// Update every object against `frame`, in order.
    ///
    /// Found objects yield a box annotation, plus their boundary and a
    /// violation when they have one and are outside it. Objects that were
    /// not found only bump their miss counter: their coords are stale, so no
    /// containment check is made.
    pub fn process_frame(&mut self, frame: &Frame) -> FrameReport {
        let mut report = FrameReport::default();

        for (index, obj) in self.objects.iter_mut().enumerate() {
            if !obj.update(frame) {
                continue;
            }

            if let Some(borders) = obj.borders() {
                if !obj.is_inside_borders() {
                    report.violations.push(BoundaryViolation {
                        index,
                        name: obj.name().to_string(),
                        borders,
                        coords: obj.coords(),
                    });
                }
            }

            report.annotations.push(Annotation::Object {
                bbox: obj.coords(),
                label: obj.name().to_string(),
            });
            if let Some(borders) = obj.borders() {
                report.annotations.push(Annotation::Boundary { bbox: borders });
            }
        }

        report
    }

    /// Assign the boundary of the object at `index`.
    pub fn set_borders(&mut self, index: usize, region: Rect) -> Result<(), MonitorError> {
        let len = self.objects.len();
        self.objects
            .get_mut(index)
            .ok_or(MonitorError::UnknownObject { index, len })?
            .set_borders(region)
    }

    pub fn get(&self, index: usize) -> Option<&TrackableObject> {
        self.objects.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackableObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Detections dropped while building the set.
    pub fn rejected(&self) -> &[RejectedDetection] {
        &self.rejected
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use crate::tracker::{BoundingBox, VisualTracker};

    /// Moves to the scripted boxes in turn; `None` entries are misses.
    struct Scripted {
        script: VecDeque<Option<Rect>>,
    }

    impl VisualTracker for Scripted {
        fn init(&mut self, _frame: &Frame, region: Rect) -> Result<(), TrackerError> {
            if region.is_empty() {
                return Err(TrackerError::EmptyRegion(region));
            }
            Ok(())
        }

        fn update(&mut self, _frame: &Frame) -> Option<Rect> {
            self.script.pop_front().flatten()
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn scripted_factory(
        scripts: Vec<Vec<Option<Rect>>>,
    ) -> impl Fn() -> Box<dyn VisualTracker> {
        let scripts = Rc::new(RefCell::new(VecDeque::from(scripts)));
        move || {
            let script = scripts.borrow_mut().pop_front().unwrap_or_default();
            Box::new(Scripted {
                script: script.into(),
            }) as Box<dyn VisualTracker>
        }
    }

    fn frame() -> Frame {
        Frame::filled(200, 200, 3, 0).unwrap()
    }

    #[test]
    fn test_build_preserves_order() {
        let detections = vec![
            NamedDetection::new("cup", Rect::new(10.0, 10.0, 20.0, 20.0)),
            NamedDetection::new("phone", Rect::new(50.0, 10.0, 20.0, 20.0)),
            NamedDetection::new("cup", Rect::new(90.0, 10.0, 20.0, 20.0)),
        ];
        let set = TrackingSet::build(&detections, &frame(), &scripted_factory(vec![]));

        assert_eq!(set.len(), 3);
        let names: Vec<&str> = set.iter().map(|o| o.name()).collect();
        assert_eq!(names, ["cup", "phone", "cup"]);
        assert!(set.rejected().is_empty());
    }

    #[test]
    fn test_build_drops_failed_init() {
        let detections = vec![
            NamedDetection::new("a", Rect::new(10.0, 10.0, 20.0, 20.0)),
            NamedDetection::new("b", Rect::new(10.0, 10.0, 0.0, 20.0)),
            NamedDetection::new("c", Rect::new(10.0, 10.0, 20.0, 20.0)),
        ];
        let set = TrackingSet::build(&detections, &frame(), &scripted_factory(vec![]));

        let names: Vec<&str> = set.iter().map(|o| o.name()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(set.rejected().len(), 1);
        assert_eq!(set.rejected()[0].index, 1);
        assert_eq!(set.rejected()[0].name, "b");
    }

    #[test]
    fn test_process_frame_annotations_and_violation() {
        let detections = vec![
            NamedDetection::new("cup", Rect::new(10.0, 10.0, 20.0, 20.0)),
            NamedDetection::new("pen", Rect::new(100.0, 100.0, 10.0, 10.0)),
        ];
        let factory = scripted_factory(vec![
            vec![Some(Rect::new(60.0, 60.0, 20.0, 20.0))],
            vec![Some(Rect::new(101.0, 101.0, 10.0, 10.0))],
        ]);
        let mut set = TrackingSet::build(&detections, &frame(), &factory);
        set.set_borders(0, Rect::new(0.0, 0.0, 50.0, 50.0)).unwrap();

        let report = set.process_frame(&frame());

        assert_eq!(
            report.violations,
            vec![BoundaryViolation {
                index: 0,
                name: "cup".to_string(),
                borders: BoundingBox::new(0, 0, 50, 50),
                coords: BoundingBox::new(60, 60, 80, 80),
            }]
        );
        assert_eq!(
            report.annotations,
            vec![
                Annotation::Object {
                    bbox: BoundingBox::new(60, 60, 80, 80),
                    label: "cup".to_string(),
                },
                Annotation::Boundary {
                    bbox: BoundingBox::new(0, 0, 50, 50),
                },
                Annotation::Object {
                    bbox: BoundingBox::new(101, 101, 111, 111),
                    label: "pen".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_lost_object_does_not_block_others() {
        let detections = vec![
            NamedDetection::new("lost", Rect::new(10.0, 10.0, 20.0, 20.0)),
            NamedDetection::new("seen", Rect::new(100.0, 100.0, 10.0, 10.0)),
        ];
        let factory = scripted_factory(vec![
            vec![None],
            vec![Some(Rect::new(102.0, 100.0, 10.0, 10.0))],
        ]);
        let mut set = TrackingSet::build(&detections, &frame(), &factory);
        set.set_borders(0, Rect::new(50.0, 50.0, 10.0, 10.0)).unwrap();

        let report = set.process_frame(&frame());

        // stale coords of the lost object are outside its borders, but are not checked
        assert!(report.violations.is_empty());
        assert_eq!(report.annotations.len(), 1);
        assert_eq!(set.get(0).unwrap().object_not_found(), 1);
        assert_eq!(set.get(1).unwrap().coords(), BoundingBox::new(102, 100, 112, 110));
    }

    #[test]
    fn test_set_borders_unknown_index() {
        let mut set = TrackingSet::default();
        assert_eq!(
            set.set_borders(2, Rect::new(0.0, 0.0, 5.0, 5.0)),
            Err(MonitorError::UnknownObject { index: 2, len: 0 })
        );
    }
}
