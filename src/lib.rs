//! Single-object tracking with boundary monitoring.
//!
//! Every object picked out by a detection pass gets its own visual tracker.
//! Each frame, the trackers are updated, their boxes are converted to pixel
//! corners and checked against the object's assigned boundary. Objects that
//! leave their boundary raise a [`BoundaryViolation`]; objects that cannot be
//! found accumulate a consecutive-miss counter.

pub mod error;
pub mod integration;
pub mod monitor;
pub mod tracker;

pub use error::{MonitorError, TrackerError};
pub use integration::{
    DetectionBuilder, DetectionSource, FrameIter, FrameSource, IntoDetections, MonitorPipeline,
    NamedDetection,
};
pub use monitor::{
    Annotation, BoundaryViolation, FrameReport, Monitor, MonitorConfig, ObjectLost,
    RejectedDetection, Tick, TrackableObject, TrackingSet,
};
pub use tracker::{
    BoundingBox, Frame, Rect, SearchConfig, TrackerFactory, TrackerKind, TrackerSettings,
    VisualTracker,
};
#[cfg(feature = "opencv")]
pub use tracker::{OpenCvAlgorithm, OpenCvTracker};
