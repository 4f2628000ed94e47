//! Per-frame tracking and boundary monitoring.
//!
//! A [`TrackingSet`] owns one [`TrackableObject`] per detection and updates
//! them in order on every frame. The [`Monitor`] wraps the set with the
//! controls a host application drives: the tracking toggle, detection
//! passes, boundary assignment and frame ticks.

mod controller;
mod events;
mod trackable;
mod tracking_set;

pub use controller::{Monitor, MonitorConfig, Tick};
pub use events::{Annotation, BoundaryViolation, FrameReport, ObjectLost};
pub use trackable::TrackableObject;
pub use tracking_set::{RejectedDetection, TrackingSet};
