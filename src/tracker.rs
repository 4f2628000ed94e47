mod capability;
mod correlation;
mod frame;
mod kalman_filter;
mod kalman_tracker;
#[cfg(feature = "opencv")]
mod opencv_backend;
mod rect;
mod template;

pub use capability::{SearchConfig, TrackerFactory, TrackerKind, TrackerSettings, VisualTracker};
pub use correlation::CorrelationTracker;
pub use frame::Frame;
pub use kalman_tracker::KalmanTracker;
#[cfg(feature = "opencv")]
pub use opencv_backend::{OpenCvAlgorithm, OpenCvTracker};
pub use rect::{BoundingBox, Rect};
