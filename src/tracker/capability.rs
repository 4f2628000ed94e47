//! The pluggable single-object tracking capability and its factory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;
use crate::tracker::correlation::CorrelationTracker;
use crate::tracker::frame::Frame;
use crate::tracker::kalman_tracker::KalmanTracker;
#[cfg(feature = "opencv")]
use crate::tracker::opencv_backend::{OpenCvAlgorithm, OpenCvTracker};
use crate::tracker::rect::Rect;

/// A single-object visual tracker.
///
/// `init` is called exactly once, on the frame the object was selected in.
/// `update` then locates the object in each following frame; `None` means
/// the object was not found this frame, which is an ordinary outcome.
pub trait VisualTracker {
    /// Prime the tracker on `region` (TLWH, native frame pixels).
    fn init(&mut self, frame: &Frame, region: Rect) -> Result<(), TrackerError>;

    /// Locate the object in `frame`.
    fn update(&mut self, frame: &Frame) -> Option<Rect>;

    /// Algorithm name, for logging.
    fn name(&self) -> &str;
}

/// Available tracking algorithms.
///
/// The OpenCV kinds exist only with the `opencv` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    /// Exhaustive correlation search. Higher accuracy, lower throughput.
    Correlation,
    /// Motion-predicted coarse-to-fine search. Faster, tolerates brief misses.
    #[default]
    Kalman,
    /// OpenCV kernelized correlation filter.
    #[cfg(feature = "opencv")]
    Kcf,
    /// OpenCV CSRT. Most accurate of the OpenCV kinds, and the slowest.
    #[cfg(feature = "opencv")]
    Csrt,
    /// OpenCV multiple instance learning tracker.
    #[cfg(feature = "opencv")]
    Mil,
}

impl TrackerKind {
    #[cfg(not(feature = "opencv"))]
    pub const ALL: &'static [TrackerKind] = &[TrackerKind::Correlation, TrackerKind::Kalman];

    #[cfg(feature = "opencv")]
    pub const ALL: &'static [TrackerKind] = &[
        TrackerKind::Correlation,
        TrackerKind::Kalman,
        TrackerKind::Kcf,
        TrackerKind::Csrt,
        TrackerKind::Mil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerKind::Correlation => "correlation",
            TrackerKind::Kalman => "kalman",
            #[cfg(feature = "opencv")]
            TrackerKind::Kcf => OpenCvAlgorithm::Kcf.as_str(),
            #[cfg(feature = "opencv")]
            TrackerKind::Csrt => OpenCvAlgorithm::Csrt.as_str(),
            #[cfg(feature = "opencv")]
            TrackerKind::Mil => OpenCvAlgorithm::Mil.as_str(),
        }
    }

    /// Create a fresh, uninitialized tracker of this kind.
    pub fn build(&self, search: &SearchConfig) -> Box<dyn VisualTracker> {
        match self {
            TrackerKind::Correlation => Box::new(CorrelationTracker::new(search.clone())),
            TrackerKind::Kalman => Box::new(KalmanTracker::new(search.clone())),
            #[cfg(feature = "opencv")]
            TrackerKind::Kcf => Box::new(OpenCvTracker::new(OpenCvAlgorithm::Kcf)),
            #[cfg(feature = "opencv")]
            TrackerKind::Csrt => Box::new(OpenCvTracker::new(OpenCvAlgorithm::Csrt)),
            #[cfg(feature = "opencv")]
            TrackerKind::Mil => Box::new(OpenCvTracker::new(OpenCvAlgorithm::Mil)),
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackerKind {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackerKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TrackerError::UnknownKind(s.to_string()))
    }
}

/// Search parameters for the in-crate trackers. The OpenCV kinds ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Pixels searched around the last known position (correlation tracker).
    pub search_margin: usize,
    /// Pixels searched around the predicted position (Kalman tracker).
    pub predicted_margin: usize,
    /// Coarse grid step of the Kalman tracker's first pass.
    pub coarse_stride: usize,
    /// Lowest correlation score accepted as a hit.
    pub min_score: f32,
    /// Weight of the newest appearance when refreshing the template; 0 keeps it fixed.
    pub template_update_rate: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_margin: 24,
            predicted_margin: 10,
            coarse_stride: 2,
            min_score: 0.6,
            template_update_rate: 0.05,
        }
    }
}

/// Produces one fresh tracker per tracked object.
pub trait TrackerFactory {
    fn create(&self) -> Box<dyn VisualTracker>;
}

/// Algorithm choice plus its search parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    pub kind: TrackerKind,
    pub search: SearchConfig,
}

impl TrackerSettings {
    pub fn new(kind: TrackerKind) -> Self {
        Self {
            kind,
            search: SearchConfig::default(),
        }
    }
}

impl TrackerFactory for TrackerSettings {
    fn create(&self) -> Box<dyn VisualTracker> {
        self.kind.build(&self.search)
    }
}

impl TrackerFactory for TrackerKind {
    fn create(&self) -> Box<dyn VisualTracker> {
        self.build(&SearchConfig::default())
    }
}

impl<F> TrackerFactory for F
where
    F: Fn() -> Box<dyn VisualTracker>,
{
    fn create(&self) -> Box<dyn VisualTracker> {
        self()
    }
}
