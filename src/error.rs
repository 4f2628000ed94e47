//! Error types for tracker initialization and monitor control.

use thiserror::Error;

use crate::tracker::Rect;

/// Failure to prime a tracker on its initial region.
///
/// Losing track during `update` is not an error and never produces one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    #[error("initial region {0:?} has no area")]
    EmptyRegion(Rect),

    #[error("initial region {region:?} lies outside the {width}x{height} frame")]
    RegionOutsideFrame { region: Rect, width: usize, height: usize },

    #[error("initial region {0:?} is featureless and cannot be matched")]
    FeaturelessRegion(Rect),

    #[error("unknown tracker kind: {0}")]
    UnknownKind(String),

    #[error("tracker backend failed: {0}")]
    Backend(String),
}

/// Errors raised by the monitor's control surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MonitorError {
    #[error("no tracked object at index {index} (set holds {len})")]
    UnknownObject { index: usize, len: usize },

    #[error("tracking set is empty, run a detection first")]
    NoTrackingSet,

    #[error("borders of '{name}' are already assigned")]
    BordersAlreadyAssigned { name: String },

    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    InvalidFrameBuffer { expected: usize, actual: usize },

    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
