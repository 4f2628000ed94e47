//! Integration module for connecting detection backends and video sources
//! with the boundary monitor.
//!
//! This module provides the traits a host implements for its detector and
//! frame source, and a pipeline that drives the monitor from them.

mod builder;
mod detector;
mod pipeline;
mod source;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetections, NamedDetection};
pub use pipeline::MonitorPipeline;
pub use source::{FrameIter, FrameSource};
