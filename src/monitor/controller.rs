//! Control surface driven by the host: tracking toggle, detection passes,
//! boundary assignment and per-frame ticks.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};
use crate::integration::NamedDetection;
use crate::monitor::events::{FrameReport, ObjectLost};
use crate::monitor::tracking_set::TrackingSet;
use crate::tracker::{Frame, Rect, TrackerFactory, TrackerSettings};

/// Configuration for the [`Monitor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub tracker: TrackerSettings,
    /// Report an object as lost once it has been missed this many frames in a row.
    pub lost_warning_after: Option<NonZeroU32>,
    /// Size of the placeholder frame shown before the first real one.
    pub idle_frame_size: (usize, usize),
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerSettings::default(),
            lost_warning_after: NonZeroU32::new(5),
            idle_frame_size: (1000, 1000),
        }
    }
}

/// Result of one [`Monitor::tick`].
#[derive(Debug)]
pub struct Tick<'a> {
    /// Frame to display: the new frame, or the last one on an idle tick.
    pub frame: &'a Frame,
    pub report: FrameReport,
    /// Whether trackers were updated this tick.
    pub processed: bool,
}

/// Tracks the current [`TrackingSet`] across frames.
pub struct Monitor<F = TrackerSettings> {
    factory: F,
    lost_warning_after: Option<NonZeroU32>,
    tracking: bool,
    set: Option<TrackingSet>,
    last_frame: Frame,
}

impl Monitor<TrackerSettings> {
    pub fn new(config: MonitorConfig) -> Self {
        let MonitorConfig {
            tracker,
            lost_warning_after,
            idle_frame_size,
        } = config;
        Self::with_factory(tracker, lost_warning_after, idle_frame_size)
    }
}

impl Default for Monitor<TrackerSettings> {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

impl<F: TrackerFactory> Monitor<F> {
    /// Monitor creating its trackers through `factory`.
    pub fn with_factory(
        factory: F,
        lost_warning_after: Option<NonZeroU32>,
        (width, height): (usize, usize),
    ) -> Self {
        Self {
            factory,
            lost_warning_after,
            tracking: false,
            set: None,
            last_frame: Frame::white(width, height),
        }
    }

    /// Turn tracking on or off. Turning it off discards the tracking set.
    pub fn set_tracking(&mut self, enabled: bool) {
        if !enabled && self.set.take().is_some() {
            log::info!("tracking disabled, tracking set discarded");
        }
        if enabled && !self.tracking {
            log::info!("tracking enabled");
        }
        self.tracking = enabled;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Replace the tracking set with one built from `detections` on `frame`.
    pub fn detect(&mut self, detections: &[NamedDetection], frame: &Frame) -> &TrackingSet {
        let set = TrackingSet::build(detections, frame, &self.factory);
        log::info!(
            "detection pass: tracking {} of {} objects",
            set.len(),
            detections.len()
        );
        self.set.insert(set)
    }

    /// Assign the boundary (TLWH) of the object at `index` in the current set.
    pub fn assign_borders(&mut self, index: usize, region: Rect) -> Result<()> {
        let set = self.set.as_mut().ok_or(MonitorError::NoTrackingSet)?;
        set.set_borders(index, region)?;
        log::debug!("borders of object {} set to {:?}", index, region);
        Ok(())
    }

    pub fn tracking_set(&self) -> Option<&TrackingSet> {
        self.set.as_ref()
    }

    pub fn last_frame(&self) -> &Frame {
        &self.last_frame
    }

    /// Handle one timer tick.
    ///
    /// `None` means no new frame was ready: the last frame is shown again and
    /// nothing is processed. While tracking is off a new frame is only
    /// displayed.
    pub fn tick(&mut self, frame: Option<Frame>) -> Tick<'_> {
        let mut report = FrameReport::default();
        let mut processed = false;

        if let Some(frame) = frame {
            if self.tracking {
                if let Some(set) = self.set.as_mut() {
                    report = set.process_frame(&frame);
                    processed = true;
                    self.collect_lost(&mut report);
                    for v in &report.violations {
                        log::warn!(
                            "object '{}' is outside of its borders: borders={:?} coords={:?}",
                            v.name,
                            v.borders,
                            v.coords
                        );
                    }
                }
            }
            self.last_frame = frame;
        }

        Tick {
            frame: &self.last_frame,
            report,
            processed,
        }
    }

    /// Show `frame` without updating any tracker, e.g. the frame a detection
    /// pass was just run on.
    pub fn display(&mut self, frame: Frame) -> Tick<'_> {
        self.last_frame = frame;
        Tick {
            frame: &self.last_frame,
            report: FrameReport::default(),
            processed: false,
        }
    }

    fn collect_lost(&self, report: &mut FrameReport) {
        let (Some(threshold), Some(set)) = (self.lost_warning_after, self.set.as_ref()) else {
            return;
        };
        let threshold = threshold.get();

        for (index, obj) in set.iter().enumerate() {
            if obj.object_not_found() == threshold {
                log::warn!("object '{}' not found for {} frames", obj.name(), threshold);
                report.lost.push(ObjectLost {
                    index,
                    name: obj.name().to_string(),
                    frames: threshold,
                });
            }
        }
    }
}
