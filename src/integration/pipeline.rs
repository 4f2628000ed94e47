//! MonitorPipeline for combining a frame source and a detector with the monitor.

use crate::integration::{DetectionSource, FrameSource};
use crate::monitor::{Monitor, MonitorConfig, Tick};
use crate::tracker::{TrackerFactory, TrackerSettings};

/// Drives a [`Monitor`] from a frame source, one [`tick`](Self::tick) per
/// timer event.
///
/// A detection pass is requested with [`request_detection`](Self::request_detection)
/// and runs on the next frame read; that frame seeds the new tracking set.
pub struct MonitorPipeline<S, D, F = TrackerSettings> {
    source: S,
    detector: D,
    monitor: Monitor<F>,
    detection_pending: bool,
}

impl<S: FrameSource, D: DetectionSource> MonitorPipeline<S, D> {
    /// Create a new pipeline with the built-in trackers.
    pub fn new(source: S, detector: D, config: MonitorConfig) -> Self {
        Self::with_monitor(source, detector, Monitor::new(config))
    }
}

impl<S: FrameSource, D: DetectionSource, F: TrackerFactory> MonitorPipeline<S, D, F> {
    pub fn with_monitor(source: S, detector: D, monitor: Monitor<F>) -> Self {
        Self {
            source,
            detector,
            monitor,
            detection_pending: false,
        }
    }

    /// Start reading and tracking frames.
    pub fn start(&mut self) {
        self.monitor.set_tracking(true);
    }

    /// Stop reading frames and drop the tracked objects.
    pub fn stop(&mut self) {
        self.monitor.set_tracking(false);
        self.detection_pending = false;
    }

    /// Run a detection pass on the next frame read.
    pub fn request_detection(&mut self) {
        self.detection_pending = true;
    }

    pub fn detection_pending(&self) -> bool {
        self.detection_pending
    }

    /// Process one timer tick.
    ///
    /// While stopped, the last frame is shown again and the source is not
    /// read. A read error or a source with nothing ready is an idle tick. A
    /// failed detection pass is logged and retried on the next frame.
    pub fn tick(&mut self) -> Tick<'_> {
        if !self.monitor.is_tracking() {
            return self.monitor.tick(None);
        }

        let frame = match self.source.read() {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("frame source read failed: {}", e);
                None
            }
        };

        let Some(frame) = frame else {
            return self.monitor.tick(None);
        };

        if self.detection_pending {
            match self.detector.detect(&frame) {
                Ok(detections) => {
                    self.detection_pending = false;
                    self.monitor.detect(&detections, &frame);
                    return self.monitor.display(frame);
                }
                Err(e) => log::warn!("detection pass failed: {}", e),
            }
        }

        self.monitor.tick(Some(frame))
    }

    /// Get a reference to the underlying monitor.
    pub fn monitor(&self) -> &Monitor<F> {
        &self.monitor
    }

    /// Get a mutable reference to the underlying monitor.
    pub fn monitor_mut(&mut self) -> &mut Monitor<F> {
        &mut self.monitor
    }

    /// Get a mutable reference to the underlying frame source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }
}
