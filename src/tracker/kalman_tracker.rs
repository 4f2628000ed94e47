//! Speed-oriented tracker: a Kalman filter predicts where the object went and
//! a coarse-to-fine correlation search confirms it in a small window.

use crate::error::TrackerError;
use crate::tracker::capability::{SearchConfig, VisualTracker};
use crate::tracker::frame::Frame;
use crate::tracker::kalman_filter::{KalmanFilter, KalmanState};
use crate::tracker::rect::Rect;
use crate::tracker::template::{self, Template};

#[derive(Debug, Clone)]
struct Locked {
    template: Template,
    state: KalmanState,
}

#[derive(Debug, Clone)]
pub struct KalmanTracker {
    search: SearchConfig,
    kalman_filter: KalmanFilter,
    locked: Option<Locked>,
}

impl KalmanTracker {
    pub fn new(search: SearchConfig) -> Self {
        Self {
            search,
            kalman_filter: KalmanFilter::default(),
            locked: None,
        }
    }
}

impl VisualTracker for KalmanTracker {
    fn init(&mut self, frame: &Frame, region: Rect) -> Result<(), TrackerError> {
        let (template, x, y) = template::prime(&frame.to_gray(), region)?;
        let rect = Rect::new(
            x as f32,
            y as f32,
            template.width() as f32,
            template.height() as f32,
        );
        let state = self.kalman_filter.initiate(rect.to_xyah());
        self.locked = Some(Locked { template, state });
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Option<Rect> {
        let locked = self.locked.as_mut()?;
        let gray = frame.to_gray();

        let mut predicted = self.kalman_filter.predict(&locked.state);
        let [cx, cy, _, _] = predicted.xyah();
        let (w, h) = (
            locked.template.width() as f32,
            locked.template.height() as f32,
        );
        let origin = (
            (cx - w / 2.0).round() as isize,
            (cy - h / 2.0).round() as isize,
        );

        let hit = locked
            .template
            .search(
                &gray,
                origin,
                self.search.predicted_margin,
                self.search.coarse_stride,
            )
            .filter(|hit| hit.score >= self.search.min_score);

        let Some(hit) = hit else {
            // coast on the prediction, without growing the box
            predicted.mean[7] = 0.0;
            locked.state = predicted;
            return None;
        };

        let measured = Rect::new(hit.x as f32, hit.y as f32, w, h);
        locked.state = self
            .kalman_filter
            .update(&predicted, measured.to_xyah())
            .unwrap_or(predicted);
        locked
            .template
            .adapt(&gray, hit.x, hit.y, self.search.template_update_rate);

        Some(measured)
    }

    fn name(&self) -> &str {
        "kalman"
    }
}
