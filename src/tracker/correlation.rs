//! Accuracy-oriented tracker: exhaustive correlation search around the last hit.

use crate::error::TrackerError;
use crate::tracker::capability::{SearchConfig, VisualTracker};
use crate::tracker::frame::Frame;
use crate::tracker::rect::Rect;
use crate::tracker::template::{self, Template};

#[derive(Debug, Clone)]
struct Locked {
    template: Template,
    x: usize,
    y: usize,
}

#[derive(Debug, Clone)]
pub struct CorrelationTracker {
    search: SearchConfig,
    locked: Option<Locked>,
}

impl CorrelationTracker {
    pub fn new(search: SearchConfig) -> Self {
        Self {
            search,
            locked: None,
        }
    }
}

impl VisualTracker for CorrelationTracker {
    fn init(&mut self, frame: &Frame, region: Rect) -> Result<(), TrackerError> {
        let (template, x, y) = template::prime(&frame.to_gray(), region)?;
        self.locked = Some(Locked { template, x, y });
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Option<Rect> {
        let locked = self.locked.as_mut()?;
        let gray = frame.to_gray();

        let hit = locked.template.search(
            &gray,
            (locked.x as isize, locked.y as isize),
            self.search.search_margin,
            1,
        )?;
        if hit.score < self.search.min_score {
            return None;
        }

        locked
            .template
            .adapt(&gray, hit.x, hit.y, self.search.template_update_rate);
        locked.x = hit.x;
        locked.y = hit.y;

        Some(Rect::new(
            hit.x as f32,
            hit.y as f32,
            locked.template.width() as f32,
            locked.template.height() as f32,
        ))
    }

    fn name(&self) -> &str {
        "correlation"
    }
}
