//! Appearance model shared by the built-in trackers: a grayscale template
//! matched by zero-mean normalized cross-correlation (NCC).

use ndarray::{Array2, ArrayView2, Zip, s};

use crate::error::TrackerError;
use crate::tracker::rect::Rect;

/// Templates with a per-pixel variance below this cannot be matched.
const MIN_VARIANCE: f32 = 1e-3;

/// Best placement found by a search, as a template top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub x: usize,
    pub y: usize,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct Template {
    raw: Array2<f32>,
    zero_mean: Array2<f32>,
    norm: f32,
}

impl Template {
    /// Cut a `w` x `h` patch at `(x, y)`. `None` when the patch is out of
    /// bounds or featureless.
    pub fn extract(gray: &Array2<f32>, x: usize, y: usize, w: usize, h: usize) -> Option<Self> {
        let (rows, cols) = gray.dim();
        if w == 0 || h == 0 || x + w > cols || y + h > rows {
            return None;
        }
        Self::from_raw(gray.slice(s![y..y + h, x..x + w]).to_owned())
    }

    fn from_raw(raw: Array2<f32>) -> Option<Self> {
        let n = raw.len() as f32;
        let mean = raw.sum() / n;
        let zero_mean = raw.mapv(|v| v - mean);
        let energy = zero_mean.iter().map(|v| v * v).sum::<f32>();
        if energy / n < MIN_VARIANCE {
            return None;
        }

        Some(Self {
            raw,
            zero_mean,
            norm: energy.sqrt(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.raw.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.raw.nrows()
    }

    /// NCC score in [-1, 1] for the template placed at `(x, y)`.
    /// Flat candidate patches score 0.
    pub fn score_at(&self, gray: &Array2<f32>, x: usize, y: usize) -> f32 {
        let patch = gray.slice(s![y..y + self.height(), x..x + self.width()]);
        self.score_patch(patch)
    }

    fn score_patch(&self, patch: ArrayView2<'_, f32>) -> f32 {
        let n = patch.len() as f32;
        let mut sum = 0.0f32;
        let mut sum_sq = 0.0f32;
        let mut cross = 0.0f32;
        Zip::from(&self.zero_mean).and(&patch).for_each(|&t, &p| {
            sum += p;
            sum_sq += p * p;
            cross += t * p;
        });

        let patch_energy = sum_sq - sum * sum / n;
        if patch_energy / n < MIN_VARIANCE {
            return 0.0;
        }
        cross / (self.norm * patch_energy.sqrt())
    }

    /// Search top-left positions within `margin` pixels of `(x0, y0)`.
    ///
    /// With `stride > 1` the window is scanned on a coarse grid first and the
    /// best coarse hit is then refined at single-pixel steps.
    pub fn search(
        &self,
        gray: &Array2<f32>,
        origin: (isize, isize),
        margin: usize,
        stride: usize,
    ) -> Option<Match> {
        let (rows, cols) = gray.dim();
        if self.width() > cols || self.height() > rows {
            return None;
        }
        let max_x = (cols - self.width()) as isize;
        let max_y = (rows - self.height()) as isize;
        let margin = margin as isize;

        let x_range = (
            (origin.0 - margin).clamp(0, max_x),
            (origin.0 + margin).clamp(0, max_x),
        );
        let y_range = (
            (origin.1 - margin).clamp(0, max_y),
            (origin.1 + margin).clamp(0, max_y),
        );

        let stride = stride.max(1);
        let coarse = self.scan(gray, x_range, y_range, stride)?;
        if stride == 1 {
            return Some(coarse);
        }

        let reach = stride as isize - 1;
        let (cx, cy) = (coarse.x as isize, coarse.y as isize);
        let fine = self.scan(
            gray,
            ((cx - reach).max(x_range.0), (cx + reach).min(x_range.1)),
            ((cy - reach).max(y_range.0), (cy + reach).min(y_range.1)),
            1,
        )?;
        Some(if fine.score > coarse.score { fine } else { coarse })
    }

    fn scan(
        &self,
        gray: &Array2<f32>,
        (x_lo, x_hi): (isize, isize),
        (y_lo, y_hi): (isize, isize),
        stride: usize,
    ) -> Option<Match> {
        let mut best: Option<Match> = None;
        for y in (y_lo..=y_hi).step_by(stride) {
            for x in (x_lo..=x_hi).step_by(stride) {
                let (x, y) = (x as usize, y as usize);
                let score = self.score_at(gray, x, y);
                if best.is_none_or(|b| score > b.score) {
                    best = Some(Match { x, y, score });
                }
            }
        }
        best
    }

    /// Blend the patch at `(x, y)` into the template with weight `rate`.
    /// The template is left untouched if the blend would be featureless.
    pub fn adapt(&mut self, gray: &Array2<f32>, x: usize, y: usize, rate: f32) {
        if rate <= 0.0 {
            return;
        }
        let patch = gray.slice(s![y..y + self.height(), x..x + self.width()]);
        let blended = &self.raw * (1.0 - rate) + &patch * rate;
        if let Some(updated) = Self::from_raw(blended) {
            *self = updated;
        }
    }
}

/// Template for `region` of the luma plane, with its integer top-left corner.
pub fn prime(gray: &Array2<f32>, region: Rect) -> Result<(Template, usize, usize), TrackerError> {
    if region.is_empty() {
        return Err(TrackerError::EmptyRegion(region));
    }
    let (rows, cols) = gray.dim();
    let clamped = region
        .clamp_to(cols, rows)
        .ok_or(TrackerError::RegionOutsideFrame {
            region,
            width: cols,
            height: rows,
        })?;

    let (x, y) = (clamped.x as usize, clamped.y as usize);
    let (w, h) = (clamped.width as usize, clamped.height as usize);
    if w == 0 || h == 0 {
        return Err(TrackerError::EmptyRegion(region));
    }
    let template =
        Template::extract(gray, x, y, w, h).ok_or(TrackerError::FeaturelessRegion(region))?;
    Ok((template, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob_plane(rows: usize, cols: usize, center: (f32, f32)) -> Array2<f32> {
        Array2::from_shape_fn((rows, cols), |(y, x)| {
            let d = ((x as f32 - center.0).powi(2) + (y as f32 - center.1).powi(2)).sqrt();
            255.0 * (1.0 - d / 6.0).max(0.0)
        })
    }

    #[test]
    fn test_prime_reports_init_failures() {
        let gray = blob_plane(40, 40, (20.0, 20.0));

        let empty = Rect::new(5.0, 5.0, 0.0, 10.0);
        assert_eq!(prime(&gray, empty).unwrap_err(), TrackerError::EmptyRegion(empty));

        let outside = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(matches!(
            prime(&gray, outside),
            Err(TrackerError::RegionOutsideFrame { width: 40, height: 40, .. })
        ));

        let flat = Rect::new(0.0, 0.0, 6.0, 6.0);
        assert_eq!(prime(&gray, flat).unwrap_err(), TrackerError::FeaturelessRegion(flat));

        let (template, x, y) = prime(&gray, Rect::new(-4.0, 12.0, 30.0, 16.0)).unwrap();
        assert_eq!((x, y), (0, 12));
        assert_eq!((template.width(), template.height()), (26, 16));
    }

    #[test]
    fn test_flat_region_is_rejected() {
        let gray = Array2::from_elem((20, 20), 128.0f32);
        assert!(Template::extract(&gray, 2, 2, 8, 8).is_none());
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let gray = blob_plane(20, 20, (8.0, 8.0));
        assert!(Template::extract(&gray, 15, 15, 8, 8).is_none());
    }

    #[test]
    fn test_exact_match_scores_one() {
        let gray = blob_plane(40, 40, (20.0, 20.0));
        let template = Template::extract(&gray, 12, 12, 16, 16).unwrap();
        assert!((template.score_at(&gray, 12, 12) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_search_finds_shifted_blob() {
        let first = blob_plane(60, 60, (20.0, 20.0));
        let template = Template::extract(&first, 12, 12, 16, 16).unwrap();

        let moved = blob_plane(60, 60, (27.0, 23.0));
        let exhaustive = template.search(&moved, (12, 12), 12, 1).unwrap();
        assert_eq!((exhaustive.x, exhaustive.y), (19, 15));

        let coarse = template.search(&moved, (12, 12), 12, 3).unwrap();
        assert_eq!((coarse.x, coarse.y), (19, 15));
        assert!(coarse.score > 0.99);
    }

    #[test]
    fn test_search_on_empty_plane_scores_zero() {
        let first = blob_plane(40, 40, (20.0, 20.0));
        let template = Template::extract(&first, 12, 12, 16, 16).unwrap();

        let empty = Array2::zeros((40, 40));
        let found = template.search(&empty, (12, 12), 6, 1).unwrap();
        assert_eq!(found.score, 0.0);
    }

    #[test]
    fn test_adapt_keeps_template_matchable() {
        let gray = blob_plane(40, 40, (20.0, 20.0));
        let mut template = Template::extract(&gray, 12, 12, 16, 16).unwrap();
        template.adapt(&Array2::zeros((40, 40)), 12, 12, 0.5);
        assert!((template.score_at(&gray, 12, 12) - 1.0).abs() < 1e-4);
    }
}
