//! OpenCV tracking backend.
//!
//! Wraps the KCF, CSRT and MIL trackers of the `opencv` crate behind
//! [`VisualTracker`]. The OpenCV tracker is created lazily in `init`, so
//! building one through a factory never touches the native library.

use ndarray::s;
use opencv::core::{self, Mat, Ptr};
use opencv::prelude::*;
use opencv::tracking::{TrackerCSRT, TrackerKCF, TrackerKCF_Params};
use opencv::video::TrackerMIL;

use crate::error::TrackerError;
use crate::tracker::capability::VisualTracker;
use crate::tracker::frame::Frame;
use crate::tracker::rect::Rect;

/// OpenCV tracking algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenCvAlgorithm {
    /// Kernelized correlation filter.
    Kcf,
    /// Discriminative correlation filter with channel and spatial reliability.
    Csrt,
    /// Multiple instance learning.
    Mil,
}

impl OpenCvAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpenCvAlgorithm::Kcf => "kcf",
            OpenCvAlgorithm::Csrt => "csrt",
            OpenCvAlgorithm::Mil => "mil",
        }
    }

    fn create(&self) -> opencv::Result<Engine> {
        Ok(match self {
            OpenCvAlgorithm::Kcf => Engine::Kcf(TrackerKCF::create(TrackerKCF_Params::default()?)?),
            OpenCvAlgorithm::Csrt => Engine::Csrt(TrackerCSRT::create_def()?),
            OpenCvAlgorithm::Mil => Engine::Mil(TrackerMIL::create_def()?),
        })
    }
}

enum Engine {
    Kcf(Ptr<TrackerKCF>),
    Csrt(Ptr<TrackerCSRT>),
    Mil(Ptr<TrackerMIL>),
}

impl Engine {
    fn init(&mut self, image: &Mat, region: core::Rect) -> opencv::Result<()> {
        match self {
            Engine::Kcf(t) => t.init(image, region),
            Engine::Csrt(t) => t.init(image, region),
            Engine::Mil(t) => t.init(image, region),
        }
    }

    fn update(&mut self, image: &Mat, region: &mut core::Rect) -> opencv::Result<bool> {
        match self {
            Engine::Kcf(t) => t.update(image, region),
            Engine::Csrt(t) => t.update(image, region),
            Engine::Mil(t) => t.update(image, region),
        }
    }
}

/// [`VisualTracker`] backed by an OpenCV tracker.
pub struct OpenCvTracker {
    algorithm: OpenCvAlgorithm,
    engine: Option<Engine>,
}

impl OpenCvTracker {
    pub fn new(algorithm: OpenCvAlgorithm) -> Self {
        Self {
            algorithm,
            engine: None,
        }
    }

    pub fn algorithm(&self) -> OpenCvAlgorithm {
        self.algorithm
    }
}

impl VisualTracker for OpenCvTracker {
    fn init(&mut self, frame: &Frame, region: Rect) -> Result<(), TrackerError> {
        let pixels = pixel_region(frame, region)?;
        let image = to_mat(frame).map_err(backend_error)?;
        let mut engine = self.algorithm.create().map_err(backend_error)?;
        engine.init(&image, pixels).map_err(backend_error)?;
        self.engine = Some(engine);
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Option<Rect> {
        let engine = self.engine.as_mut()?;
        let image = match to_mat(frame) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("{} tracker: frame conversion failed: {}", self.algorithm.as_str(), e);
                return None;
            }
        };

        let mut found = core::Rect::default();
        match engine.update(&image, &mut found) {
            Ok(true) => Some(Rect::new(
                found.x as f32,
                found.y as f32,
                found.width as f32,
                found.height as f32,
            )),
            Ok(false) => None,
            Err(e) => {
                log::debug!("{} tracker update failed: {}", self.algorithm.as_str(), e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        self.algorithm.as_str()
    }
}

fn backend_error(e: opencv::Error) -> TrackerError {
    TrackerError::Backend(e.to_string())
}

/// Integer pixel box of `region` clipped to the frame.
fn pixel_region(frame: &Frame, region: Rect) -> Result<core::Rect, TrackerError> {
    if region.is_empty() {
        return Err(TrackerError::EmptyRegion(region));
    }
    let (width, height) = (frame.width(), frame.height());
    let clamped = region
        .clamp_to(width, height)
        .ok_or(TrackerError::RegionOutsideFrame {
            region,
            width,
            height,
        })?;
    let pixels = core::Rect::new(
        clamped.x as i32,
        clamped.y as i32,
        clamped.width as i32,
        clamped.height as i32,
    );
    if pixels.width <= 0 || pixels.height <= 0 {
        return Err(TrackerError::EmptyRegion(region));
    }
    Ok(pixels)
}

/// Copy `frame` into an 8-bit BGR (or mono) `Mat`, dropping any alpha channel.
fn to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let channels = frame.channels().min(3);
    let bytes: Vec<u8> = frame
        .view()
        .slice(s![.., .., ..channels])
        .iter()
        .copied()
        .collect();
    Mat::from_slice(&bytes)?
        .reshape(channels as i32, frame.height() as i32)?
        .try_clone()
}
