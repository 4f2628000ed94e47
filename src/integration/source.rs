//! Trait for the video collaborator that delivers frames.

use crate::tracker::Frame;

/// A camera, video file or any other producer of frames.
pub trait FrameSource {
    /// Error type for read failures.
    type Error: std::fmt::Display;

    /// Read the next frame. `Ok(None)` means no frame is ready yet.
    fn read(&mut self) -> Result<Option<Frame>, Self::Error>;
}

/// Frames replayed from an iterator, e.g. a decoded clip held in memory.
#[derive(Debug, Clone)]
pub struct FrameIter<I>(pub I);

impl<I> FrameSource for FrameIter<I>
where
    I: Iterator<Item = Frame>,
{
    type Error = std::convert::Infallible;

    fn read(&mut self) -> Result<Option<Frame>, Self::Error> {
        Ok(self.0.next())
    }
}
