//! Raw video frame handed to the trackers.

use ndarray::{Array2, Array3, ArrayView3, Axis, s};

use crate::error::{MonitorError, Result};

/// A single video frame: (height, width, channels), origin top-left.
///
/// Three and four channel frames are interpreted as BGR(A).
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    data: Array3<u8>,
}

impl Frame {
    pub fn new(data: Array3<u8>) -> Result<Self> {
        match data.dim().2 {
            1 | 3 | 4 => Ok(Self { data }),
            c => Err(MonitorError::UnsupportedChannels(c)),
        }
    }

    /// Wrap an interleaved row-major pixel buffer.
    ///
    /// A size whose byte count overflows `usize` reports `expected: usize::MAX`.
    pub fn from_raw(width: usize, height: usize, channels: usize, bytes: Vec<u8>) -> Result<Self> {
        let actual = bytes.len();
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(MonitorError::InvalidFrameBuffer {
                expected: usize::MAX,
                actual,
            })?;
        let data = Array3::from_shape_vec((height, width, channels), bytes)
            .map_err(|_| MonitorError::InvalidFrameBuffer { expected, actual })?;
        Self::new(data)
    }

    /// Frame with every sample set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        Self::new(Array3::from_elem((height, width, channels), value))
    }

    /// Opaque white three-channel frame.
    pub fn white(width: usize, height: usize) -> Self {
        Self {
            data: Array3::from_elem((height, width, 3), u8::MAX),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array3<u8> {
        self.data
    }

    /// Luma plane with BT.601 weights.
    pub fn to_gray(&self) -> Array2<f32> {
        if self.channels() == 1 {
            return self.data.index_axis(Axis(2), 0).mapv(f32::from);
        }

        let b = self.data.slice(s![.., .., 0]);
        let g = self.data.slice(s![.., .., 1]);
        let r = self.data.slice(s![.., .., 2]);

        let mut gray = Array2::zeros((self.height(), self.width()));
        ndarray::Zip::from(&mut gray)
            .and(&b)
            .and(&g)
            .and(&r)
            .for_each(|y, &b, &g, &r| {
                *y = 0.114 * f32::from(b) + 0.587 * f32::from(g) + 0.299 * f32::from(r);
            });
        gray
    }
}
