//! Plane convolution.
//!
//! Square kernels are 3x3 or 5x5, row-major, first tap at top-left.
//! Horizontal/vertical kernels are 1-D with odd length up to 25. Kernels
//! are applied as written (cross-correlation); boundary taps replicate the
//! nearest edge sample.

use maskwork_common::{MaskworkError, MaskworkResult};
use maskwork_frame_model::{Frame, FrameFormat, Plane};

/// Kernel application direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvMode {
    /// Odd square matrix (3x3 or 5x5).
    Square,
    /// 1-D pass along rows.
    Horizontal,
    /// 1-D pass along columns.
    Vertical,
}

/// A convolution kernel: taps, divisor, and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvKernel {
    pub taps: Vec<f32>,
    /// Divisor applied to the accumulated sum. Non-positive values select
    /// the automatic divisor: the tap sum when positive, otherwise 1.
    pub divisor: f32,
    pub mode: ConvMode,
}

impl ConvKernel {
    pub fn square(taps: Vec<f32>) -> Self {
        Self {
            taps,
            divisor: 0.0,
            mode: ConvMode::Square,
        }
    }

    pub fn square_div(taps: Vec<f32>, divisor: f32) -> Self {
        Self {
            taps,
            divisor,
            mode: ConvMode::Square,
        }
    }

    pub fn horizontal(taps: Vec<f32>, divisor: f32) -> Self {
        Self {
            taps,
            divisor,
            mode: ConvMode::Horizontal,
        }
    }

    pub fn vertical(taps: Vec<f32>, divisor: f32) -> Self {
        Self {
            taps,
            divisor,
            mode: ConvMode::Vertical,
        }
    }

    /// Side length for square kernels.
    fn square_side(&self) -> MaskworkResult<usize> {
        match self.taps.len() {
            9 => Ok(3),
            25 => Ok(5),
            n => Err(MaskworkError::processing(format!(
                "square kernels must have 9 or 25 taps, got {n}"
            ))),
        }
    }

    fn validate(&self) -> MaskworkResult<()> {
        match self.mode {
            ConvMode::Square => self.square_side().map(|_| ()),
            ConvMode::Horizontal | ConvMode::Vertical => {
                let n = self.taps.len();
                if n % 2 == 1 && (3..=25).contains(&n) {
                    Ok(())
                } else {
                    Err(MaskworkError::processing(format!(
                        "1-D kernels must have an odd length in 3..=25, got {n}"
                    )))
                }
            }
        }
    }

    /// The divisor actually applied.
    pub fn effective_divisor(&self) -> f32 {
        if self.divisor > 0.0 {
            self.divisor
        } else {
            let sum: f32 = self.taps.iter().sum();
            if sum > 0.0 {
                sum
            } else {
                1.0
            }
        }
    }
}

/// Convolve one plane. `saturate` keeps the sign of the result; when
/// false the absolute value is taken (the edge-mask default). Output
/// samples are quantized for integer formats.
pub fn convolve_plane(
    plane: &Plane,
    kernel: &ConvKernel,
    saturate: bool,
    format: &FrameFormat,
) -> MaskworkResult<Plane> {
    kernel.validate()?;
    let divisor = kernel.effective_divisor();
    let width = plane.width();
    let height = plane.height();
    let mut out = Plane::new(width, height);

    match kernel.mode {
        ConvMode::Square => {
            let side = kernel.square_side()?;
            let half = (side / 2) as isize;
            for y in 0..height {
                for x in 0..width {
                    let mut acc = 0.0f32;
                    for ky in -half..=half {
                        for kx in -half..=half {
                            let tap =
                                kernel.taps[((ky + half) as usize) * side + (kx + half) as usize];
                            acc += tap * plane.get_clamped(x as isize + kx, y as isize + ky);
                        }
                    }
                    out.set(x, y, finalize(acc, divisor, saturate, format));
                }
            }
        }
        ConvMode::Horizontal => {
            let half = (kernel.taps.len() / 2) as isize;
            for y in 0..height {
                for x in 0..width {
                    let mut acc = 0.0f32;
                    for (i, tap) in kernel.taps.iter().enumerate() {
                        let kx = i as isize - half;
                        acc += tap * plane.get_clamped(x as isize + kx, y as isize);
                    }
                    out.set(x, y, finalize(acc, divisor, saturate, format));
                }
            }
        }
        ConvMode::Vertical => {
            let half = (kernel.taps.len() / 2) as isize;
            for y in 0..height {
                for x in 0..width {
                    let mut acc = 0.0f32;
                    for (i, tap) in kernel.taps.iter().enumerate() {
                        let ky = i as isize - half;
                        acc += tap * plane.get_clamped(x as isize, y as isize + ky);
                    }
                    out.set(x, y, finalize(acc, divisor, saturate, format));
                }
            }
        }
    }

    Ok(out)
}

/// Convolve every plane of a frame with the same kernel.
pub fn convolve_frame(frame: &Frame, kernel: &ConvKernel, saturate: bool) -> MaskworkResult<Frame> {
    let format = *frame.format();
    frame.try_map_planes(|plane| convolve_plane(plane, kernel, saturate, &format))
}

#[inline]
fn finalize(acc: f32, divisor: f32, saturate: bool, format: &FrameFormat) -> f32 {
    let mut v = acc / divisor;
    if !saturate {
        v = v.abs();
    }
    if format.is_float() {
        v
    } else {
        v.round().clamp(0.0, format.peak_value())
    }
}
