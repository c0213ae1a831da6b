//! Separable box and gaussian blurs, built on the convolution engine.

use maskwork_common::{MaskworkError, MaskworkResult};
use maskwork_frame_model::Frame;

use crate::convolution::{convolve_frame, ConvKernel};

/// Maximum supported blur radius (1-D kernels cap at 25 taps).
pub const MAX_RADIUS: usize = 12;

/// Box blur: `passes` repetitions of a horizontal + vertical mean filter
/// of radius `radius`. Repeated passes approach a gaussian.
pub fn box_blur(frame: &Frame, radius: usize, passes: usize) -> MaskworkResult<Frame> {
    if radius == 0 || passes == 0 {
        return Ok(frame.clone());
    }
    if radius > MAX_RADIUS {
        return Err(MaskworkError::processing(format!(
            "box blur radius {radius} exceeds the maximum of {MAX_RADIUS}"
        )));
    }
    let taps = vec![1.0; radius * 2 + 1];
    let horizontal = ConvKernel::horizontal(taps.clone(), 0.0);
    let vertical = ConvKernel::vertical(taps, 0.0);

    let mut out = frame.clone();
    for _ in 0..passes {
        out = convolve_frame(&out, &horizontal, true)?;
        out = convolve_frame(&out, &vertical, true)?;
    }
    Ok(out)
}

/// Gaussian blur with standard deviation `sigma`, truncated at three
/// sigmas (radius capped at [`MAX_RADIUS`]).
pub fn gauss_blur(frame: &Frame, sigma: f32) -> MaskworkResult<Frame> {
    if sigma <= 0.0 {
        return Ok(frame.clone());
    }
    let radius = ((sigma * 3.0).ceil() as usize).clamp(1, MAX_RADIUS);
    let taps: Vec<f32> = (-(radius as i32)..=radius as i32)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();

    let horizontal = ConvKernel::horizontal(taps.clone(), 0.0);
    let vertical = ConvKernel::vertical(taps, 0.0);
    let blurred = convolve_frame(frame, &horizontal, true)?;
    convolve_frame(&blurred, &vertical, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskwork_frame_model::FrameFormat;

    fn impulse_frame() -> Frame {
        let mut frame = Frame::blank(FrameFormat::GRAYS, 11, 11, 0.0);
        frame.plane_mut(0).set(5, 5, 1.0);
        frame
    }

    fn total(frame: &Frame) -> f32 {
        frame.plane(0).data().iter().sum()
    }

    #[test]
    fn zero_radius_or_sigma_is_identity() {
        let frame = impulse_frame();
        assert_eq!(box_blur(&frame, 0, 1).unwrap(), frame);
        assert_eq!(gauss_blur(&frame, 0.0).unwrap(), frame);
    }

    #[test]
    fn box_blur_conserves_mass_on_float_frames() {
        let frame = impulse_frame();
        let blurred = box_blur(&frame, 1, 2).unwrap();
        assert!((total(&blurred) - 1.0).abs() < 1e-5);
        // Energy spreads off the impulse.
        assert!(blurred.plane(0).get(5, 5) < 1.0);
        assert!(blurred.plane(0).get(4, 5) > 0.0);
    }

    #[test]
    fn gauss_blur_peaks_at_center_and_decays() {
        let frame = impulse_frame();
        let blurred = gauss_blur(&frame, 1.0).unwrap();
        let center = blurred.plane(0).get(5, 5);
        let near = blurred.plane(0).get(6, 5);
        let far = blurred.plane(0).get(8, 5);
        assert!(center > near);
        assert!(near > far);
    }

    #[test]
    fn oversized_radius_is_rejected() {
        let frame = impulse_frame();
        assert!(box_blur(&frame, 13, 1).is_err());
    }
}
