//! Ridge detection.
//!
//! Ridges are lines the first derivative crosses zero on, so a plain edge
//! mask yields a double response there. Instead the two directional
//! kernels are applied twice to form the second-order responses xx, yy,
//! and xy, and the ridge strength is the largest-magnitude eigenvalue of
//! that Hessian (so bright and dark ridges both fire):
//!
//! ```text
//! (|xx + yy| + sqrt((xx - yy)^2 + 4 xy^2)) / 2
//! ```
//!
//! Computation always runs at float precision so signed intermediates
//! survive; the result is demoted to the source depth.

use maskwork_common::{MaskworkError, MaskworkResult};
use maskwork_frame_model::{depth, Frame, Plane};

use crate::convolution::convolve_frame;
use crate::edge::{apply_mask_params, EdgeOperator, MaskParams};

pub(crate) fn ridge_mask(
    operator: EdgeOperator,
    frame: &Frame,
    params: &MaskParams,
) -> MaskworkResult<Frame> {
    if !operator.is_ridge_capable() {
        return Err(MaskworkError::unsupported(format!(
            "operator {} does not support ridge masks",
            operator.name()
        )));
    }
    let spec = operator
        .spec()
        .ok_or_else(|| MaskworkError::processing("ridge operator without kernels"))?;

    let src_format = *frame.format();
    let work = depth::to_float(frame)?;
    let (kx, ky) = (&spec.kernels[0], &spec.kernels[1]);

    let x = convolve_frame(&work, kx, true)?;
    let y = convolve_frame(&work, ky, true)?;
    let xx = convolve_frame(&x, kx, true)?;
    let yy = convolve_frame(&y, ky, true)?;
    let xy = convolve_frame(&x, ky, true)?;

    let ridge = xx.try_map_planes_indexed(|plane_idx, xx_plane| {
        let yy_plane = yy.plane(plane_idx);
        let xy_plane = xy.plane(plane_idx);
        let mut out = Plane::new(xx_plane.width(), xx_plane.height());
        let data = out.data_mut();
        for i in 0..data.len() {
            let a = xx_plane.data()[i];
            let b = yy_plane.data()[i];
            let c = xy_plane.data()[i];
            let root = ((a - b) * (a - b) + 4.0 * c * c).sqrt();
            data[i] = ((a + b).abs() + root) / 2.0;
        }
        Ok(out)
    })?;

    let demoted = if src_format.is_float() {
        ridge
    } else {
        depth::to_depth(&ridge, src_format.bits_per_sample)?
    };
    Ok(apply_mask_params(&demoted, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeDetector;
    use maskwork_frame_model::FrameFormat;

    /// A one-pixel-wide bright vertical line on black.
    fn line_frame(width: usize, height: usize) -> Frame {
        let mut frame = Frame::blank(FrameFormat::GRAY8, width, height, 0.0);
        for y in 0..height {
            frame.plane_mut(0).set(width / 2, y, 255.0);
        }
        frame
    }

    #[test]
    fn ridge_mask_responds_to_a_thin_line() {
        let frame = line_frame(17, 9);
        let detector = EdgeDetector::new(EdgeOperator::ExSobel);
        let mask = detector.ridge_mask(&frame, &MaskParams::default()).unwrap();

        let on_line = mask.plane(0).get(8, 4);
        let far_away = mask.plane(0).get(1, 4);
        assert!(on_line > far_away);
        assert_eq!(mask.format(), frame.format());
    }

    #[test]
    fn ridge_mask_is_zero_on_flat_frames() {
        let frame = Frame::blank(FrameFormat::GRAY8, 12, 12, 100.0);
        let mask = EdgeDetector::new(EdgeOperator::Roberts)
            .ridge_mask(&frame, &MaskParams::default())
            .unwrap();
        assert!(mask.plane(0).data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn non_ridge_operators_are_rejected() {
        let frame = line_frame(9, 9);
        let err = EdgeDetector::new(EdgeOperator::Kirsch)
            .ridge_mask(&frame, &MaskParams::default());
        assert!(err.is_err());
    }
}
