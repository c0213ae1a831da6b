//! Edge-mask generation.
//!
//! An [`EdgeDetector`] wraps an operator from the catalog and produces
//! mask frames: convolve once per kernel, merge the responses, then apply
//! the multiplier/threshold parameters. Operators that declare float
//! precision are promoted to 32-bit float around the computation and
//! demoted back to the source depth (full range).

pub mod ops;
pub mod ridge;
pub mod sg;

pub use ops::{EdgeOperator, MergeStrategy, OperatorSpec, Precision};
pub use sg::{SgDerivative, SgOperator};

use maskwork_common::{MaskworkError, MaskworkResult};
use maskwork_frame_model::{depth, Frame, Plane};
use serde::{Deserialize, Serialize};

use crate::morph::{expand_plane, inpand_plane, XxpandMode};

/// Post-merge mask shaping: multiply, then threshold.
///
/// Samples above `high_threshold` are pushed to the format peak, samples
/// at or below `low_threshold` are zeroed, everything else passes
/// through. A `high_threshold` of `None` means the format peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskParams {
    pub low_threshold: f32,
    pub high_threshold: Option<f32>,
    pub multiplier: f32,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            low_threshold: 0.0,
            high_threshold: None,
            multiplier: 1.0,
        }
    }
}

impl MaskParams {
    pub fn with_thresholds(low: f32, high: Option<f32>) -> Self {
        Self {
            low_threshold: low,
            high_threshold: high,
            multiplier: 1.0,
        }
    }
}

/// Edge-mask engine for a single operator.
pub struct EdgeDetector {
    operator: EdgeOperator,
}

impl EdgeDetector {
    pub fn new(operator: EdgeOperator) -> Self {
        Self { operator }
    }

    pub fn operator(&self) -> &EdgeOperator {
        &self.operator
    }

    /// Compute an edge mask for the frame.
    pub fn edge_mask(&self, frame: &Frame, params: &MaskParams) -> MaskworkResult<Frame> {
        let mask = match (self.operator, self.operator.spec()) {
            (EdgeOperator::MinMax { rady, radc }, _) => minmax_mask(frame, rady, radc)?,
            (_, Some(spec)) => matrix_mask(frame, &spec)?,
            (op, None) => {
                return Err(MaskworkError::unsupported(format!(
                    "operator {} has no kernel specification",
                    op.name()
                )));
            }
        };
        Ok(apply_mask_params(&mask, params))
    }

    /// Compute a ridge mask. Only defined for the two-kernel derivative
    /// operators (see [`EdgeOperator::is_ridge_capable`]).
    pub fn ridge_mask(&self, frame: &Frame, params: &MaskParams) -> MaskworkResult<Frame> {
        ridge::ridge_mask(self.operator, frame, params)
    }
}

/// Run every catalog operator over the frame, yielding `(name, mask)`
/// pairs sorted by operator name.
pub fn all_edge_masks(
    frame: &Frame,
    params: &MaskParams,
) -> MaskworkResult<Vec<(String, Frame)>> {
    EdgeOperator::all()
        .into_iter()
        .map(|op| {
            tracing::debug!(operator = %op, "computing edge mask");
            EdgeDetector::new(op)
                .edge_mask(frame, params)
                .map(|mask| (op.name(), mask))
        })
        .collect()
}

/// Convolution + merge for matrix operators.
fn matrix_mask(frame: &Frame, spec: &OperatorSpec) -> MaskworkResult<Frame> {
    let src_format = *frame.format();
    let promote = spec.precision == Precision::Float && !src_format.is_float();
    let work = if promote {
        depth::to_float(frame)?
    } else {
        frame.clone()
    };

    let responses = spec
        .kernels
        .iter()
        .map(|kernel| crate::convolution::convolve_frame(&work, kernel, false))
        .collect::<MaskworkResult<Vec<_>>>()?;

    let merged = merge_responses(&responses, spec.merge)?;
    if promote {
        depth::to_depth(&merged, src_format.bits_per_sample)
    } else {
        Ok(merged)
    }
}

fn merge_responses(responses: &[Frame], strategy: MergeStrategy) -> MaskworkResult<Frame> {
    let first = responses
        .first()
        .ok_or_else(|| MaskworkError::processing("operator produced no responses"))?;
    if responses.len() == 1 || strategy == MergeStrategy::Single {
        return Ok(first.clone());
    }

    let format = *first.format();
    let peak = format.peak_value();
    let quantize = move |v: f32| format.quantize(v);

    first.try_map_planes_indexed(|plane_idx, _| {
        let planes: Vec<&Plane> = responses.iter().map(|f| f.plane(plane_idx)).collect();
        let len = planes[0].data().len();
        let mut out = Plane::new(planes[0].width(), planes[0].height());
        let data = out.data_mut();

        match strategy {
            MergeStrategy::Single => unreachable!("handled above"),
            MergeStrategy::EuclideanDistance => {
                for i in 0..len {
                    let sum: f32 = planes.iter().map(|p| p.data()[i] * p.data()[i]).sum();
                    data[i] = quantize(sum.sqrt());
                }
            }
            MergeStrategy::Max => {
                for i in 0..len {
                    let max = planes
                        .iter()
                        .map(|p| p.data()[i])
                        .fold(f32::NEG_INFINITY, f32::max);
                    data[i] = quantize(max);
                }
            }
            MergeStrategy::FreiChenBasis => {
                if planes.len() != 9 {
                    return Err(MaskworkError::processing(
                        "basis merge requires nine responses",
                    ));
                }
                for i in 0..len {
                    let sq = |k: usize| planes[k].data()[i] * planes[k].data()[i];
                    let edge_subspace: f32 = (0..4).map(sq).sum();
                    let total: f32 = (0..9).map(sq).sum();
                    let v = if total > 0.0 {
                        (edge_subspace / total).sqrt() * peak
                    } else {
                        0.0
                    };
                    data[i] = quantize(v);
                }
            }
            MergeStrategy::Difference => {
                if planes.len() != 2 {
                    return Err(MaskworkError::processing(
                        "difference merge requires two responses",
                    ));
                }
                for i in 0..len {
                    data[i] = quantize(planes[0].data()[i] - planes[1].data()[i]);
                }
            }
        }
        Ok(out)
    })
}

/// Per-plane expand-minus-inpand with an ellipse shape; chroma planes use
/// their own radius. A zero radius produces a zero plane.
fn minmax_mask(frame: &Frame, rady: usize, radc: usize) -> MaskworkResult<Frame> {
    let format = *frame.format();
    let radii = [rady, radc, radc];
    frame.try_map_planes_indexed(|plane_idx, plane| {
        let rad = radii[plane_idx.min(2)];
        let grown = expand_plane(plane, rad, rad, XxpandMode::Ellipse);
        let shrunk = inpand_plane(plane, rad, rad, XxpandMode::Ellipse);
        grown.zip_map(&shrunk, |a, b| format.quantize(a - b))
    })
}

/// Apply multiplier and thresholds at the frame's own depth.
pub(crate) fn apply_mask_params(frame: &Frame, params: &MaskParams) -> Frame {
    let format = *frame.format();
    let peak = format.peak_value();
    let mut out = frame.clone();

    if params.multiplier != 1.0 {
        let multi = params.multiplier;
        out = if format.is_float() {
            out.map_planes(|p| p.map(|v| v * multi))
        } else {
            out.map_planes(|p| p.map(|v| (v * multi).round().clamp(0.0, peak)))
        };
    }

    let lthr = params.low_threshold;
    let hthr = params.high_threshold.unwrap_or(peak);
    if lthr > 0.0 || hthr < peak {
        out = out.map_planes(|p| {
            p.map(|v| {
                if v > hthr {
                    peak
                } else if v <= lthr {
                    0.0
                } else {
                    v
                }
            })
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maskwork_frame_model::FrameFormat;

    /// Left half dark, right half bright: one vertical edge at x = w/2.
    fn step_frame(width: usize, height: usize) -> Frame {
        let mut frame = Frame::blank(FrameFormat::GRAY8, width, height, 0.0);
        for y in 0..height {
            for x in width / 2..width {
                frame.plane_mut(0).set(x, y, 255.0);
            }
        }
        frame
    }

    #[test]
    fn sobel_fires_on_the_edge_only() {
        let frame = step_frame(16, 8);
        let detector = EdgeDetector::new(EdgeOperator::Sobel);
        let mask = detector.edge_mask(&frame, &MaskParams::default()).unwrap();

        // Columns adjacent to the step respond, interior stays dark.
        assert!(mask.plane(0).get(7, 4) > 0.0);
        assert!(mask.plane(0).get(8, 4) > 0.0);
        assert_eq!(mask.plane(0).get(2, 4), 0.0);
        assert_eq!(mask.plane(0).get(13, 4), 0.0);
    }

    #[test]
    fn flat_frames_produce_empty_masks() {
        let frame = Frame::blank(FrameFormat::GRAY8, 8, 8, 128.0);
        for op in [
            EdgeOperator::Sobel,
            EdgeOperator::Kirsch,
            EdgeOperator::Laplacian1,
            EdgeOperator::TEdge,
            EdgeOperator::MinMax { rady: 2, radc: 0 },
        ] {
            let mask = EdgeDetector::new(op)
                .edge_mask(&frame, &MaskParams::default())
                .unwrap();
            assert!(
                mask.plane(0).data().iter().all(|&v| v == 0.0),
                "{} responded to a flat frame",
                op.name()
            );
        }
    }

    #[test]
    fn thresholds_binarize_the_tails() {
        let frame = step_frame(16, 8);
        let detector = EdgeDetector::new(EdgeOperator::Sobel);

        let params = MaskParams::with_thresholds(50.0, Some(200.0));
        let mask = detector.edge_mask(&frame, &params).unwrap();
        for &v in mask.plane(0).data() {
            assert!(v == 0.0 || v == 255.0 || (v > 50.0 && v <= 200.0));
        }
    }

    #[test]
    fn multiplier_scales_before_thresholding() {
        // Low-contrast step so responses stay well below the peak.
        let mut frame = Frame::blank(FrameFormat::GRAY8, 16, 8, 0.0);
        for y in 0..8 {
            for x in 8..16 {
                frame.plane_mut(0).set(x, y, 30.0);
            }
        }
        let detector = EdgeDetector::new(EdgeOperator::Prewitt);

        let plain = detector.edge_mask(&frame, &MaskParams::default()).unwrap();
        let doubled = detector
            .edge_mask(
                &frame,
                &MaskParams {
                    multiplier: 2.0,
                    ..MaskParams::default()
                },
            )
            .unwrap();

        let before = plain.plane(0).get(7, 4);
        let after = doubled.plane(0).get(7, 4);
        assert!(before > 0.0 && before < 255.0);
        assert_eq!(after, (before * 2.0).min(255.0));
    }

    #[test]
    fn default_params_change_nothing() {
        let frame = step_frame(16, 8);
        let mask = matrix_mask(&frame, &EdgeOperator::Sobel.spec().unwrap()).unwrap();
        assert_eq!(apply_mask_params(&mask, &MaskParams::default()), mask);
    }

    #[test]
    fn float_precision_operators_return_source_depth() {
        let frame = step_frame(16, 8);
        for op in [EdgeOperator::FreyChen, EdgeOperator::Dog, EdgeOperator::Farid] {
            let mask = EdgeDetector::new(op)
                .edge_mask(&frame, &MaskParams::default())
                .unwrap();
            assert_eq!(mask.format(), frame.format(), "{}", op.name());
        }
    }

    #[test]
    fn minmax_zeroes_planes_with_zero_radius() {
        let mut frame = Frame::blank(FrameFormat::YUV420P8, 8, 8, 0.0);
        for plane in 0..3 {
            frame.plane_mut(plane).set(2, 2, 200.0);
        }
        let mask = EdgeDetector::new(EdgeOperator::MinMax { rady: 2, radc: 0 })
            .edge_mask(&frame, &MaskParams::default())
            .unwrap();
        assert!(mask.plane(0).data().iter().any(|&v| v > 0.0));
        assert!(mask.plane(1).data().iter().all(|&v| v == 0.0));
        assert!(mask.plane(2).data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn whole_catalog_runs_on_a_small_frame() {
        let frame = step_frame(12, 12);
        let masks = all_edge_masks(&frame, &MaskParams::default()).unwrap();
        assert_eq!(masks.len(), EdgeOperator::all().len());
        for (name, mask) in &masks {
            assert_eq!(mask.width(), 12, "{name}");
            assert_eq!(mask.format(), frame.format(), "{name}");
        }
    }
}
