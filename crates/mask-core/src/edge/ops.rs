//! The edge-operator catalog.
//!
//! Every operator is pure data: one or more convolution kernels plus a
//! merge strategy. Operators that need sub-integer intermediates declare
//! float precision and are promoted/demoted around the computation.

use std::fmt;
use std::str::FromStr;

use maskwork_common::MaskworkError;

use crate::convolution::ConvKernel;
use crate::edge::sg::SgOperator;

/// How per-kernel responses combine into one mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Single kernel, response used as-is.
    Single,
    /// `sqrt(sum(response^2))` over all kernels.
    EuclideanDistance,
    /// Pointwise maximum over all kernels (compass operators).
    Max,
    /// Frei-Chen basis projection: `sqrt(M / S)` where `M` sums the four
    /// edge-subspace squares and `S` sums all nine.
    FreiChenBasis,
    /// First response minus the second, for difference-of-gaussians.
    Difference,
}

/// Internal computation precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Compute at the source depth.
    Source,
    /// Promote to 32-bit float, demote afterwards.
    Float,
}

/// Kernels + merge rule for a matrix operator.
#[derive(Debug, Clone)]
pub struct OperatorSpec {
    pub kernels: Vec<ConvKernel>,
    pub merge: MergeStrategy,
    pub precision: Precision,
}

/// A named edge-detection operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeOperator {
    /// TEdgeMask type-2 derivative operator, horizontal/vertical 5-tap pair.
    TEdge,
    /// Savitzky-Golay least-squares derivative operator.
    SavitzkyGolay(SgOperator),
    /// Lawrence Roberts operator. 2x2 matrices computed in 3x3 frames.
    Roberts,
    /// Pierre-Simon de Laplace operator 1st implementation.
    Laplacian1,
    /// Pierre-Simon de Laplace operator 2nd implementation.
    Laplacian2,
    /// Pierre-Simon de Laplace operator 3rd implementation.
    Laplacian3,
    /// Pierre-Simon de Laplace operator 4th implementation.
    Laplacian4,
    /// Kayyali operator.
    Kayyali,
    /// Plain orthogonal first-order derivative, as in the original TCanny.
    Tritical,
    /// "HotDoG" diagonal first-order derivative from AVS ExTools.
    Cross,
    /// Judith M. S. Prewitt operator.
    Prewitt,
    /// Sobel-Feldman operator.
    Sobel,
    /// H. Scharr optimised operator with coefficients 3 and 10.
    Scharr,
    /// Refined H. Scharr operator with coefficients 47 and 162.
    RScharr,
    /// Dirk-Jan Kroon operator.
    Kroon,
    /// "Chen Frei" 3x3 pair from G41Fun.
    FreyChenG41,
    /// Frei-Chen operator over the full nine-matrix basis.
    FreyChen,
    /// Robinson compass operator level 3.
    Robinson3,
    /// Robinson compass operator level 5.
    Robinson5,
    /// TheToof compass operator from SharpAAMCmod.
    TheToof,
    /// Russell Kirsch compass operator.
    Kirsch,
    /// Extended Laplace operator, 1st implementation. 5x5.
    ExLaplacian1,
    /// Extended Laplace operator, 2nd implementation. 5x5.
    ExLaplacian2,
    /// Extended Laplace operator, 3rd implementation. 5x5.
    ExLaplacian3,
    /// Extended Laplace operator, 4th implementation. 5x5.
    ExLaplacian4,
    /// Laplacian of Gaussian. 5x5.
    Log,
    /// Extended Judith M. S. Prewitt operator. 5x5.
    ExPrewitt,
    /// Extended Sobel-Feldman operator. 5x5.
    ExSobel,
    /// Flow-based difference of gaussians. 5x5.
    Fdog,
    /// Zero-cross of a difference of gaussians. 5x5/3x3 pair.
    Dog,
    /// Farid & Simoncelli operator. 5x5.
    Farid,
    /// Extended Russell Kirsch compass operator. 5x5.
    ExKirsch,
    /// Morphological min/max mask with separate luma/chroma radii.
    MinMax { rady: usize, radc: usize },
}

impl EdgeOperator {
    /// Display name, matching the historical operator names.
    pub fn name(&self) -> String {
        match self {
            EdgeOperator::TEdge => "TEdge".into(),
            EdgeOperator::SavitzkyGolay(sg) => sg.name(),
            EdgeOperator::Roberts => "Roberts".into(),
            EdgeOperator::Laplacian1 => "Laplacian1".into(),
            EdgeOperator::Laplacian2 => "Laplacian2".into(),
            EdgeOperator::Laplacian3 => "Laplacian3".into(),
            EdgeOperator::Laplacian4 => "Laplacian4".into(),
            EdgeOperator::Kayyali => "Kayyali".into(),
            EdgeOperator::Tritical => "Tritical".into(),
            EdgeOperator::Cross => "Cross".into(),
            EdgeOperator::Prewitt => "Prewitt".into(),
            EdgeOperator::Sobel => "Sobel".into(),
            EdgeOperator::Scharr => "Scharr".into(),
            EdgeOperator::RScharr => "RScharr".into(),
            EdgeOperator::Kroon => "Kroon".into(),
            EdgeOperator::FreyChenG41 => "FreyChenG41".into(),
            EdgeOperator::FreyChen => "FreyChen".into(),
            EdgeOperator::Robinson3 => "Robinson3".into(),
            EdgeOperator::Robinson5 => "Robinson5".into(),
            EdgeOperator::TheToof => "TheToof".into(),
            EdgeOperator::Kirsch => "Kirsch".into(),
            EdgeOperator::ExLaplacian1 => "ExLaplacian1".into(),
            EdgeOperator::ExLaplacian2 => "ExLaplacian2".into(),
            EdgeOperator::ExLaplacian3 => "ExLaplacian3".into(),
            EdgeOperator::ExLaplacian4 => "ExLaplacian4".into(),
            EdgeOperator::Log => "LoG".into(),
            EdgeOperator::ExPrewitt => "ExPrewitt".into(),
            EdgeOperator::ExSobel => "ExSobel".into(),
            EdgeOperator::Fdog => "FDoG".into(),
            EdgeOperator::Dog => "DoG".into(),
            EdgeOperator::Farid => "Farid".into(),
            EdgeOperator::ExKirsch => "ExKirsch".into(),
            EdgeOperator::MinMax { .. } => "MinMax".into(),
        }
    }

    /// Kernel specification. `None` for the morphological `MinMax`
    /// operator, which is not matrix-based.
    pub fn spec(&self) -> Option<OperatorSpec> {
        use MergeStrategy::*;
        use Precision::*;

        let spec = match self {
            EdgeOperator::MinMax { .. } => return None,

            EdgeOperator::TEdge => OperatorSpec {
                kernels: vec![
                    ConvKernel::horizontal(vec![12.0, -74.0, 0.0, 74.0, -12.0], 62.0),
                    ConvKernel::vertical(vec![-12.0, 74.0, 0.0, -74.0, 12.0], 62.0),
                ],
                merge: EuclideanDistance,
                precision: Source,
            },

            EdgeOperator::SavitzkyGolay(sg) => {
                let (taps, divisor) = sg.taps();
                OperatorSpec {
                    kernels: vec![
                        ConvKernel::horizontal(taps.clone(), divisor),
                        ConvKernel::vertical(taps, divisor),
                    ],
                    merge: EuclideanDistance,
                    precision: Source,
                }
            }

            EdgeOperator::Roberts => euclidean(
                &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0],
                &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0],
                0.0,
            ),

            EdgeOperator::Laplacian1 => {
                single(&[0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0])
            }
            EdgeOperator::Laplacian2 => {
                single(&[1.0, -2.0, 1.0, -2.0, 4.0, -2.0, 1.0, -2.0, 1.0])
            }
            EdgeOperator::Laplacian3 => {
                single(&[2.0, -1.0, 2.0, -1.0, -4.0, -1.0, 2.0, -1.0, 2.0])
            }
            EdgeOperator::Laplacian4 => {
                single(&[-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0])
            }
            EdgeOperator::Kayyali => single(&[6.0, 0.0, -6.0, 0.0, 0.0, 0.0, -6.0, 0.0, 6.0]),

            EdgeOperator::Tritical => euclidean(
                &[0.0, 0.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0],
                &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0],
                0.0,
            ),
            EdgeOperator::Cross => euclidean(
                &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
                &[0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
                0.0,
            ),
            EdgeOperator::Prewitt => euclidean(
                &[1.0, 0.0, -1.0, 1.0, 0.0, -1.0, 1.0, 0.0, -1.0],
                &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0, -1.0, -1.0, -1.0],
                0.0,
            ),
            EdgeOperator::Sobel => euclidean(
                &[1.0, 0.0, -1.0, 2.0, 0.0, -2.0, 1.0, 0.0, -1.0],
                &[1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0],
                0.0,
            ),
            EdgeOperator::Scharr => euclidean(
                &[-3.0, 0.0, 3.0, -10.0, 0.0, 10.0, -3.0, 0.0, 3.0],
                &[-3.0, -10.0, -3.0, 0.0, 0.0, 0.0, 3.0, 10.0, 3.0],
                3.0,
            ),
            EdgeOperator::RScharr => euclidean(
                &[-47.0, 0.0, 47.0, -162.0, 0.0, 162.0, -47.0, 0.0, 47.0],
                &[-47.0, -162.0, -47.0, 0.0, 0.0, 0.0, 47.0, 162.0, 47.0],
                47.0,
            ),
            EdgeOperator::Kroon => euclidean(
                &[-17.0, 0.0, 17.0, -61.0, 0.0, 61.0, -17.0, 0.0, 17.0],
                &[-17.0, -61.0, -17.0, 0.0, 0.0, 0.0, 17.0, 61.0, 17.0],
                0.0,
            ),
            EdgeOperator::FreyChenG41 => euclidean(
                &[-7.0, 0.0, 7.0, -10.0, 0.0, 10.0, -7.0, 0.0, 7.0],
                &[-7.0, -10.0, -7.0, 0.0, 0.0, 0.0, 7.0, 10.0, 7.0],
                7.0,
            ),

            EdgeOperator::FreyChen => {
                let s = std::f32::consts::SQRT_2;
                let matrices: [([f32; 9], f32); 9] = [
                    ([1.0, s, 1.0, 0.0, 0.0, 0.0, -1.0, -s, -1.0], 2.0 * s),
                    ([1.0, 0.0, -1.0, s, 0.0, -s, 1.0, 0.0, -1.0], 2.0 * s),
                    ([0.0, -1.0, s, 1.0, 0.0, -1.0, -s, 1.0, 0.0], 2.0 * s),
                    ([s, -1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 1.0, -s], 2.0 * s),
                    ([0.0, 1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 1.0, 0.0], 2.0),
                    ([-1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0], 2.0),
                    ([1.0, -2.0, 1.0, -2.0, 4.0, -2.0, 1.0, -2.0, 1.0], 6.0),
                    ([-2.0, 1.0, -2.0, 1.0, 4.0, 1.0, -2.0, 1.0, -2.0], 6.0),
                    ([1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0], 3.0),
                ];
                OperatorSpec {
                    kernels: matrices
                        .iter()
                        .map(|(taps, div)| ConvKernel::square_div(taps.to_vec(), *div))
                        .collect(),
                    merge: FreiChenBasis,
                    precision: Float,
                }
            }

            EdgeOperator::Robinson3 => compass(&[
                &[1.0, 1.0, 1.0, 0.0, 0.0, 0.0, -1.0, -1.0, -1.0],
                &[1.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, -1.0, -1.0],
                &[1.0, 0.0, -1.0, 1.0, 0.0, -1.0, 1.0, 0.0, -1.0],
                &[0.0, -1.0, -1.0, 1.0, 0.0, -1.0, 1.0, 1.0, 0.0],
            ]),
            EdgeOperator::Robinson5 => compass(&[
                &[1.0, 2.0, 1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0],
                &[2.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, -1.0, -2.0],
                &[1.0, 0.0, -1.0, 2.0, 0.0, -2.0, 1.0, 0.0, -1.0],
                &[0.0, -1.0, -2.0, 1.0, 0.0, -1.0, 2.0, 1.0, 0.0],
            ]),
            EdgeOperator::TheToof => compass_div(
                &[
                    &[5.0, 10.0, 5.0, 0.0, 0.0, 0.0, -5.0, -10.0, -5.0],
                    &[10.0, 5.0, 0.0, 5.0, 0.0, -5.0, 0.0, -5.0, -10.0],
                    &[5.0, 0.0, -5.0, 10.0, 0.0, -10.0, 5.0, 0.0, -5.0],
                    &[0.0, -5.0, -10.0, 5.0, 0.0, -5.0, 10.0, 5.0, 0.0],
                ],
                4.0,
            ),
            EdgeOperator::Kirsch => compass(&[
                &[5.0, 5.0, 5.0, -3.0, 0.0, -3.0, -3.0, -3.0, -3.0],
                &[5.0, 5.0, -3.0, 5.0, 0.0, -3.0, -3.0, -3.0, -3.0],
                &[5.0, -3.0, -3.0, 5.0, 0.0, -3.0, 5.0, -3.0, -3.0],
                &[-3.0, -3.0, -3.0, 5.0, 0.0, -3.0, 5.0, 5.0, -3.0],
                &[-3.0, -3.0, -3.0, -3.0, 0.0, -3.0, 5.0, 5.0, 5.0],
                &[-3.0, -3.0, -3.0, -3.0, 0.0, 5.0, -3.0, 5.0, 5.0],
                &[-3.0, -3.0, 5.0, -3.0, 0.0, 5.0, -3.0, -3.0, 5.0],
                &[-3.0, 5.0, 5.0, -3.0, 0.0, 5.0, -3.0, -3.0, -3.0],
            ]),

            EdgeOperator::ExLaplacian1 => single(&[
                0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, -1.0, -1.0, 8.0, -1.0, -1.0,
                0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0,
            ]),
            EdgeOperator::ExLaplacian2 => single(&[
                0.0, 1.0, -1.0, 1.0, 0.0, 1.0, 1.0, -4.0, 1.0, 1.0, -1.0, -4.0, 8.0, -4.0, -1.0,
                1.0, 1.0, -4.0, 1.0, 1.0, 0.0, 1.0, -1.0, 1.0, 0.0,
            ]),
            EdgeOperator::ExLaplacian3 => single(&[
                -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 2.0, -4.0, 2.0, 1.0, -1.0, -4.0, 8.0, -4.0, -1.0,
                1.0, 2.0, -4.0, 2.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0,
            ]),
            EdgeOperator::ExLaplacian4 => single(&[
                -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 24.0,
                -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0,
            ]),
            EdgeOperator::Log => single(&[
                0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0, -2.0, -1.0, 0.0, -1.0, -2.0, 16.0, -2.0,
                -1.0, 0.0, -1.0, -2.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0,
            ]),

            EdgeOperator::ExPrewitt => euclidean(
                &[
                    2.0, 1.0, 0.0, -1.0, -2.0, 2.0, 1.0, 0.0, -1.0, -2.0, 2.0, 1.0, 0.0, -1.0,
                    -2.0, 2.0, 1.0, 0.0, -1.0, -2.0, 2.0, 1.0, 0.0, -1.0, -2.0,
                ],
                &[
                    2.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                    -1.0, -1.0, -1.0, -1.0, -1.0, -2.0, -2.0, -2.0, -2.0, -2.0,
                ],
                0.0,
            ),
            EdgeOperator::ExSobel => euclidean(
                &[
                    2.0, 1.0, 0.0, -1.0, -2.0, 2.0, 1.0, 0.0, -1.0, -2.0, 4.0, 2.0, 0.0, -2.0,
                    -4.0, 2.0, 1.0, 0.0, -1.0, -2.0, 2.0, 1.0, 0.0, -1.0, -2.0,
                ],
                &[
                    2.0, 2.0, 4.0, 2.0, 2.0, 1.0, 1.0, 2.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                    -1.0, -1.0, -2.0, -1.0, -1.0, -2.0, -2.0, -4.0, -2.0, -2.0,
                ],
                0.0,
            ),
            EdgeOperator::Fdog => euclidean(
                &[
                    1.0, 1.0, 0.0, -1.0, -1.0, 2.0, 2.0, 0.0, -2.0, -2.0, 3.0, 3.0, 0.0, -3.0,
                    -3.0, 2.0, 2.0, 0.0, -2.0, -2.0, 1.0, 1.0, 0.0, -1.0, -1.0,
                ],
                &[
                    1.0, 2.0, 3.0, 2.0, 1.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0,
                    -1.0, -2.0, -3.0, -2.0, -1.0, -1.0, -2.0, -3.0, -2.0, -1.0,
                ],
                2.0,
            ),

            EdgeOperator::Dog => OperatorSpec {
                kernels: vec![
                    ConvKernel::square_div(
                        vec![
                            0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0, 10.0, 5.0, 0.0, 5.0, 10.0, 20.0,
                            10.0, 5.0, 0.0, 5.0, 10.0, 5.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0,
                        ],
                        4.0,
                    ),
                    ConvKernel::square_div(
                        vec![0.0, 25.0, 0.0, 25.0, 50.0, 25.0, 0.0, 25.0, 0.0],
                        6.0,
                    ),
                ],
                merge: Difference,
                precision: Float,
            },

            EdgeOperator::Farid => OperatorSpec {
                kernels: vec![
                    ConvKernel::square(farid_matrix(true)),
                    ConvKernel::square(farid_matrix(false)),
                ],
                merge: EuclideanDistance,
                precision: Float,
            },

            EdgeOperator::ExKirsch => compass(&[
                &[
                    9.0, 9.0, 9.0, 9.0, 9.0, 9.0, 5.0, 5.0, 5.0, 9.0, -7.0, -3.0, 0.0, -3.0, -7.0,
                    -7.0, -3.0, -3.0, -3.0, -7.0, -7.0, -7.0, -7.0, -7.0, -7.0,
                ],
                &[
                    9.0, 9.0, 9.0, 9.0, -7.0, 9.0, 5.0, 5.0, -3.0, -7.0, 9.0, 5.0, 0.0, -3.0,
                    -7.0, 9.0, -3.0, -3.0, -3.0, -7.0, -7.0, -7.0, -7.0, -7.0, -7.0,
                ],
                &[
                    9.0, 9.0, -7.0, -7.0, -7.0, 9.0, 5.0, -3.0, -3.0, -7.0, 9.0, 5.0, 0.0, -3.0,
                    -7.0, 9.0, 5.0, -3.0, -3.0, -7.0, 9.0, 9.0, -7.0, -7.0, -7.0,
                ],
                &[
                    -7.0, -7.0, -7.0, -7.0, -7.0, 9.0, -3.0, -3.0, -3.0, -7.0, 9.0, 5.0, 0.0,
                    -3.0, -7.0, 9.0, 5.0, 5.0, -3.0, -7.0, 9.0, 9.0, 9.0, 9.0, -7.0,
                ],
                &[
                    -7.0, -7.0, -7.0, -7.0, -7.0, -7.0, -3.0, -3.0, -3.0, -7.0, -7.0, -3.0, 0.0,
                    -3.0, -7.0, 9.0, 5.0, 5.0, 5.0, 9.0, 9.0, 9.0, 9.0, 9.0, 9.0,
                ],
                &[
                    -7.0, -7.0, -7.0, -7.0, -7.0, -7.0, -3.0, -3.0, -3.0, 9.0, -7.0, -3.0, 0.0,
                    5.0, 9.0, -7.0, -3.0, 5.0, 5.0, 9.0, -7.0, 9.0, 9.0, 9.0, 9.0,
                ],
                &[
                    -7.0, -7.0, -7.0, 9.0, 9.0, -7.0, -3.0, -3.0, 5.0, 9.0, -7.0, -3.0, 0.0, 5.0,
                    9.0, -7.0, -3.0, -3.0, 5.0, 9.0, -7.0, -7.0, -7.0, 9.0, 9.0,
                ],
                &[
                    -7.0, 9.0, 9.0, 9.0, 9.0, -7.0, -3.0, 5.0, 5.0, 9.0, -7.0, -3.0, 0.0, 5.0,
                    9.0, -7.0, -3.0, -3.0, -3.0, 9.0, -7.0, -7.0, -7.0, -7.0, -7.0,
                ],
            ]),
        };
        Some(spec)
    }

    /// Whether [`ridge_mask`](crate::edge::EdgeDetector::ridge_mask) is
    /// defined for this operator.
    pub fn is_ridge_capable(&self) -> bool {
        matches!(
            self,
            EdgeOperator::Roberts
                | EdgeOperator::ExPrewitt
                | EdgeOperator::ExSobel
                | EdgeOperator::Fdog
                | EdgeOperator::Farid
        )
    }

    /// The full catalog, sorted by name. `MinMax` appears with its default
    /// radii; Savitzky-Golay appears once per supported window.
    pub fn all() -> Vec<EdgeOperator> {
        let mut ops = vec![
            EdgeOperator::TEdge,
            EdgeOperator::Roberts,
            EdgeOperator::Laplacian1,
            EdgeOperator::Laplacian2,
            EdgeOperator::Laplacian3,
            EdgeOperator::Laplacian4,
            EdgeOperator::Kayyali,
            EdgeOperator::Tritical,
            EdgeOperator::Cross,
            EdgeOperator::Prewitt,
            EdgeOperator::Sobel,
            EdgeOperator::Scharr,
            EdgeOperator::RScharr,
            EdgeOperator::Kroon,
            EdgeOperator::FreyChenG41,
            EdgeOperator::FreyChen,
            EdgeOperator::Robinson3,
            EdgeOperator::Robinson5,
            EdgeOperator::TheToof,
            EdgeOperator::Kirsch,
            EdgeOperator::ExLaplacian1,
            EdgeOperator::ExLaplacian2,
            EdgeOperator::ExLaplacian3,
            EdgeOperator::ExLaplacian4,
            EdgeOperator::Log,
            EdgeOperator::ExPrewitt,
            EdgeOperator::ExSobel,
            EdgeOperator::Fdog,
            EdgeOperator::Dog,
            EdgeOperator::Farid,
            EdgeOperator::ExKirsch,
            EdgeOperator::MinMax { rady: 2, radc: 0 },
        ];
        ops.extend(SgOperator::all().into_iter().map(EdgeOperator::SavitzkyGolay));
        ops.sort_by_key(|a| a.name());
        ops
    }
}

impl fmt::Display for EdgeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for EdgeOperator {
    type Err = MaskworkError;

    /// Case-insensitive name lookup, ignoring separators
    /// (`fdog`, `FDoG`, and `f-dog` all resolve).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        EdgeOperator::all()
            .into_iter()
            .find(|op| normalize(&op.name()) == wanted)
            .ok_or_else(|| MaskworkError::unsupported(format!("unknown edge operator '{s}'")))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn single(taps: &[f32]) -> OperatorSpec {
    OperatorSpec {
        kernels: vec![ConvKernel::square(taps.to_vec())],
        merge: MergeStrategy::Single,
        precision: Precision::Source,
    }
}

fn euclidean(a: &[f32], b: &[f32], divisor: f32) -> OperatorSpec {
    OperatorSpec {
        kernels: vec![
            ConvKernel::square_div(a.to_vec(), divisor),
            ConvKernel::square_div(b.to_vec(), divisor),
        ],
        merge: MergeStrategy::EuclideanDistance,
        precision: Precision::Source,
    }
}

fn compass(matrices: &[&[f32]]) -> OperatorSpec {
    compass_div(matrices, 0.0)
}

fn compass_div(matrices: &[&[f32]], divisor: f32) -> OperatorSpec {
    OperatorSpec {
        kernels: matrices
            .iter()
            .map(|taps| ConvKernel::square_div(taps.to_vec(), divisor))
            .collect(),
        merge: MergeStrategy::Max,
        precision: Precision::Source,
    }
}

/// Farid & Simoncelli 5x5 derivative matrix. The base coefficients form
/// the vertical derivative; `transpose = true` flips them to horizontal.
fn farid_matrix(transpose: bool) -> Vec<f32> {
    const BASE: [f32; 25] = [
        0.004127602875174862,
        0.027308149775363867,
        0.04673225765917656,
        0.027308149775363867,
        0.004127602875174862,
        0.010419993699470744,
        0.06893849946536831,
        0.11797400212587895,
        0.06893849946536831,
        0.010419993699470744,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        -0.010419993699470744,
        -0.06893849946536831,
        -0.11797400212587895,
        -0.06893849946536831,
        -0.010419993699470744,
        -0.004127602875174862,
        -0.027308149775363867,
        -0.04673225765917656,
        -0.027308149775363867,
        -0.004127602875174862,
    ];
    if !transpose {
        return BASE.to_vec();
    }
    let mut taps = vec![0.0f32; 25];
    for y in 0..5 {
        for x in 0..5 {
            taps[y * 5 + x] = BASE[x * 5 + y];
        }
    }
    taps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_and_complete() {
        let all = EdgeOperator::all();
        let names: Vec<String> = all.iter().map(|op| op.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        // 32 named operators + 53 Savitzky-Golay windows.
        assert_eq!(all.len(), 32 + 53);
    }

    #[test]
    fn from_str_is_case_and_separator_insensitive() {
        assert_eq!("sobel".parse::<EdgeOperator>().unwrap(), EdgeOperator::Sobel);
        assert_eq!("FDoG".parse::<EdgeOperator>().unwrap(), EdgeOperator::Fdog);
        assert_eq!("f-dog".parse::<EdgeOperator>().unwrap(), EdgeOperator::Fdog);
        assert_eq!(
            "minmax".parse::<EdgeOperator>().unwrap(),
            EdgeOperator::MinMax { rady: 2, radc: 0 }
        );
        assert!("sobbel".parse::<EdgeOperator>().is_err());
    }

    #[test]
    fn specs_have_consistent_kernel_counts() {
        assert_eq!(EdgeOperator::Sobel.spec().unwrap().kernels.len(), 2);
        assert_eq!(EdgeOperator::Kirsch.spec().unwrap().kernels.len(), 8);
        assert_eq!(EdgeOperator::FreyChen.spec().unwrap().kernels.len(), 9);
        assert!(EdgeOperator::MinMax { rady: 2, radc: 0 }.spec().is_none());
    }

    #[test]
    fn farid_matrices_are_transposes() {
        let v = farid_matrix(false);
        let h = farid_matrix(true);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(v[y * 5 + x], h[x * 5 + y]);
            }
        }
        // Middle row of the vertical derivative is zero.
        assert!(v[10..15].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn ridge_capability_marks_the_two_kernel_five_by_five_family() {
        assert!(EdgeOperator::Roberts.is_ridge_capable());
        assert!(EdgeOperator::ExSobel.is_ridge_capable());
        assert!(EdgeOperator::Farid.is_ridge_capable());
        assert!(!EdgeOperator::Kirsch.is_ridge_capable());
        assert!(!EdgeOperator::Laplacian1.is_ridge_capable());
    }
}
