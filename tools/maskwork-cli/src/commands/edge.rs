//! Compute an edge or ridge mask for one frame.

use std::path::PathBuf;

use maskwork_common::config::AppConfig;
use maskwork_frame_model::pgm;
use maskwork_mask_core::edge::{EdgeDetector, EdgeOperator, MaskParams};

#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    output: PathBuf,
    operator: Option<String>,
    low_threshold: Option<f32>,
    high_threshold: Option<f32>,
    multiplier: Option<f32>,
    ridge: bool,
) -> anyhow::Result<()> {
    let config = AppConfig::load();

    let operator_name = operator.unwrap_or(config.masks.operator);
    let operator: EdgeOperator = operator_name.parse()?;
    let params = MaskParams {
        low_threshold: low_threshold.unwrap_or(config.masks.low_threshold as f32),
        high_threshold: high_threshold.or(config.masks.high_threshold.map(|v| v as f32)),
        multiplier: multiplier.unwrap_or(config.masks.multiplier as f32),
    };

    let frame = pgm::read_pgm(&input)?;
    tracing::info!(
        operator = %operator,
        width = frame.width(),
        height = frame.height(),
        ridge,
        "computing mask"
    );

    let detector = EdgeDetector::new(operator);
    let mask = if ridge {
        detector.ridge_mask(&frame, &params)?
    } else {
        detector.edge_mask(&frame, &params)?
    };

    pgm::write_pgm(&mask, &output)?;
    println!("Wrote {} mask to {}", operator, output.display());
    Ok(())
}
