//! List the edge-operator catalog.

use maskwork_mask_core::edge::{EdgeOperator, MergeStrategy};

pub fn run(ridge_only: bool) -> anyhow::Result<()> {
    let operators = EdgeOperator::all();

    println!("{} operators available:\n", operators.len());
    for op in operators {
        if ridge_only && !op.is_ridge_capable() {
            continue;
        }
        let detail = match op.spec() {
            Some(spec) => {
                let merge = match spec.merge {
                    MergeStrategy::Single => "single",
                    MergeStrategy::EuclideanDistance => "euclidean",
                    MergeStrategy::Max => "compass-max",
                    MergeStrategy::FreiChenBasis => "basis-norm",
                    MergeStrategy::Difference => "difference",
                };
                let ridge = if op.is_ridge_capable() { ", ridge" } else { "" };
                format!(
                    "{} kernel(s), {} taps, {merge}{ridge}",
                    spec.kernels.len(),
                    spec.kernels[0].taps.len()
                )
            }
            None => "morphological".to_string(),
        };
        println!("  {:<32} {}", op.name(), detail);
    }

    Ok(())
}
