//! Run the whole operator catalog over one frame.

use std::path::PathBuf;

use maskwork_frame_model::pgm;
use maskwork_mask_core::edge::MaskParams;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    low_threshold: f32,
    multiplier: f32,
) -> anyhow::Result<()> {
    let frame = pgm::read_pgm(&input)?;
    let params = MaskParams {
        low_threshold,
        high_threshold: None,
        multiplier,
    };

    std::fs::create_dir_all(&output)?;

    let masks = maskwork_mask_core::all_edge_masks(&frame, &params)?;
    let count = masks.len();
    for (name, mask) in masks {
        let path = output.join(format!("{}.pgm", name.to_ascii_lowercase()));
        pgm::write_pgm(&mask, &path)?;
        tracing::debug!(operator = %name, path = %path.display(), "wrote mask");
    }

    println!("Wrote {count} masks to {}", output.display());
    Ok(())
}
