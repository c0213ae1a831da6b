//! Morphological expand/inpand over one frame.

use std::path::PathBuf;

use anyhow::bail;
use maskwork_frame_model::pgm;
use maskwork_mask_core::morph::{self, XxpandMode};

pub fn run(
    input: PathBuf,
    output: PathBuf,
    expand: bool,
    sw: usize,
    sh: usize,
    shape: String,
) -> anyhow::Result<()> {
    let mode = match shape.to_ascii_lowercase().as_str() {
        "square" => XxpandMode::Square,
        "ellipse" => XxpandMode::Ellipse,
        "losange" | "diamond" => XxpandMode::Losange,
        other => bail!("unknown shape '{other}' (expected square, ellipse, or losange)"),
    };

    let frame = pgm::read_pgm(&input)?;
    let result = if expand {
        morph::expand(&frame, sw, sh, mode)
    } else {
        morph::inpand(&frame, sw, sh, mode)
    };

    pgm::write_pgm(&result, &output)?;
    println!(
        "{} by {}x{} ({:?}) -> {}",
        if expand { "Expanded" } else { "Inpanded" },
        sw,
        sh,
        mode,
        output.display()
    );
    Ok(())
}
