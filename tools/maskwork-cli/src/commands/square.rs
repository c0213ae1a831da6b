//! Generate a square mask sized from a reference frame.

use std::path::PathBuf;

use maskwork_frame_model::{pgm, PixelRect};
use maskwork_mask_core::region::squaremask;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    invert: bool,
) -> anyhow::Result<()> {
    let reference = pgm::read_pgm(&input)?;
    let rect = PixelRect::new(x, y, width, height);
    let mask = squaremask(&reference, rect, invert)?;

    pgm::write_pgm(&mask, &output)?;
    println!(
        "Wrote {}x{} square mask at +{}+{} to {}",
        width,
        height,
        x,
        y,
        output.display()
    );
    Ok(())
}
