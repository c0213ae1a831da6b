//! Show frame information.

use std::path::PathBuf;

use maskwork_frame_model::pgm;

pub fn run(input: PathBuf, json: bool) -> anyhow::Result<()> {
    let frame = pgm::read_pgm(&input)?;
    let format = frame.format();
    let (min, max) = frame.plane(0).min_max();

    if json {
        let report = serde_json::json!({
            "path": input.display().to_string(),
            "width": frame.width(),
            "height": frame.height(),
            "bits_per_sample": format.bits_per_sample,
            "sample_type": format.sample_type,
            "color_family": format.color_family,
            "peak_value": format.peak_value(),
            "min_sample": min,
            "max_sample": max,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Frame: {}", input.display());
    println!("  Resolution: {}x{}", frame.width(), frame.height());
    println!(
        "  Format: {:?} {}-bit {:?}",
        format.color_family, format.bits_per_sample, format.sample_type
    );
    println!("  Peak value: {}", format.peak_value());
    println!("  Sample range: {min}..{max}");
    Ok(())
}
