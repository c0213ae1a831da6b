//! Maskwork CLI — Command-line interface for mask generation.
//!
//! Usage:
//!   maskwork operators             List the edge-operator catalog
//!   maskwork edge <PATH>           Compute an edge or ridge mask
//!   maskwork morph <PATH>          Expand or inpand a mask
//!   maskwork square <PATH>         Generate a square mask sized from a frame
//!   maskwork sweep <PATH>          Write one mask per catalog operator
//!   maskwork info <PATH>           Show frame information

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "maskwork",
    about = "Mask manipulation for video filtering",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the edge-operator catalog
    Operators {
        /// Only operators supporting ridge masks
        #[arg(long)]
        ridge: bool,
    },

    /// Compute an edge (or ridge) mask from a PGM frame
    Edge {
        /// Input frame (binary PGM)
        input: PathBuf,

        /// Output mask path
        #[arg(short, long)]
        output: PathBuf,

        /// Edge operator name (see `maskwork operators`); defaults to the
        /// configured operator
        #[arg(long)]
        operator: Option<String>,

        /// Low threshold: anything at or below is zeroed
        #[arg(long)]
        low_threshold: Option<f32>,

        /// High threshold: anything above is pushed to the range peak
        #[arg(long)]
        high_threshold: Option<f32>,

        /// Multiplier applied before thresholding
        #[arg(long)]
        multiplier: Option<f32>,

        /// Compute a ridge mask instead of an edge mask
        #[arg(long)]
        ridge: bool,
    },

    /// Morphologically expand or inpand a mask frame
    Morph {
        /// Input frame (binary PGM)
        input: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// Shrink bright areas instead of growing them
        #[arg(long)]
        inpand: bool,

        /// Horizontal radius
        #[arg(long, default_value = "1")]
        sw: usize,

        /// Vertical radius
        #[arg(long, default_value = "1")]
        sh: usize,

        /// Growth shape: square|ellipse|losange
        #[arg(long, default_value = "square")]
        shape: String,
    },

    /// Generate a square mask sized from an input frame
    Square {
        /// Reference frame (binary PGM) for dimensions and depth
        input: PathBuf,

        /// Output path
        #[arg(short, long)]
        output: PathBuf,

        /// Rectangle left edge
        #[arg(long, default_value = "0")]
        x: usize,

        /// Rectangle top edge
        #[arg(long, default_value = "0")]
        y: usize,

        /// Rectangle width
        #[arg(long)]
        width: usize,

        /// Rectangle height
        #[arg(long)]
        height: usize,

        /// Peak outside the rectangle instead of inside
        #[arg(long)]
        invert: bool,
    },

    /// Run every catalog operator and write one mask per operator
    Sweep {
        /// Input frame (binary PGM)
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Low threshold applied to every mask
        #[arg(long, default_value = "0")]
        low_threshold: f32,

        /// Multiplier applied to every mask
        #[arg(long, default_value = "1")]
        multiplier: f32,
    },

    /// Show frame information
    Info {
        /// Input frame (binary PGM)
        input: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    maskwork_common::logging::init_logging(&maskwork_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Operators { ridge } => commands::operators::run(ridge),
        Commands::Edge {
            input,
            output,
            operator,
            low_threshold,
            high_threshold,
            multiplier,
            ridge,
        } => commands::edge::run(
            input,
            output,
            operator,
            low_threshold,
            high_threshold,
            multiplier,
            ridge,
        ),
        Commands::Morph {
            input,
            output,
            inpand,
            sw,
            sh,
            shape,
        } => commands::morph::run(input, output, !inpand, sw, sh, shape),
        Commands::Square {
            input,
            output,
            x,
            y,
            width,
            height,
            invert,
        } => commands::square::run(input, output, x, y, width, height, invert),
        Commands::Sweep {
            input,
            output,
            low_threshold,
            multiplier,
        } => commands::sweep::run(input, output, low_threshold, multiplier),
        Commands::Info { input, json } => commands::info::run(input, json),
    }
}
