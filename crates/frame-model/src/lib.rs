//! Maskwork Frame Model
//!
//! Defines the core data contracts for Maskwork:
//! - **Formats:** Sample type, bit depth, color family, chroma subsampling
//! - **Planes and frames:** Planar sample storage with split/join
//! - **Clips:** Frame sequences with range splicing
//! - **Regions:** Pixel-space rectangles for region masking
//! - **PGM:** Grayscale frame I/O for the command-line tools
//!
//! Samples are stored as `f32` regardless of the declared format. Integer
//! formats quantize (round + clamp to `[0, peak]`) at operation boundaries,
//! so a `Gray8` plane holds values in `[0.0, 255.0]` and a float plane
//! holds values in `[0.0, 1.0]`.

pub mod clip;
pub mod depth;
pub mod format;
pub mod frame;
pub mod pgm;
pub mod plane;
pub mod region;

pub use clip::*;
pub use depth::*;
pub use format::*;
pub use frame::*;
pub use plane::*;
pub use region::*;
