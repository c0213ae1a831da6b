//! Morphological expand/inpand.
//!
//! Each step is a 3x3 dilate or erode restricted to an 8-neighbor
//! inclusion mask (the center always participates). Multi-radius growth
//! iterates steps while consuming the horizontal/vertical radii, picking
//! the neighbor mask per iteration from the requested shape.

use maskwork_frame_model::{Frame, Plane};

/// Growth shape for iterated expand/inpand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XxpandMode {
    /// Grow in a square.
    #[default]
    Square,
    /// Grow in a quasi-ellipse: square steps with periodic diamond steps.
    Ellipse,
    /// Grow in a diamond.
    Losange,
}

/// Neighbor order: top-left, top, top-right, left, right,
/// bottom-left, bottom, bottom-right.
pub type Coordinates = [bool; 8];

pub const ALL_NEIGHBORS: Coordinates = [true; 8];
pub const DIAMOND: Coordinates = [false, true, false, true, true, false, true, false];
pub const HORIZONTAL_ONLY: Coordinates = [false, false, false, true, true, false, false, false];
pub const VERTICAL_ONLY: Coordinates = [false, true, false, false, false, false, true, false];

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// One dilate step: each sample becomes the maximum of itself and the
/// selected neighbors. Edges replicate.
pub fn maximum(plane: &Plane, coordinates: &Coordinates) -> Plane {
    morpho_step(plane, coordinates, f32::max)
}

/// One erode step: minimum of self and selected neighbors.
pub fn minimum(plane: &Plane, coordinates: &Coordinates) -> Plane {
    morpho_step(plane, coordinates, f32::min)
}

fn morpho_step(plane: &Plane, coordinates: &Coordinates, pick: fn(f32, f32) -> f32) -> Plane {
    let mut out = plane.clone();
    for y in 0..plane.height() {
        for x in 0..plane.width() {
            let mut v = plane.get(x, y);
            for (enabled, (dx, dy)) in coordinates.iter().zip(OFFSETS) {
                if *enabled {
                    v = pick(v, plane.get_clamped(x as isize + dx, y as isize + dy));
                }
            }
            out.set(x, y, v);
        }
    }
    out
}

/// Grow bright areas by `sw` x `sh` using the given shape.
pub fn expand_plane(plane: &Plane, sw: usize, sh: usize, mode: XxpandMode) -> Plane {
    morpho_transform(plane, sw, sh, mode, maximum)
}

/// Shrink bright areas by `sw` x `sh` using the given shape.
pub fn inpand_plane(plane: &Plane, sw: usize, sh: usize, mode: XxpandMode) -> Plane {
    morpho_transform(plane, sw, sh, mode, minimum)
}

/// Per-plane expand over a whole frame.
pub fn expand(frame: &Frame, sw: usize, sh: usize, mode: XxpandMode) -> Frame {
    frame.map_planes(|p| expand_plane(p, sw, sh, mode))
}

/// Per-plane inpand over a whole frame.
pub fn inpand(frame: &Frame, sw: usize, sh: usize, mode: XxpandMode) -> Frame {
    frame.map_planes(|p| inpand_plane(p, sw, sh, mode))
}

fn morpho_transform(
    plane: &Plane,
    sw: usize,
    sh: usize,
    mode: XxpandMode,
    step: fn(&Plane, &Coordinates) -> Plane,
) -> Plane {
    let mut out = plane.clone();
    let mut wi = sw;
    let mut hi = sh;
    while wi > 0 || hi > 0 {
        let coordinates = if wi > 0 && hi > 0 {
            if mode == XxpandMode::Losange || (mode == XxpandMode::Ellipse && wi % 3 != 1) {
                DIAMOND
            } else {
                ALL_NEIGHBORS
            }
        } else if wi > 0 {
            HORIZONTAL_ONLY
        } else {
            VERTICAL_ONLY
        };
        out = step(&out, &coordinates);
        wi = wi.saturating_sub(1);
        hi = hi.saturating_sub(1);
    }
    out
}
