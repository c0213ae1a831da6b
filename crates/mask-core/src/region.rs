//! Region masks and masked merging.
//!
//! Square masks are gray, full-resolution frames at the reference depth:
//! peak inside the rectangle, zero outside (flipped when inverted).
//! Merging weighs frame `b` over frame `a` by `mask / peak` per plane,
//! with single-plane masks resampled onto subsampled chroma.

use maskwork_common::{MaskworkError, MaskworkResult};
use maskwork_frame_model::{depth, Clip, ColorFamily, Frame, PixelRect};

use crate::blur::{box_blur, gauss_blur};
use crate::resize::resize_plane_bilinear;

/// Optional softening of a generated mask before merging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskBlur {
    /// Box blur with the given radius, one pass.
    Box(usize),
    /// Gaussian blur with the given sigma.
    Gauss(f32),
}

/// A gray mask frame sized and typed like `reference`: peak inside
/// `rect`, zero outside. `invert` flips it.
pub fn squaremask(reference: &Frame, rect: PixelRect, invert: bool) -> MaskworkResult<Frame> {
    let (width, height) = (reference.width(), reference.height());
    if !rect.fits_within(width, height) {
        return Err(MaskworkError::region(format!(
            "mask rectangle {}x{}+{}+{} exceeds the {}x{} frame",
            rect.width, rect.height, rect.x, rect.y, width, height
        )));
    }

    let format = reference.format().with_color_family(ColorFamily::Gray);
    let peak = format.peak_value();
    let (inside, outside) = if invert { (0.0, peak) } else { (peak, 0.0) };

    let mut mask = Frame::blank(format, width, height, outside);
    let plane = mask.plane_mut(0);
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            plane.set(x, y, inside);
        }
    }
    Ok(mask)
}

/// Zero out a pixel border: `left`/`right`/`top`/`bottom` give the border
/// widths. Chroma planes scale the widths by their subsampling.
pub fn region_rel_mask(
    frame: &Frame,
    left: usize,
    right: usize,
    top: usize,
    bottom: usize,
) -> MaskworkResult<Frame> {
    if left + right >= frame.width() || top + bottom >= frame.height() {
        return Err(MaskworkError::region(format!(
            "borders {left}+{right}/{top}+{bottom} consume the whole {}x{} frame",
            frame.width(),
            frame.height()
        )));
    }
    let format = *frame.format();
    frame.try_map_planes_indexed(|plane_idx, plane| {
        let (ssw, ssh) = if plane_idx == 0 {
            (0, 0)
        } else {
            (format.subsampling_w, format.subsampling_h)
        };
        let (l, r) = (left >> ssw, right >> ssw);
        let (t, b) = (top >> ssh, bottom >> ssh);
        let mut out = plane.clone();
        for y in 0..plane.height() {
            for x in 0..plane.width() {
                if x < l || x >= plane.width() - r || y < t || y >= plane.height() - b {
                    out.set(x, y, 0.0);
                }
            }
        }
        Ok(out)
    })
}

/// Keep an absolute window, zeroing everything outside it.
pub fn region_abs_mask(frame: &Frame, rect: PixelRect) -> MaskworkResult<Frame> {
    if !rect.fits_within(frame.width(), frame.height()) {
        return Err(MaskworkError::region(format!(
            "window {}x{}+{}+{} exceeds the {}x{} frame",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            frame.width(),
            frame.height()
        )));
    }
    region_rel_mask(
        frame,
        rect.x,
        frame.width() - rect.right(),
        rect.y,
        frame.height() - rect.bottom(),
    )
}

/// Weigh `b` over `a` through `mask`: `a + (b - a) * mask / peak`.
///
/// `a` and `b` must share format and size. The mask may be gray (applied
/// to every plane, resampled onto subsampled chroma) or have one plane
/// per component; its depth is matched to `a` first.
pub fn masked_merge(a: &Frame, b: &Frame, mask: &Frame) -> MaskworkResult<Frame> {
    if a.format() != b.format() || a.width() != b.width() || a.height() != b.height() {
        return Err(MaskworkError::processing(
            "masked_merge: frames have mismatched formats",
        ));
    }
    if mask.num_planes() != 1 && mask.num_planes() != a.num_planes() {
        return Err(MaskworkError::processing(format!(
            "masked_merge: mask has {} planes, frame has {}",
            mask.num_planes(),
            a.num_planes()
        )));
    }

    let mask = depth::to_depth_of(mask, a)?;
    let format = *a.format();
    let inv_peak = 1.0 / format.peak_value();

    a.try_map_planes_indexed(|plane_idx, plane_a| {
        let plane_b = b.plane(plane_idx);
        let mask_plane = if mask.num_planes() == 1 {
            resize_plane_bilinear(mask.plane(0), plane_a.width(), plane_a.height())
        } else {
            mask.plane(plane_idx).clone()
        };
        let mut out = plane_a.clone();
        let data = out.data_mut();
        for i in 0..data.len() {
            let x = plane_a.data()[i];
            let y = plane_b.data()[i];
            let w = mask_plane.data()[i] * inv_peak;
            data[i] = format.quantize(x + (y - x) * w);
        }
        Ok(out)
    })
}

/// Merge `b` over `a` through a square mask on the given inclusive frame
/// ranges (`None` = every frame), optionally blurring the mask edge.
pub fn replace_squaremask(
    a: &Clip,
    b: &Clip,
    rect: PixelRect,
    ranges: Option<&[(usize, usize)]>,
    mask_blur: Option<MaskBlur>,
    invert: bool,
) -> MaskworkResult<Clip> {
    let first = b
        .frame(0)
        .ok_or_else(|| MaskworkError::region("replace_squaremask: empty clip"))?;
    if a.len() != b.len() {
        return Err(MaskworkError::region(format!(
            "replace_squaremask: clip lengths differ ({} vs {})",
            a.len(),
            b.len()
        )));
    }

    let mut mask = squaremask(first, rect, invert)?;
    mask = match mask_blur {
        Some(MaskBlur::Box(radius)) => box_blur(&mask, radius, 1)?,
        Some(MaskBlur::Gauss(sigma)) => gauss_blur(&mask, sigma)?,
        None => mask,
    };

    let merged: Vec<Frame> = a
        .frames()
        .iter()
        .zip(b.frames())
        .map(|(fa, fb)| masked_merge(fa, fb, &mask))
        .collect::<MaskworkResult<_>>()?;
    let merged = Clip::new(merged)?;

    match ranges {
        None => Ok(merged),
        Some(ranges) => a.replace_ranges(&merged, ranges),
    }
}

/// Splice one masked replacement frame across an inclusive frame range:
/// frame `source_frame` of `base` and `insert` are merged through a
/// square mask, and the result overwrites `range` in `base`.
pub fn freeze_replace_squaremask(
    base: &Clip,
    insert: &Clip,
    rect: PixelRect,
    source_frame: usize,
    range: (usize, usize),
) -> MaskworkResult<Clip> {
    let (start, end) = range;
    let base_frame = base.frame(source_frame).ok_or_else(|| {
        MaskworkError::region(format!("source frame {source_frame} out of bounds"))
    })?;
    let insert_frame = insert.frame(source_frame).ok_or_else(|| {
        MaskworkError::region(format!("insert frame {source_frame} out of bounds"))
    })?;
    if start > end || end >= base.len() {
        return Err(MaskworkError::region(format!(
            "freeze range {start}..={end} out of bounds for length {}",
            base.len()
        )));
    }

    let mask = squaremask(base_frame, rect, false)?;
    let frozen = masked_merge(base_frame, insert_frame, &mask)?;
    base.insert(&Clip::repeated(frozen, end - start + 1), start)
}

/// Pixel-wise maximum across every plane of every frame, all planes
/// bilinearly resampled to the first frame's full resolution. The result
/// is a gray frame at the first frame's depth.
pub fn max_planes(frames: &[Frame]) -> MaskworkResult<Frame> {
    let model = frames
        .first()
        .ok_or_else(|| MaskworkError::processing("max_planes: no frames given"))?;
    let (width, height) = (model.width(), model.height());
    let format = model.format().with_color_family(ColorFamily::Gray);

    let mut out = Frame::blank(format, width, height, 0.0);
    for frame in frames {
        let frame = depth::to_depth_of(frame, model)?;
        for plane in frame.planes() {
            let resized = resize_plane_bilinear(plane, width, height);
            let combined = out.plane(0).zip_map(&resized, f32::max)?;
            *out.plane_mut(0) = combined;
        }
    }
    Ok(out)
}
