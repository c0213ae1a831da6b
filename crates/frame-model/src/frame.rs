//! Planar frames: format + plane storage, with split/join.

use maskwork_common::{MaskworkError, MaskworkResult};

use crate::format::{ColorFamily, FrameFormat};
use crate::plane::Plane;

/// A single video frame: a format descriptor plus one plane per component.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    format: FrameFormat,
    width: usize,
    height: usize,
    planes: Vec<Plane>,
}

impl Frame {
    /// Frame with every plane filled with `color` (already in the format's
    /// sample range).
    pub fn blank(format: FrameFormat, width: usize, height: usize, color: f32) -> Self {
        let planes = (0..format.num_planes())
            .map(|i| {
                let (w, h) = format.plane_dimensions(i, width, height);
                Plane::filled(w, h, color)
            })
            .collect();
        Self {
            format,
            width,
            height,
            planes,
        }
    }

    /// Assemble a frame from existing planes. Plane count and dimensions
    /// must agree with the format.
    pub fn from_planes(
        format: FrameFormat,
        width: usize,
        height: usize,
        planes: Vec<Plane>,
    ) -> MaskworkResult<Self> {
        if planes.len() != format.num_planes() {
            return Err(MaskworkError::format(format!(
                "expected {} planes, got {}",
                format.num_planes(),
                planes.len()
            )));
        }
        for (i, plane) in planes.iter().enumerate() {
            let (w, h) = format.plane_dimensions(i, width, height);
            if plane.width() != w || plane.height() != h {
                return Err(MaskworkError::format(format!(
                    "plane {i} is {}x{}, format requires {w}x{h}",
                    plane.width(),
                    plane.height()
                )));
            }
        }
        Ok(Self {
            format,
            width,
            height,
            planes,
        })
    }

    pub fn format(&self) -> &FrameFormat {
        &self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    pub fn plane(&self, index: usize) -> &Plane {
        &self.planes[index]
    }

    pub fn plane_mut(&mut self, index: usize) -> &mut Plane {
        &mut self.planes[index]
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn into_planes(self) -> Vec<Plane> {
        self.planes
    }

    /// Split into single-plane gray frames of the same depth.
    pub fn split(&self) -> Vec<Frame> {
        let gray = self.format.with_color_family(ColorFamily::Gray);
        self.planes
            .iter()
            .map(|plane| Frame {
                format: gray,
                width: plane.width(),
                height: plane.height(),
                planes: vec![plane.clone()],
            })
            .collect()
    }

    /// Join gray frames back into a frame of the given family. One frame
    /// yields gray; three yield YUV/RGB, with chroma subsampling derived
    /// from the plane dimension ratios.
    pub fn join(parts: &[Frame], family: ColorFamily) -> MaskworkResult<Frame> {
        let first = parts
            .first()
            .ok_or_else(|| MaskworkError::format("join: no planes given"))?;

        if family == ColorFamily::Gray || parts.len() == 1 {
            return Ok(first.clone());
        }
        if parts.len() != 3 {
            return Err(MaskworkError::format(format!(
                "join: expected 3 planes for {:?}, got {}",
                family,
                parts.len()
            )));
        }

        let (lw, lh) = (first.width, first.height);
        let (cw, ch) = (parts[1].width, parts[1].height);
        if parts[2].width != cw || parts[2].height != ch {
            return Err(MaskworkError::format(
                "join: chroma planes have mismatched dimensions",
            ));
        }
        let ssw = subsampling_shift(lw, cw)
            .ok_or_else(|| MaskworkError::format("join: invalid horizontal subsampling ratio"))?;
        let ssh = subsampling_shift(lh, ch)
            .ok_or_else(|| MaskworkError::format("join: invalid vertical subsampling ratio"))?;
        if family == ColorFamily::Rgb && (ssw != 0 || ssh != 0) {
            return Err(MaskworkError::format("join: RGB cannot be subsampled"));
        }

        let format = FrameFormat::new(
            first.format.sample_type,
            first.format.bits_per_sample,
            family,
            ssw,
            ssh,
        )?;
        let planes = parts.iter().map(|f| f.planes[0].clone()).collect();
        Frame::from_planes(format, lw, lh, planes)
    }

    /// New frame with `f` applied to every plane.
    pub fn map_planes(&self, f: impl Fn(&Plane) -> Plane) -> Frame {
        Frame {
            format: self.format,
            width: self.width,
            height: self.height,
            planes: self.planes.iter().map(f).collect(),
        }
    }

    /// Fallible variant of [`map_planes`](Self::map_planes).
    pub fn try_map_planes(
        &self,
        f: impl Fn(&Plane) -> MaskworkResult<Plane>,
    ) -> MaskworkResult<Frame> {
        self.try_map_planes_indexed(|_, plane| f(plane))
    }

    /// Fallible plane map that also passes the plane index, for
    /// operations that treat luma and chroma differently.
    pub fn try_map_planes_indexed(
        &self,
        f: impl Fn(usize, &Plane) -> MaskworkResult<Plane>,
    ) -> MaskworkResult<Frame> {
        let planes = self
            .planes
            .iter()
            .enumerate()
            .map(|(i, plane)| f(i, plane))
            .collect::<MaskworkResult<Vec<_>>>()?;
        Frame::from_planes(self.format, self.width, self.height, planes)
    }

    /// Replace the format descriptor without touching samples. The caller
    /// is responsible for the samples already being in the new range.
    pub(crate) fn with_format(&self, format: FrameFormat) -> Frame {
        Frame {
            format,
            width: self.width,
            height: self.height,
            planes: self.planes.clone(),
        }
    }
}

/// log2 of luma/chroma dimension ratio, or None when not a power of two.
fn subsampling_shift(luma: usize, chroma: usize) -> Option<u8> {
    if chroma == 0 || luma % chroma != 0 {
        return None;
    }
    let ratio = luma / chroma;
    if !ratio.is_power_of_two() || ratio > 4 {
        return None;
    }
    Some(ratio.trailing_zeros() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_respects_subsampling() {
        let frame = Frame::blank(FrameFormat::YUV420P8, 16, 8, 0.0);
        assert_eq!(frame.plane(0).width(), 16);
        assert_eq!(frame.plane(1).width(), 8);
        assert_eq!(frame.plane(1).height(), 4);
    }

    #[test]
    fn from_planes_checks_dimensions() {
        let planes = vec![Plane::new(16, 8), Plane::new(16, 8), Plane::new(16, 8)];
        // Full-size chroma against a 4:2:0 format must fail.
        assert!(Frame::from_planes(FrameFormat::YUV420P8, 16, 8, planes).is_err());
    }

    #[test]
    fn split_then_join_roundtrips_yuv() {
        let frame = Frame::blank(FrameFormat::YUV420P8, 16, 8, 42.0);
        let parts = frame.split();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].format().color_family, ColorFamily::Gray);

        let joined = Frame::join(&parts, ColorFamily::Yuv).unwrap();
        assert_eq!(joined.format(), frame.format());
        assert_eq!(joined.plane(1).width(), 8);
    }

    #[test]
    fn join_single_plane_is_gray_passthrough() {
        let frame = Frame::blank(FrameFormat::GRAY8, 4, 4, 1.0);
        let joined = Frame::join(&frame.split(), ColorFamily::Gray).unwrap();
        assert_eq!(joined, frame);
    }
}
