//! Frame sequences.
//!
//! A clip is an ordered run of frames sharing one format and dimension.
//! Only the splicing operations the mask tools need are provided; this is
//! not a timeline model.

use maskwork_common::{MaskworkError, MaskworkResult};

use crate::frame::Frame;

/// An ordered sequence of frames with a uniform format.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    frames: Vec<Frame>,
}

impl Clip {
    /// Build a clip, checking that all frames agree on format and size.
    pub fn new(frames: Vec<Frame>) -> MaskworkResult<Self> {
        if let Some(first) = frames.first() {
            for (i, frame) in frames.iter().enumerate().skip(1) {
                if frame.format() != first.format()
                    || frame.width() != first.width()
                    || frame.height() != first.height()
                {
                    return Err(MaskworkError::format(format!(
                        "clip frame {i} does not match the first frame's format"
                    )));
                }
            }
        }
        Ok(Self { frames })
    }

    /// A clip repeating one frame `count` times.
    pub fn repeated(frame: Frame, count: usize) -> Self {
        Self {
            frames: vec![frame; count],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Cycle frames until the clip is `count` long.
    pub fn loop_to(&self, count: usize) -> MaskworkResult<Clip> {
        if self.frames.is_empty() {
            return Err(MaskworkError::format("cannot loop an empty clip"));
        }
        let frames = (0..count)
            .map(|i| self.frames[i % self.frames.len()].clone())
            .collect();
        Ok(Clip { frames })
    }

    /// Overlay `other` starting at frame `at`, replacing existing frames.
    /// The splice must fit inside this clip.
    pub fn insert(&self, other: &Clip, at: usize) -> MaskworkResult<Clip> {
        if at + other.len() > self.len() {
            return Err(MaskworkError::format(format!(
                "insert of {} frames at {} exceeds clip length {}",
                other.len(),
                at,
                self.len()
            )));
        }
        self.check_compatible(other)?;
        let mut frames = self.frames.clone();
        frames[at..at + other.len()].clone_from_slice(&other.frames);
        Clip::new(frames)
    }

    /// Take frames from `other` on the given inclusive ranges, from `self`
    /// elsewhere. Both clips must have equal length and format.
    pub fn replace_ranges(
        &self,
        other: &Clip,
        ranges: &[(usize, usize)],
    ) -> MaskworkResult<Clip> {
        if self.len() != other.len() {
            return Err(MaskworkError::format(format!(
                "replace_ranges: clip lengths differ ({} vs {})",
                self.len(),
                other.len()
            )));
        }
        self.check_compatible(other)?;
        for &(start, end) in ranges {
            if start > end || end >= self.len() {
                return Err(MaskworkError::format(format!(
                    "replace_ranges: range {start}..={end} out of bounds for length {}",
                    self.len()
                )));
            }
        }

        let mut frames = self.frames.clone();
        for &(start, end) in ranges {
            frames[start..=end].clone_from_slice(&other.frames[start..=end]);
        }
        Clip::new(frames)
    }

    fn check_compatible(&self, other: &Clip) -> MaskworkResult<()> {
        match (self.frames.first(), other.frames.first()) {
            (Some(a), Some(b))
                if a.format() != b.format()
                    || a.width() != b.width()
                    || a.height() != b.height() =>
            {
                Err(MaskworkError::format("clips have mismatched formats"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FrameFormat;

    fn gray_clip(values: &[f32]) -> Clip {
        Clip::new(
            values
                .iter()
                .map(|&v| Frame::blank(FrameFormat::GRAY8, 2, 2, v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_mixed_formats() {
        let frames = vec![
            Frame::blank(FrameFormat::GRAY8, 2, 2, 0.0),
            Frame::blank(FrameFormat::GRAY16, 2, 2, 0.0),
        ];
        assert!(Clip::new(frames).is_err());
    }

    #[test]
    fn loop_to_cycles_frames() {
        let clip = gray_clip(&[1.0, 2.0]);
        let looped = clip.loop_to(5).unwrap();
        assert_eq!(looped.len(), 5);
        assert_eq!(looped.frame(4).unwrap().plane(0).get(0, 0), 1.0);
    }

    #[test]
    fn replace_ranges_is_inclusive() {
        let a = gray_clip(&[0.0; 6]);
        let b = gray_clip(&[9.0; 6]);
        let spliced = a.replace_ranges(&b, &[(1, 2), (5, 5)]).unwrap();
        let values: Vec<f32> = spliced
            .frames()
            .iter()
            .map(|f| f.plane(0).get(0, 0))
            .collect();
        assert_eq!(values, vec![0.0, 9.0, 9.0, 0.0, 0.0, 9.0]);
    }

    #[test]
    fn replace_ranges_validates_bounds() {
        let a = gray_clip(&[0.0; 4]);
        let b = gray_clip(&[9.0; 4]);
        assert!(a.replace_ranges(&b, &[(2, 1)]).is_err());
        assert!(a.replace_ranges(&b, &[(0, 4)]).is_err());
    }

    #[test]
    fn insert_must_fit() {
        let a = gray_clip(&[0.0; 4]);
        let b = gray_clip(&[9.0; 2]);
        let spliced = a.insert(&b, 1).unwrap();
        assert_eq!(spliced.frame(1).unwrap().plane(0).get(0, 0), 9.0);
        assert_eq!(spliced.frame(3).unwrap().plane(0).get(0, 0), 0.0);
        assert!(a.insert(&b, 3).is_err());
    }
}
