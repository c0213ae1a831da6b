//! Frame format descriptors.
//!
//! A format fixes the sample type, bit depth, color family, and chroma
//! subsampling of a frame. Integer formats cover 8..=16 bits; the only
//! float format is 32-bit with samples normalized to `[0.0, 1.0]`.

use maskwork_common::{MaskworkError, MaskworkResult};
use serde::{Deserialize, Serialize};

/// Sample representation of a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleType {
    /// Full-range integer samples, 8..=16 bits.
    Integer,
    /// 32-bit float samples in `[0.0, 1.0]`.
    Float,
}

/// Color family of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFamily {
    Gray,
    Yuv,
    Rgb,
}

impl ColorFamily {
    /// Number of planes for this family.
    pub fn num_planes(&self) -> usize {
        match self {
            ColorFamily::Gray => 1,
            ColorFamily::Yuv | ColorFamily::Rgb => 3,
        }
    }
}

/// Complete format descriptor for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameFormat {
    pub sample_type: SampleType,

    /// Bits per sample: 8..=16 for integer, 32 for float.
    pub bits_per_sample: u8,

    pub color_family: ColorFamily,

    /// log2 horizontal chroma subsampling (0 = none, 1 = half width).
    pub subsampling_w: u8,

    /// log2 vertical chroma subsampling.
    pub subsampling_h: u8,
}

impl FrameFormat {
    /// 8-bit grayscale.
    pub const GRAY8: FrameFormat = FrameFormat {
        sample_type: SampleType::Integer,
        bits_per_sample: 8,
        color_family: ColorFamily::Gray,
        subsampling_w: 0,
        subsampling_h: 0,
    };

    /// 16-bit grayscale.
    pub const GRAY16: FrameFormat = FrameFormat {
        sample_type: SampleType::Integer,
        bits_per_sample: 16,
        color_family: ColorFamily::Gray,
        subsampling_w: 0,
        subsampling_h: 0,
    };

    /// 32-bit float grayscale.
    pub const GRAYS: FrameFormat = FrameFormat {
        sample_type: SampleType::Float,
        bits_per_sample: 32,
        color_family: ColorFamily::Gray,
        subsampling_w: 0,
        subsampling_h: 0,
    };

    /// 8-bit YUV 4:2:0.
    pub const YUV420P8: FrameFormat = FrameFormat {
        sample_type: SampleType::Integer,
        bits_per_sample: 8,
        color_family: ColorFamily::Yuv,
        subsampling_w: 1,
        subsampling_h: 1,
    };

    /// Validated constructor.
    pub fn new(
        sample_type: SampleType,
        bits_per_sample: u8,
        color_family: ColorFamily,
        subsampling_w: u8,
        subsampling_h: u8,
    ) -> MaskworkResult<Self> {
        match sample_type {
            SampleType::Integer if !(8..=16).contains(&bits_per_sample) => {
                return Err(MaskworkError::format(format!(
                    "integer formats must be 8..=16 bits, got {bits_per_sample}"
                )));
            }
            SampleType::Float if bits_per_sample != 32 => {
                return Err(MaskworkError::format(format!(
                    "float formats must be 32 bits, got {bits_per_sample}"
                )));
            }
            _ => {}
        }
        if color_family == ColorFamily::Gray && (subsampling_w != 0 || subsampling_h != 0) {
            return Err(MaskworkError::format("gray formats cannot be subsampled"));
        }
        if subsampling_w > 2 || subsampling_h > 2 {
            return Err(MaskworkError::format(format!(
                "subsampling {subsampling_w}x{subsampling_h} out of range"
            )));
        }
        Ok(Self {
            sample_type,
            bits_per_sample,
            color_family,
            subsampling_w,
            subsampling_h,
        })
    }

    /// Gray variant of this format at the given integer depth.
    pub fn gray(bits_per_sample: u8) -> MaskworkResult<Self> {
        Self::new(
            SampleType::Integer,
            bits_per_sample,
            ColorFamily::Gray,
            0,
            0,
        )
    }

    pub fn is_float(&self) -> bool {
        self.sample_type == SampleType::Float
    }

    /// Number of planes frames of this format carry.
    pub fn num_planes(&self) -> usize {
        self.color_family.num_planes()
    }

    /// Maximum representable sample value: `1.0` for float formats,
    /// `(1 << bits) - 1` for integer formats.
    pub fn peak_value(&self) -> f32 {
        match self.sample_type {
            SampleType::Float => 1.0,
            SampleType::Integer => ((1u32 << self.bits_per_sample) - 1) as f32,
        }
    }

    /// Quantize a sample for this format: round and clamp for integer
    /// formats, pass floats through clamped to `[0, 1]`.
    pub fn quantize(&self, value: f32) -> f32 {
        match self.sample_type {
            SampleType::Integer => value.round().clamp(0.0, self.peak_value()),
            SampleType::Float => value,
        }
    }

    /// Dimensions of the given plane for a frame of `width` x `height`.
    pub fn plane_dimensions(&self, plane: usize, width: usize, height: usize) -> (usize, usize) {
        if plane == 0 || self.color_family != ColorFamily::Yuv {
            (width, height)
        } else {
            (width >> self.subsampling_w, height >> self.subsampling_h)
        }
    }

    /// Same format with a different color family (subsampling reset for gray).
    pub fn with_color_family(&self, family: ColorFamily) -> Self {
        let (sw, sh) = if family == ColorFamily::Gray {
            (0, 0)
        } else {
            (self.subsampling_w, self.subsampling_h)
        };
        Self {
            color_family: family,
            subsampling_w: sw,
            subsampling_h: sh,
            ..*self
        }
    }

    /// Same format at a different depth.
    pub fn with_depth(&self, sample_type: SampleType, bits_per_sample: u8) -> MaskworkResult<Self> {
        Self::new(
            sample_type,
            bits_per_sample,
            self.color_family,
            self.subsampling_w,
            self.subsampling_h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_values_follow_depth() {
        assert_eq!(FrameFormat::GRAY8.peak_value(), 255.0);
        assert_eq!(FrameFormat::GRAY16.peak_value(), 65535.0);
        assert_eq!(FrameFormat::GRAYS.peak_value(), 1.0);
    }

    #[test]
    fn quantize_rounds_and_clamps_integer() {
        let fmt = FrameFormat::GRAY8;
        assert_eq!(fmt.quantize(254.6), 255.0);
        assert_eq!(fmt.quantize(-3.0), 0.0);
        assert_eq!(fmt.quantize(300.0), 255.0);
        // Float formats pass through untouched.
        assert_eq!(FrameFormat::GRAYS.quantize(1.5), 1.5);
    }

    #[test]
    fn invalid_depths_are_rejected() {
        assert!(FrameFormat::gray(7).is_err());
        assert!(FrameFormat::gray(17).is_err());
        assert!(FrameFormat::new(SampleType::Float, 16, ColorFamily::Gray, 0, 0).is_err());
    }

    #[test]
    fn subsampled_plane_dimensions() {
        let fmt = FrameFormat::YUV420P8;
        assert_eq!(fmt.plane_dimensions(0, 1920, 1080), (1920, 1080));
        assert_eq!(fmt.plane_dimensions(1, 1920, 1080), (960, 540));
    }
}
