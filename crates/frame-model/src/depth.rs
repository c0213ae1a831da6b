//! Bit-depth conversion.
//!
//! Full-range rescaling only: integer depths scale by the peak ratio,
//! float conversions normalize through `[0.0, 1.0]`.

use maskwork_common::MaskworkResult;

use crate::format::SampleType;
use crate::frame::Frame;

/// Convert a frame to the given integer depth (full range).
pub fn to_depth(frame: &Frame, bits_per_sample: u8) -> MaskworkResult<Frame> {
    let format = frame
        .format()
        .with_depth(SampleType::Integer, bits_per_sample)?;
    if *frame.format() == format {
        return Ok(frame.clone());
    }
    let scale = format.peak_value() / frame.format().peak_value();
    let peak = format.peak_value();
    let converted = frame.map_planes(|p| p.map(|v| (v * scale).round().clamp(0.0, peak)));
    Ok(converted.with_format(format))
}

/// Convert a frame to 32-bit float, normalizing samples to `[0.0, 1.0]`.
pub fn to_float(frame: &Frame) -> MaskworkResult<Frame> {
    let format = frame.format().with_depth(SampleType::Float, 32)?;
    if frame.format().is_float() {
        return Ok(frame.clone());
    }
    let scale = 1.0 / frame.format().peak_value();
    Ok(frame.map_planes(|p| p.map(|v| v * scale)).with_format(format))
}

/// Convert to whichever depth `target` uses.
pub fn to_depth_of(frame: &Frame, target: &Frame) -> MaskworkResult<Frame> {
    if target.format().is_float() {
        to_float(frame)
    } else {
        to_depth(frame, target.format().bits_per_sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FrameFormat;

    #[test]
    fn eight_to_sixteen_scales_by_peak_ratio() {
        let frame = Frame::blank(FrameFormat::GRAY8, 2, 2, 255.0);
        let deep = to_depth(&frame, 16).unwrap();
        assert_eq!(deep.plane(0).get(0, 0), 65535.0);
        assert_eq!(deep.format().bits_per_sample, 16);
    }

    #[test]
    fn integer_to_float_normalizes() {
        let frame = Frame::blank(FrameFormat::GRAY8, 2, 2, 51.0);
        let floated = to_float(&frame).unwrap();
        assert!((floated.plane(0).get(0, 0) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn float_to_integer_rounds() {
        let frame = Frame::blank(FrameFormat::GRAYS, 2, 2, 0.5);
        let int8 = to_depth(&frame, 8).unwrap();
        assert_eq!(int8.plane(0).get(0, 0), 128.0);
    }

    #[test]
    fn same_depth_is_identity() {
        let frame = Frame::blank(FrameFormat::GRAY8, 2, 2, 10.0);
        assert_eq!(to_depth(&frame, 8).unwrap(), frame);
    }

    proptest::proptest! {
        #[test]
        fn eight_bit_roundtrip_through_float(value in 0u32..=255) {
            let frame = Frame::blank(FrameFormat::GRAY8, 1, 1, value as f32);
            let back = to_depth(&to_float(&frame).unwrap(), 8).unwrap();
            proptest::prop_assert_eq!(back.plane(0).get(0, 0), value as f32);
        }

        #[test]
        fn conversions_stay_in_range(value in 0u32..=65535) {
            let frame = Frame::blank(FrameFormat::GRAY16, 1, 1, value as f32);
            let down = to_depth(&frame, 8).unwrap();
            let v = down.plane(0).get(0, 0);
            proptest::prop_assert!((0.0..=255.0).contains(&v));
        }
    }
}
