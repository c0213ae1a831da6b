//! Binary PGM (P5) reading and writing for grayscale frames.
//!
//! This is the interchange format of the command-line tools. Maxval up to
//! 255 maps to Gray8, up to 65535 to Gray16 (big-endian samples, as the
//! format requires). Float frames are written at 16 bits.

use std::path::Path;

use maskwork_common::{MaskworkError, MaskworkResult};

use crate::depth::to_depth;
use crate::format::{ColorFamily, FrameFormat};
use crate::frame::Frame;
use crate::plane::Plane;

/// Decode a binary PGM buffer into a gray frame.
pub fn decode_pgm(bytes: &[u8]) -> MaskworkResult<Frame> {
    let mut header = HeaderReader::new(bytes);

    let magic = header.token()?;
    if magic != b"P5" {
        return Err(MaskworkError::format(
            "not a binary PGM file (missing P5 magic)",
        ));
    }
    let width = header.number()? as usize;
    let height = header.number()? as usize;
    let maxval = header.number()?;
    if width == 0 || height == 0 {
        return Err(MaskworkError::format("PGM has zero dimension"));
    }
    if maxval == 0 || maxval > 65535 {
        return Err(MaskworkError::format(format!(
            "PGM maxval {maxval} out of range"
        )));
    }

    let data = header.rest()?;
    let wide = maxval > 255;
    let expected = width * height * if wide { 2 } else { 1 };
    if data.len() < expected {
        return Err(MaskworkError::format(format!(
            "PGM sample data truncated: expected {expected} bytes, got {}",
            data.len()
        )));
    }

    let format = if wide {
        FrameFormat::GRAY16
    } else {
        FrameFormat::GRAY8
    };
    let mut samples = Vec::with_capacity(width * height);
    if wide {
        for chunk in data[..expected].chunks_exact(2) {
            samples.push(u16::from_be_bytes([chunk[0], chunk[1]]) as f32);
        }
    } else {
        samples.extend(data[..expected].iter().map(|&b| b as f32));
    }

    let plane = Plane::from_data(width, height, samples)?;
    Frame::from_planes(format, width, height, vec![plane])
}

/// Encode a gray frame as binary PGM. Integer frames keep their depth;
/// float frames are emitted at 16 bits.
pub fn encode_pgm(frame: &Frame) -> MaskworkResult<Vec<u8>> {
    if frame.format().color_family != ColorFamily::Gray {
        return Err(MaskworkError::unsupported(
            "PGM output supports gray frames only",
        ));
    }
    let frame = if frame.format().is_float() {
        to_depth(frame, 16)?
    } else {
        frame.clone()
    };

    let maxval = frame.format().peak_value() as u32;
    let wide = maxval > 255;
    let plane = frame.plane(0);

    let mut out = Vec::with_capacity(plane.data().len() * if wide { 2 } else { 1 } + 32);
    out.extend_from_slice(
        format!("P5\n{} {}\n{}\n", frame.width(), frame.height(), maxval).as_bytes(),
    );
    for &v in plane.data() {
        let v = v.round().clamp(0.0, maxval as f32) as u32;
        if wide {
            out.extend_from_slice(&(v as u16).to_be_bytes());
        } else {
            out.push(v as u8);
        }
    }
    Ok(out)
}

/// Read a PGM file into a gray frame.
pub fn read_pgm(path: impl AsRef<Path>) -> MaskworkResult<Frame> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MaskworkError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MaskworkError::Io(e)
        }
    })?;
    decode_pgm(&bytes)
}

/// Write a gray frame as a PGM file.
pub fn write_pgm(frame: &Frame, path: impl AsRef<Path>) -> MaskworkResult<()> {
    let bytes = encode_pgm(frame)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Incremental PGM header scanner: whitespace-separated tokens with
/// `#` comments, then the raw sample payload after a single whitespace.
struct HeaderReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn skip_filler(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'#' => {
                    while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn token(&mut self) -> MaskworkResult<&'a [u8]> {
        self.skip_filler();
        let start = self.pos;
        while self.pos < self.bytes.len() && !self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(MaskworkError::format("truncated PGM header"));
        }
        Ok(&self.bytes[start..self.pos])
    }

    fn number(&mut self) -> MaskworkResult<u32> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| MaskworkError::format("malformed number in PGM header"))
    }

    /// Sample payload: everything after the single whitespace byte that
    /// terminates the maxval token.
    fn rest(&mut self) -> MaskworkResult<&'a [u8]> {
        if self.pos >= self.bytes.len() {
            return Err(MaskworkError::format("PGM has no sample data"));
        }
        self.pos += 1;
        Ok(&self.bytes[self.pos..])
    }
}
