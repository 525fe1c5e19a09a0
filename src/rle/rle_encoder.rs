//! Turns a pixel raster into a run-length frame.

use alloc::vec::Vec;

use crate::frame::FrameHeader;

/// Payload bytes described by one classifier byte.
const GROUP_SIZE: usize = 8;

/// How the encoder walks the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Row-major scan only.
    Sequence,
    /// Scan both directions and keep the smaller frame. Ties go to the
    /// column-major frame.
    Adaptive,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RleEncodeError {
    #[error("Pixel buffer is empty")]
    EmptyImage,
    #[error("Dimensions {width}x{height} do not match the buffer length {len}")]
    DimensionMismatch { width: u32, height: u32, len: usize },
}

/// Run-length encoder borrowing the pixel raster for the duration of a scan.
pub struct RleEncoder<'pixels> {
    pixels: &'pixels [u8],
    width: u32,
    height: u32,
}

impl<'pixels> RleEncoder<'pixels> {
    pub fn new(
        pixels: &'pixels [u8],
        width: u32,
        height: u32,
    ) -> Result<Self, RleEncodeError> {
        if pixels.is_empty() {
            return Err(RleEncodeError::EmptyImage);
        }
        if (width as usize).checked_mul(height as usize) != Some(pixels.len()) {
            return Err(RleEncodeError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(RleEncoder {
            pixels,
            width,
            height,
        })
    }

    /// Encode the raster into a run-length frame, header included.
    ///
    /// `model` only sets the header flag; the caller is responsible for
    /// having applied the differential model to the pixels beforehand.
    pub fn scan(&self, mode: ScanMode, model: bool) -> Vec<u8> {
        match mode {
            ScanMode::Sequence => self.scan_horizontal(model),
            ScanMode::Adaptive => {
                let horizontal = self.scan_horizontal(model);
                let vertical = self.scan_vertical(model);
                log::debug!(
                    "adaptive scan: horizontal {} bytes, vertical {} bytes",
                    horizontal.len(),
                    vertical.len()
                );
                if vertical.len() <= horizontal.len() {
                    vertical
                } else {
                    horizontal
                }
            }
        }
    }

    /// Worst case payload: every pixel a singleton run plus one classifier
    /// byte per eight payload bytes.
    fn worst_case(&self, header: &FrameHeader) -> usize {
        let size = self.pixels.len();
        size + size / 8 + 1 + header.encoded_len()
    }

    fn scan_horizontal(&self, model: bool) -> Vec<u8> {
        let header = FrameHeader {
            horizontal: true,
            model,
            width: self.width,
            height: self.height,
        };
        let mut packer = GroupPacker::with_capacity(self.worst_case(&header));
        header.serialize(&mut packer.output);
        encode_runs(&mut packer, self.pixels.iter().copied());
        packer.finish()
    }

    fn scan_vertical(&self, model: bool) -> Vec<u8> {
        let header = FrameHeader {
            horizontal: false,
            model,
            width: self.width,
            height: self.height,
        };
        let mut packer = GroupPacker::with_capacity(self.worst_case(&header));
        header.serialize(&mut packer.output);
        let width = self.width as usize;
        let height = self.height as usize;
        let pixels = self.pixels;
        encode_runs(
            &mut packer,
            (0..width).flat_map(move |x| (0..height).map(move |y| pixels[y * width + x])),
        );
        packer.finish()
    }
}

/// Collapse a pixel sequence into runs and feed them to the packer.
fn encode_runs(packer: &mut GroupPacker, mut pixels: impl Iterator<Item = u8>) {
    let mut current = match pixels.next() {
        Some(first) => first,
        None => return,
    };
    let mut count = 1usize;
    for pixel in pixels {
        if pixel == current {
            count += 1;
            continue;
        }
        packer.push_run(count, current);
        current = pixel;
        count = 1;
    }
    packer.push_run(count, current);
}

/// Accumulates payload bytes and flushes them behind their classifier byte
/// once eight are pending. The final partial group is flushed as-is; unused
/// classifier bits stay zero and no dummy payload is appended.
struct GroupPacker {
    output: Vec<u8>,
    group: u8,
    pending: Vec<u8>,
}

impl GroupPacker {
    fn with_capacity(capacity: usize) -> Self {
        GroupPacker {
            output: Vec::with_capacity(capacity),
            group: 0,
            pending: Vec::with_capacity(GROUP_SIZE),
        }
    }

    fn push(&mut self, byte: u8, is_counter: bool) {
        if is_counter {
            self.group |= 1 << self.pending.len();
        }
        self.pending.push(byte);
        if self.pending.len() == GROUP_SIZE {
            self.flush();
        }
    }

    fn flush(&mut self) {
        self.output.push(self.group);
        self.output.extend_from_slice(&self.pending);
        self.group = 0;
        self.pending.clear();
    }

    /// Append one run. Lengths 1 and 2 have fixed encodings; longer runs
    /// store `count - 2` as big-endian counter fragments. The fragment
    /// values 0 and 1 are never produced for counts above 2, which is what
    /// frees `0x00` to mean "run of two".
    fn push_run(&mut self, count: usize, value: u8) {
        if count >= 2 {
            let mut digits = [0u8; (usize::BITS / 8) as usize];
            let mut filled = 0;
            let mut rest = count - 2;
            if rest == 0 {
                filled = 1;
            }
            while rest > 0 {
                digits[filled] = (rest & 0xff) as u8;
                rest >>= 8;
                filled += 1;
            }
            for &digit in digits[..filled].iter().rev() {
                self.push(digit, true);
            }
        }
        self.push(value, false);
    }

    fn finish(mut self) -> Vec<u8> {
        if !self.pending.is_empty() {
            self.flush();
        }
        self.output
    }
}
