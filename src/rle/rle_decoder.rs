//! Rebuilds a pixel raster from a run-length frame.

use alloc::vec;
use alloc::vec::Vec;

use crate::frame::{FrameHeader, FrameHeaderError};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RleDecodeError {
    #[error(transparent)]
    Header(#[from] FrameHeaderError),
    #[error("Runs cover {got} pixels but the header promises {need}")]
    WrongPixelCount { got: usize, need: usize },
    #[error("A run writes past the end of the {width}x{height} image")]
    RunPastEnd { width: u32, height: u32 },
}

/// A decoded raster together with the header facts the caller needs: the
/// dimensions and whether the differential model still has to be undone.
#[derive(Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub model: bool,
}

/// Run-length decoder borrowing the frame for the duration of the decode.
pub struct RleDecoder<'frame> {
    source: &'frame [u8],
    index: usize,
    group: u8,
    bit_index: u8,
}

impl<'frame> RleDecoder<'frame> {
    pub fn new(source: &'frame [u8]) -> Self {
        RleDecoder {
            source,
            index: 0,
            group: 0,
            bit_index: 0,
        }
    }

    pub fn decompress(mut self) -> Result<DecodedImage, RleDecodeError> {
        let (header, header_len) = FrameHeader::parse(self.source)?;
        self.index = header_len;

        let size = header.width as usize * header.height as usize;
        let mut pixels = vec![0u8; size];
        if header.horizontal {
            self.fill_horizontal(&mut pixels)?;
        } else {
            self.fill_vertical(&mut pixels, header.width, header.height)?;
        }
        Ok(DecodedImage {
            pixels,
            width: header.width,
            height: header.height,
            model: header.model,
        })
    }

    /// Pull the next `(count, value)` pair off the stream.
    ///
    /// Classifier bits are read LSB first from the current group byte;
    /// counter fragments shift-accumulate until a value byte terminates the
    /// run. `None` means the stream ended on a classifier or payload fetch;
    /// the caller's completeness checks decide whether that was legitimate.
    fn next_run(&mut self) -> Option<(usize, u8)> {
        let mut accumulator = 0usize;
        let mut saw_counter = false;

        while self.index < self.source.len() {
            if self.bit_index == 0 {
                self.group = self.source[self.index];
                self.index += 1;
            }
            while self.bit_index < 8 {
                let is_counter = self.group & (1 << self.bit_index) != 0;
                self.bit_index += 1;
                let byte = *self.source.get(self.index)?;
                self.index += 1;
                if is_counter {
                    accumulator = (accumulator << 8) | byte as usize;
                    saw_counter = true;
                    continue;
                }
                // Saturate: a counter beyond usize cannot belong to a
                // valid image and still fails the completeness checks.
                let count = if saw_counter {
                    accumulator.saturating_add(2)
                } else {
                    1
                };
                return Some((count, byte));
            }
            self.bit_index = 0;
        }
        None
    }

    /// Row-major reconstruction: runs fill the buffer front to back. A run
    /// overflowing the image is truncated to the remaining capacity and ends
    /// the decode.
    fn fill_horizontal(&mut self, pixels: &mut [u8]) -> Result<(), RleDecodeError> {
        let mut filled = 0usize;
        while let Some((count, value)) = self.next_run() {
            if count > pixels.len() - filled {
                pixels[filled..].fill(value);
                filled = pixels.len();
                break;
            }
            pixels[filled..filled + count].fill(value);
            filled += count;
        }
        if filled != pixels.len() {
            return Err(RleDecodeError::WrongPixelCount {
                got: filled,
                need: pixels.len(),
            });
        }
        Ok(())
    }

    /// Column-major reconstruction: one pixel per step, cursor wrapping to
    /// the next column at the bottom row. Exactly `width * height` pixels
    /// must come out of the stream.
    fn fill_vertical(
        &mut self,
        pixels: &mut [u8],
        width: u32,
        height: u32,
    ) -> Result<(), RleDecodeError> {
        let w = width as usize;
        let h = height as usize;
        let mut x = 0usize;
        let mut y = 0usize;
        let mut written = 0usize;

        while let Some((count, value)) = self.next_run() {
            for _ in 0..count {
                if written == pixels.len() {
                    return Err(RleDecodeError::RunPastEnd { width, height });
                }
                pixels[y * w + x] = value;
                written += 1;
                y += 1;
                if y == h {
                    y = 0;
                    x += 1;
                }
            }
        }
        if written != pixels.len() {
            return Err(RleDecodeError::WrongPixelCount {
                got: written,
                need: pixels.len(),
            });
        }
        Ok(())
    }
}
