//! The full pipeline: differential model, run-length scan, entropy stage.
//!
//! Compression is `pixels -> [model?] -> RLE frame -> outer byte + payload`;
//! decompression inverts the stages in reverse order. Whether the inverse
//! model runs is driven by the flag inside the run-length header, not by the
//! caller.

use alloc::vec::Vec;

use crate::huffman::{HuffmanDecodeError, HuffmanDecoder, HuffmanEncoder};
use crate::rle::{RleDecodeError, RleDecoder, RleEncodeError, RleEncoder, ScanMode};
use crate::transform;

/// Knobs of the compression pipeline. The defaults reproduce a plain
/// row-major scan of the raw pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressOptions {
    /// Apply the differential model before scanning.
    pub model: bool,
    /// Try both scan directions and keep the smaller frame.
    pub adaptive: bool,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error("Width must be at least 1")]
    ZeroWidth,
    #[error("Input length {len} is not divisible by the width {width}")]
    UnevenRows { len: usize, width: u32 },
    #[error("Input of length {len} exceeds the supported image size")]
    ImageTooLarge { len: usize },
    #[error(transparent)]
    Rle(#[from] RleEncodeError),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error(transparent)]
    Entropy(#[from] HuffmanDecodeError),
    #[error(transparent)]
    Rle(#[from] RleDecodeError),
}

/// Compress a raw grayscale image of the given width; the height is derived
/// from the buffer length. Returns the complete output file content: the
/// outer settings byte followed by the entropy stage's payload.
pub fn compress(
    pixels: &[u8],
    width: u32,
    options: CompressOptions,
) -> Result<Vec<u8>, CompressError> {
    if width == 0 {
        return Err(CompressError::ZeroWidth);
    }
    if pixels.is_empty() || pixels.len() % width as usize != 0 {
        return Err(CompressError::UnevenRows {
            len: pixels.len(),
            width,
        });
    }
    let height = u32::try_from(pixels.len() / width as usize)
        .map_err(|_| CompressError::ImageTooLarge { len: pixels.len() })?;

    let modeled;
    let pixels = if options.model {
        let mut buffer = pixels.to_vec();
        transform::model(&mut buffer);
        modeled = buffer;
        modeled.as_slice()
    } else {
        pixels
    };

    let mode = if options.adaptive {
        ScanMode::Adaptive
    } else {
        ScanMode::Sequence
    };
    let frame = RleEncoder::new(pixels, width, height)?.scan(mode, options.model);
    let (outer, payload) = HuffmanEncoder::new().encode(&frame);

    let mut output = Vec::with_capacity(payload.len() + 1);
    output.push(outer.0);
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Decompress a file produced by [`compress`] back into raw pixels.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let frame = HuffmanDecoder::new().decode(data)?;
    let image = RleDecoder::new(&frame).decompress()?;
    let mut pixels = image.pixels;
    if image.model {
        transform::unmodel(&mut pixels);
    }
    Ok(pixels)
}
