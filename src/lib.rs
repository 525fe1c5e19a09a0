//! A pure Rust, lossless codec for raw 8-bit grayscale images.
//!
//! Images are compressed in two stages. A run-length stage scans the pixel
//! raster (row-major, or column-major when that packs better) and emits a
//! compact group-byte framed stream, which an adaptive Huffman stage then
//! entropy-codes bit by bit. Both stages are fully reversible; when the
//! entropy stage would grow the data it steps aside and stores the run-length
//! frame verbatim.
//!
//! An optional differential model replaces each pixel with its wrapping
//! difference to the previous one before scanning, which turns smooth
//! gradients into long runs of small values.
//!
//! # Examples
//! ```
//! use rawhuff::{compress, decompress, CompressOptions};
//!
//! let pixels = [[10u8; 16], [20u8; 16], [30u8; 16]].concat();
//! let packed = compress(&pixels, 16, CompressOptions::default()).unwrap();
//! let restored = decompress(&packed).unwrap();
//! assert_eq!(restored, pixels);
//! ```
#![no_std]
#![deny(unsafe_code)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod codec;
pub mod frame;
pub mod huffman;
pub mod rle;
pub mod transform;
#[cfg(test)]
mod tests;

pub use codec::{compress, decompress, CompressError, CompressOptions, DecompressError};
