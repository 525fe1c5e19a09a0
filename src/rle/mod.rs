//! The run-length stage.
//!
//! A frame is the header from [`crate::frame`] followed by groups of one
//! classifier byte and up to eight payload bytes. Bit `i` of the classifier
//! (LSB first) marks payload byte `i` as a run-counter fragment (1) or a
//! literal pixel value (0). A run of length 1 is a bare value, a run of
//! length 2 is the counter literal `0x00` followed by the value, and longer
//! runs store `length - 2` as big-endian base-256 counter fragments before
//! the value.

pub mod rle_decoder;
pub mod rle_encoder;

pub use rle_decoder::{DecodedImage, RleDecodeError, RleDecoder};
pub use rle_encoder::{RleEncodeError, RleEncoder, ScanMode};
