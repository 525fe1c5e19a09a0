//! The adaptive Huffman entropy stage.
//!
//! Coder and decoder maintain mirror copies of one adaptive code tree (see
//! [`tree`]) and must perform identical updates after every symbol. The
//! stream interleaves two bit orders: code-path bits are packed LSB first,
//! literal symbol bytes MSB first. An outer settings byte in front of the
//! payload says whether it is coded at all; streams that the coder would
//! have inflated are stored verbatim instead.

pub mod bit_reader;
pub mod bit_writer;
pub mod huffman_decoder;
pub mod huffman_encoder;
mod tree;

pub use huffman_decoder::{HuffmanDecodeError, HuffmanDecoder};
pub use huffman_encoder::HuffmanEncoder;
