//! The adaptive entropy coder.

use alloc::vec::Vec;

use super::bit_writer::BitWriter;
use super::tree::CodeTree;
use crate::frame::OuterByte;

/// Encodes a byte stream against a continuously reshaped code tree.
///
/// Unseen symbols are announced by the code of the NYT escape leaf followed
/// by the raw 8-bit symbol; seen symbols by the code of their leaf. After
/// every symbol the tree is reweighted, so the code adapts to the stream
/// without any table being transmitted.
pub struct HuffmanEncoder {
    tree: CodeTree,
    writer: BitWriter,
    path: Vec<bool>,
}

impl HuffmanEncoder {
    pub fn new() -> Self {
        HuffmanEncoder {
            tree: CodeTree::new(),
            writer: BitWriter::new(),
            path: Vec::new(),
        }
    }

    /// Encode `source`, returning the outer settings byte and the payload.
    ///
    /// When the bit-packed stream would outgrow the input, the payload falls
    /// back to a verbatim copy and the outer byte signals passthrough.
    pub fn encode(mut self, source: &[u8]) -> (OuterByte, Vec<u8>) {
        for &byte in source {
            self.push_symbol(byte);
        }

        if self.writer.len() > source.len() {
            log::debug!(
                "entropy stage grew {} bytes to {}, storing verbatim",
                source.len(),
                self.writer.len()
            );
            return (OuterByte::passthrough(), source.to_vec());
        }
        (
            OuterByte::entropy_coded(self.writer.bit_index()),
            self.writer.into_bytes(),
        )
    }

    fn push_symbol(&mut self, byte: u8) {
        self.path.clear();
        let start = match self.tree.leaf_of(byte) {
            Some(leaf) => {
                self.tree.path_to_root(leaf, &mut self.path);
                self.writer.write_path(&self.path);
                leaf
            }
            None => {
                self.tree.path_to_root(self.tree.nyt(), &mut self.path);
                self.writer.write_path(&self.path);
                let old_nyt = self.tree.insert(byte);
                self.writer.write_symbol(byte);
                old_nyt
            }
        };
        self.tree.update(start);
    }
}

impl Default for HuffmanEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::HuffmanEncoder;
    use alloc::vec;

    #[test]
    fn first_symbol_is_a_bare_literal() {
        // The NYT is the root, so its code is empty and only the MSB-first
        // literal is written.
        let (outer, payload) = HuffmanEncoder::new().encode(&[0b1000_0000]);
        assert!(outer.is_entropy_coded());
        assert_eq!(outer.padding_bits(), 0);
        assert_eq!(payload, vec![0b0000_0001]);
    }

    #[test]
    fn repeated_symbol_costs_one_bit() {
        // Second occurrence of the only symbol: its leaf is the root's
        // right child, code "1".
        let (outer, payload) = HuffmanEncoder::new().encode(&[0x00, 0x00]);
        assert!(outer.is_entropy_coded());
        assert_eq!(outer.padding_bits(), 7);
        assert_eq!(payload, vec![0x00, 0x01]);
    }

    #[test]
    fn oversized_encoding_falls_back_to_passthrough() {
        // Eight distinct symbols cannot beat eight raw bytes: every one
        // costs an escape code plus a full literal.
        let source = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let (outer, payload) = HuffmanEncoder::new().encode(&source);
        assert!(!outer.is_entropy_coded());
        assert_eq!(payload, source);
    }

    #[test]
    fn empty_input_stays_empty() {
        let (outer, payload) = HuffmanEncoder::new().encode(&[]);
        assert!(outer.is_entropy_coded());
        assert_eq!(outer.padding_bits(), 0);
        assert!(payload.is_empty());
    }
}
