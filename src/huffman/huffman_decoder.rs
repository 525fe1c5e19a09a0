//! The adaptive entropy decoder.

use alloc::vec::Vec;

use super::bit_reader::BitReader;
use super::tree::CodeTree;
use crate::frame::OuterByte;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HuffmanDecodeError {
    #[error("An empty buffer cannot hold an encoded stream")]
    SourceIsEmpty,
    #[error("The bit stream descended into a child that does not exist")]
    MissingChild,
    #[error("The stream ended inside the 8-bit literal that must follow the escape code")]
    TruncatedLiteral,
}

/// Decodes a stream produced by the [`HuffmanEncoder`](super::HuffmanEncoder)
/// by mirroring its tree, symbol by symbol.
pub struct HuffmanDecoder {
    tree: CodeTree,
}

impl HuffmanDecoder {
    pub fn new() -> Self {
        HuffmanDecoder {
            tree: CodeTree::new(),
        }
    }

    /// Decode an outer frame: the settings byte followed by either a
    /// verbatim payload or a bit-packed code stream.
    pub fn decode(mut self, source: &[u8]) -> Result<Vec<u8>, HuffmanDecodeError> {
        let (&first, payload) = source
            .split_first()
            .ok_or(HuffmanDecodeError::SourceIsEmpty)?;
        let outer = OuterByte(first);
        if payload.is_empty() || !outer.is_entropy_coded() {
            return Ok(payload.to_vec());
        }

        let padding = outer.padding_bits();
        let mut reader = BitReader::new(payload);
        let mut output = Vec::with_capacity(payload.len() * 2);
        let mut node = self.tree.root();

        loop {
            if reader.at_padding(padding) {
                break;
            }
            if !self.tree.is_leaf(node) {
                let bit = match reader.read_bit() {
                    Some(bit) => bit,
                    // Clean end of stream between symbols.
                    None => break,
                };
                node = self
                    .tree
                    .child(node, bit)
                    .ok_or(HuffmanDecodeError::MissingChild)?;
                continue;
            }

            let start = if self.tree.is_nyt(node) {
                let symbol = reader
                    .read_symbol()
                    .ok_or(HuffmanDecodeError::TruncatedLiteral)?;
                output.push(symbol);
                self.tree.insert(symbol)
            } else {
                output.push(self.tree.value(node));
                node
            };
            self.tree.update(start);
            node = self.tree.root();
        }
        Ok(output)
    }
}

impl Default for HuffmanDecoder {
    fn default() -> Self {
        Self::new()
    }
}
