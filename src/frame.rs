//! The two headers of the wire format.
//!
//! A compressed file is `[outer byte][payload]`. The outer byte belongs to
//! the entropy stage and says whether the payload is Huffman coded or a
//! verbatim run-length frame. The run-length frame in turn starts with its
//! own settings byte followed by the image dimensions.

use alloc::vec::Vec;

/// Scan direction bit of the run-length settings byte. Set means the frame
/// was produced by a row-major scan.
const SCAN_MASK: u8 = 0b1000_0000;
/// Set when the pixels were passed through the differential model before
/// scanning.
const MODEL_MASK: u8 = 0b0100_0000;
const WIDTH_COUNT_MASK: u8 = 0b0011_1000;
const HEIGHT_COUNT_MASK: u8 = 0b0000_0111;

/// Entropy-coded flag of the outer settings byte.
const CODED_MASK: u8 = 0b0000_1000;
/// Number of unused low bits in the last payload byte.
const PADDING_MASK: u8 = 0b0000_0111;

/// The settings byte leading every run-length frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsByte(pub u8);

impl SettingsByte {
    pub fn horizontal_scan(self) -> bool {
        self.0 & SCAN_MASK != 0
    }

    pub fn model_flag(self) -> bool {
        self.0 & MODEL_MASK != 0
    }

    /// How many bytes encode the width, 1 to 8.
    pub fn width_bytes(self) -> usize {
        (((self.0 & WIDTH_COUNT_MASK) >> 3) + 1) as usize
    }

    /// How many bytes encode the height, 1 to 8.
    pub fn height_bytes(self) -> usize {
        ((self.0 & HEIGHT_COUNT_MASK) + 1) as usize
    }
}

/// The outer settings byte written in front of the entropy stage's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OuterByte(pub u8);

impl OuterByte {
    /// The payload is the run-length frame stored verbatim.
    pub fn passthrough() -> Self {
        OuterByte(0)
    }

    /// The payload is Huffman coded. `bit_index` is the write cursor's bit
    /// position after the last code bit, from which the number of unused
    /// padding bits in the final byte is derived.
    pub fn entropy_coded(bit_index: u8) -> Self {
        debug_assert!(bit_index < 8);
        OuterByte(CODED_MASK | ((8 - bit_index) % 8))
    }

    pub fn is_entropy_coded(self) -> bool {
        self.0 & CODED_MASK != 0
    }

    pub fn padding_bits(self) -> u8 {
        self.0 & PADDING_MASK
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FrameHeaderError {
    #[error("An empty buffer cannot hold a frame header")]
    SourceIsEmpty,
    #[error("Header needs {need} bytes but the buffer only holds {got}")]
    NotEnoughBytesInHeader { got: usize, need: usize },
    #[error("Encoded dimension {got} does not fit into 32 bits")]
    DimensionTooLarge { got: u64 },
}

/// Scan direction, model flag and image dimensions of a run-length frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub horizontal: bool,
    pub model: bool,
    pub width: u32,
    pub height: u32,
}

impl FrameHeader {
    /// Serialized length in bytes: the settings byte plus both dimensions in
    /// their minimal byte counts.
    pub fn encoded_len(&self) -> usize {
        1 + find_min_size(self.width) + find_min_size(self.height)
    }

    pub fn settings_byte(&self) -> SettingsByte {
        let mut settings = 0u8;
        if self.horizontal {
            settings |= SCAN_MASK;
        }
        if self.model {
            settings |= MODEL_MASK;
        }
        settings |= ((find_min_size(self.width) as u8 - 1) << 3) & WIDTH_COUNT_MASK;
        settings |= (find_min_size(self.height) as u8 - 1) & HEIGHT_COUNT_MASK;
        SettingsByte(settings)
    }

    /// Append the settings byte and both big-endian dimensions to `output`.
    pub fn serialize(&self, output: &mut Vec<u8>) {
        output.push(self.settings_byte().0);
        write_dimension(self.width, output);
        write_dimension(self.height, output);
    }

    /// Parse a header from the front of `source`, returning it together with
    /// its encoded length.
    pub fn parse(source: &[u8]) -> Result<(FrameHeader, usize), FrameHeaderError> {
        let settings = SettingsByte(*source.first().ok_or(FrameHeaderError::SourceIsEmpty)?);
        let width_bytes = settings.width_bytes();
        let height_bytes = settings.height_bytes();
        let header_len = 1 + width_bytes + height_bytes;
        if source.len() < header_len {
            return Err(FrameHeaderError::NotEnoughBytesInHeader {
                got: source.len(),
                need: header_len,
            });
        }
        let width = read_dimension(&source[1..1 + width_bytes])?;
        let height = read_dimension(&source[1 + width_bytes..header_len])?;
        Ok((
            FrameHeader {
                horizontal: settings.horizontal_scan(),
                model: settings.model_flag(),
                width,
                height,
            },
            header_len,
        ))
    }
}

/// Minimum number of big-endian bytes needed to represent a dimension.
/// A value of 0 still takes one byte.
pub(crate) fn find_min_size(val: u32) -> usize {
    let mut size = 1;
    let mut rest = val >> 8;
    while rest > 0 {
        size += 1;
        rest >>= 8;
    }
    size
}

/// Append `val` big-endian using its minimal byte count.
fn write_dimension(val: u32, output: &mut Vec<u8>) {
    let size = find_min_size(val);
    output.extend_from_slice(&val.to_be_bytes()[4 - size..]);
}

/// Big-endian accumulation of a dimension field. The settings byte admits up
/// to 8 bytes per dimension, so the value is gathered in 64 bits and checked
/// against the 32-bit dimension range afterwards.
fn read_dimension(bytes: &[u8]) -> Result<u32, FrameHeaderError> {
    let mut value: u64 = 0;
    for &byte in bytes {
        value = (value << 8) | u64::from(byte);
    }
    u32::try_from(value).map_err(|_| FrameHeaderError::DimensionTooLarge { got: value })
}
