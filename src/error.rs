//! Error types for the Huffman codec.

use std::io;

/// Errors produced while building, encoding or decoding.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// A bit string held something other than '0' or '1'.
    #[error("invalid character {character:?} at bit {position} of bit string")]
    InvalidBitCharacter { character: char, position: usize },

    /// Reading or writing a file failed.
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// The payload ended part way down a root-to-leaf walk.
    #[error("truncated stream: payload ended {depth} bits into a code after {consumed_bits} bits")]
    TruncatedStream { consumed_bits: usize, depth: usize },

    /// The source held a byte outside the 7-bit alphabet.
    #[error("byte {byte:#04x} at offset {offset} is outside the 0-127 alphabet")]
    SymbolOutOfRange { byte: u8, offset: u64 },

    /// The source held a symbol the code table has no entry for.
    #[error("symbol {byte:#04x} at offset {offset} is not in the code table")]
    SymbolNotInTable { byte: u8, offset: u64 },

    /// The tree builder needs at least two leaves.
    #[error("cannot build a tree from {found} leaves, at least 2 are required")]
    InsufficientSymbols { found: usize },

    /// A record in the leaf list had no symbol.
    #[error("leaf record {index} carries no symbol")]
    LeafWithoutSymbol { index: usize },

    /// Payload bits were present but the source alphabet is empty.
    #[error("encoded stream carries {payload_bits} payload bits but the source alphabet is empty")]
    NoSymbols { payload_bits: usize },
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
