//! # ascii_huffman
//!
//! Static Huffman coding for 7-bit ASCII text.
//!
//! The tree is built with a two-queue merge over the frequency-sorted leaves,
//! codes are read off root-to-leaf paths (left = 0, right = 1), and the
//! payload is packed MSB first behind a zero-run-then-one padding marker.
//!
//! The encoded file holds only the packed payload. Decoding rebuilds the tree
//! from the original source text, so that text must still be available;
//! callers that need standalone files have to ship the tree or code table
//! themselves.
//!
//! ## Quick Start
//!
//! ```rust
//! use ascii_huffman::HuffmanCodec;
//!
//! let text = b"aaab";
//! let codec = HuffmanCodec::from_reader(&text[..])?;
//!
//! let encoded = codec.encode(&text[..])?;
//! assert_eq!(encoded, vec![0b0001_1110]);
//!
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded, text);
//! # Ok::<(), ascii_huffman::HuffmanError>(())
//! ```

pub mod bit_vec;
pub mod code_table;
pub mod error;
pub mod huffman_codec;
pub mod hufftree;
pub mod symbol_table;

// Re-export main types for convenience
pub use code_table::CodeTable;
pub use error::{HuffmanError, Result};
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};
pub use symbol_table::{FrequencyTable, SymbolWeight, ALPHABET_SIZE};
