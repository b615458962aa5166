use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::bit_vec::{self, BitVec};
use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::hufftree::HuffmanTree;

/// Encoder and decoder for one source text.
///
/// The tree is derived from the source statistics and never stored in the
/// encoded output, so decoding needs the same source text the codec was
/// built from.
#[derive(Debug)]
pub struct HuffmanCodec {
    tree: Option<HuffmanTree>,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: Option<HuffmanTree>) -> Self {
        let encode_table = tree
            .as_ref()
            .map(HuffmanTree::generate_table)
            .unwrap_or_default();
        HuffmanCodec { tree, encode_table }
    }

    /// Builds the codec from the symbol statistics of `source`.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(Self::new(HuffmanTree::from_source(source)?))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let codec = Self::from_reader(File::open(path)?)?;
        debug!(
            path = %path.display(),
            symbols = codec.encode_table.len(),
            "built codec from source file"
        );
        Ok(codec)
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn table(&self) -> &CodeTable {
        &self.encode_table
    }

    /// Translates `source` into its payload bit string.
    pub fn encode_bits<R: Read>(&self, source: R) -> Result<String> {
        self.encode_table.encode_source(source)
    }

    /// Encodes `source` into packed bytes.
    pub fn encode<R: Read>(&self, source: R) -> Result<Vec<u8>> {
        let bits = self.encode_bits(source)?;
        bit_vec::pack(&bits)
    }

    /// Encodes the file at `source` and overwrites `destination`.
    pub fn encode_file(&self, source: &Path, destination: &Path) -> Result<()> {
        let bits = self.encode_bits(File::open(source)?)?;
        bit_vec::write_bit_string(destination, &bits)?;
        info!(
            source = %source.display(),
            destination = %destination.display(),
            payload_bits = bits.len(),
            "encoded file"
        );
        Ok(())
    }

    /// Walks a payload bit string back into symbols.
    pub fn decode_bits(&self, bits: &str) -> Result<Vec<u8>> {
        match &self.tree {
            Some(tree) => tree.decode_bits(bits),
            None if bits.is_empty() => Ok(Vec::new()),
            None => Err(HuffmanError::NoSymbols {
                payload_bits: bits.len(),
            }),
        }
    }

    /// Decodes packed bytes.
    pub fn decode(&self, encoded: &[u8]) -> Result<Vec<u8>> {
        self.decode_bits(&bit_vec::unpack(encoded))
    }

    /// Decodes the file at `encoded` and overwrites `destination`.
    pub fn decode_file(&self, encoded: &Path, destination: &Path) -> Result<()> {
        let bits = bit_vec::read_bit_string(encoded)?;
        let decoded = self.decode_bits(&bits)?;
        bit_vec::write_replacing(destination, &decoded)?;
        info!(
            encoded = %encoded.display(),
            destination = %destination.display(),
            symbols = decoded.len(),
            "decoded file"
        );
        Ok(())
    }

    /// Packed bytes rendered back to a bit string, marker included.
    pub fn dump_bits(encoded: &[u8]) -> String {
        BitVec::from(encoded).to_bit_string()
    }
}
