//! MSB-first bit packing with a self-delimiting padding marker.
//!
//! Packed streams start with `padding - 1` zero bits and a single one bit,
//! where `padding = 8 - len % 8`. A byte-aligned payload still gets a whole
//! marker byte (`0b0000_0001`), so every stream is at least one byte long.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use tracing::{debug, warn};

use crate::error::{HuffmanError, Result};

#[derive(Default, Debug)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bit_capacity.div_ceil(8)),
            bit_count: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bits
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends a string of '0'/'1' characters.
    pub fn push_bit_str(&mut self, bits: &str) -> Result<()> {
        for (position, character) in bits.chars().enumerate() {
            match character {
                '0' => self.push_bit(false),
                '1' => self.push_bit(true),
                character => {
                    return Err(HuffmanError::InvalidBitCharacter {
                        character,
                        position,
                    })
                }
            }
        }
        Ok(())
    }

    pub fn read_bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        let byte = self.bits[index / 8];
        Some(byte & (1 << (7 - index % 8)) != 0)
    }

    /// Renders the stored bits as a '0'/'1' string.
    pub fn to_bit_string(&self) -> String {
        (0..self.bit_count)
            .map(|i| match self.read_bit(i) {
                Some(true) => '1',
                _ => '0',
            })
            .collect()
    }
}

impl From<&[u8]> for BitVec {
    fn from(bytes: &[u8]) -> Self {
        BitVec {
            bits: bytes.to_vec(),
            bit_count: bytes.len() * 8,
        }
    }
}

/// Number of marker bits put in front of a payload of `payload_bits` bits.
pub fn padding_for(payload_bits: usize) -> usize {
    8 - payload_bits % 8
}

/// Packs a '0'/'1' string behind its padding marker.
pub fn pack(bits: &str) -> Result<Vec<u8>> {
    let padding = padding_for(bits.len());
    let mut bit_vec = BitVec::with_capacity(padding + bits.len());
    for _ in 0..padding - 1 {
        bit_vec.push_bit(false);
    }
    bit_vec.push_bit(true);
    bit_vec.push_bit_str(bits)?;
    debug_assert_eq!(bit_vec.bit_count() % 8, 0);
    Ok(bit_vec.into_bytes())
}

/// Recovers the payload bit string from packed bytes.
///
/// The first one bit within the first byte ends the marker. A first byte of
/// all zeros is dropped whole.
pub fn unpack(bytes: &[u8]) -> String {
    let bit_vec = BitVec::from(bytes);
    if bit_vec.bit_count() < 8 {
        warn!("encoded stream is empty, decoding an empty payload");
        return String::new();
    }

    let bits = bit_vec.to_bit_string();
    match bits[..8].find('1') {
        Some(marker_end) => bits[marker_end + 1..].to_string(),
        None => {
            warn!("no padding marker in first byte, dropping it");
            bits[8..].to_string()
        }
    }
}

/// Packs `bits` and overwrites `path` with the result.
///
/// Nothing is written when `bits` holds an invalid character.
pub fn write_bit_string(path: &Path, bits: &str) -> Result<()> {
    let bytes = pack(bits)?;
    write_replacing(path, &bytes)?;
    debug!(
        path = %path.display(),
        payload_bits = bits.len(),
        bytes = bytes.len(),
        "wrote packed bit string"
    );
    Ok(())
}

/// Writes `bytes` to a temporary file next to `path`, then renames it over
/// `path`. A failed write leaves any existing `path` untouched.
pub(crate) fn write_replacing(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Reads `path` and returns its payload bit string.
pub fn read_bit_string(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|err| {
        warn!(path = %path.display(), error = %err, "error while reading encoded file");
        err
    })?;
    Ok(unpack(&bytes))
}
