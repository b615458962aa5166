use std::io::{BufReader, Read};

use crate::error::{HuffmanError, Result};
use crate::symbol_table::ALPHABET_SIZE;

/// Per-symbol prefix codes, stored as '0'/'1' strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<String>>,
}

impl Default for CodeTable {
    fn default() -> Self {
        CodeTable {
            codes: vec![None; ALPHABET_SIZE],
        }
    }
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, symbol: u8, code: String) {
        if let Some(slot) = self.codes.get_mut(usize::from(symbol)) {
            *slot = Some(code);
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&str> {
        self.codes.get(usize::from(symbol))?.as_deref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| Some((symbol as u8, code.as_deref()?)))
    }

    /// Concatenates the code of every symbol of `source`, in source order.
    pub fn encode_source<R: Read>(&self, source: R) -> Result<String> {
        let mut bits = String::new();
        for (offset, byte) in BufReader::new(source).bytes().enumerate() {
            let byte = byte?;
            let code = self.get(byte).ok_or(HuffmanError::SymbolNotInTable {
                byte,
                offset: offset as u64,
            })?;
            bits.push_str(code);
        }
        Ok(bits)
    }
}
