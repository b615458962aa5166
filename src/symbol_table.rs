use std::io::{BufReader, Read};

use tracing::debug;

use crate::error::{HuffmanError, Result};

/// Number of symbols in the 7-bit alphabet.
pub const ALPHABET_SIZE: usize = 128;

/// A symbol and its relative weight. Leaves carry a symbol, merged nodes don't.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolWeight {
    pub symbol: Option<u8>,
    pub weight: f64,
}

impl SymbolWeight {
    pub fn leaf(symbol: u8, weight: f64) -> Self {
        SymbolWeight {
            symbol: Some(symbol),
            weight,
        }
    }

    pub fn internal(weight: f64) -> Self {
        SymbolWeight {
            symbol: None,
            weight,
        }
    }
}

/// Occurrence counts for every symbol of a source.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
    total: u64,
}

impl FrequencyTable {
    /// Counts every symbol of `source` until end of input.
    pub fn scan<R: Read>(source: R) -> Result<Self> {
        let mut counts = [0u64; ALPHABET_SIZE];
        let mut total = 0u64;

        for byte in BufReader::new(source).bytes() {
            let byte = byte?;
            if usize::from(byte) >= ALPHABET_SIZE {
                return Err(HuffmanError::SymbolOutOfRange {
                    byte,
                    offset: total,
                });
            }
            counts[usize::from(byte)] += 1;
            total += 1;
        }

        debug!(total, "scanned source symbols");
        Ok(FrequencyTable { counts, total })
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts.get(usize::from(symbol)).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of symbols that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Leaf records ascending by weight, ties by symbol code.
    ///
    /// A source made of one repeated symbol gets a weight-0 companion leaf
    /// holding the next code (127 wraps to 0) so the tree has two leaves.
    pub fn sorted_leaves(&self) -> Vec<SymbolWeight> {
        let mut leaves = Vec::new();
        if self.total == 0 {
            return leaves;
        }

        let total = self.total as f64;
        for (code, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let symbol = code as u8;
            leaves.push(SymbolWeight::leaf(symbol, count as f64 / total));

            if count == self.total {
                let pad = if usize::from(symbol) == ALPHABET_SIZE - 1 {
                    0
                } else {
                    symbol + 1
                };
                leaves.push(SymbolWeight::leaf(pad, 0.0));
                break;
            }
        }

        // stable sort keeps ascending symbol order among equal weights
        leaves.sort_by(|a, b| a.weight.total_cmp(&b.weight));
        leaves
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn symbols(leaves: &[SymbolWeight]) -> Vec<u8> {
        leaves.iter().filter_map(|l| l.symbol).collect()
    }

    #[test]
    fn counts_and_weights() {
        let table = FrequencyTable::scan(&b"aaab"[..]).unwrap();
        assert_eq!(table.total(), 4);
        assert_eq!(table.count(b'a'), 3);
        assert_eq!(table.count(b'b'), 1);
        assert_eq!(table.distinct(), 2);

        let leaves = table.sorted_leaves();
        assert_eq!(
            leaves,
            vec![SymbolWeight::leaf(b'b', 0.25), SymbolWeight::leaf(b'a', 0.75)]
        );
    }

    #[test]
    fn equal_weights_sort_by_symbol() {
        let table = FrequencyTable::scan(&b"dcbadcba"[..]).unwrap();
        assert_eq!(symbols(&table.sorted_leaves()), b"abcd".to_vec());
    }

    #[test_case(b'a', b'b'; "next code")]
    #[test_case(0, 1; "nul")]
    #[test_case(127, 0; "wraps at end of alphabet")]
    fn singleton_gets_companion_leaf(symbol: u8, companion: u8) {
        let source = vec![symbol; 5];
        let leaves = FrequencyTable::scan(&source[..]).unwrap().sorted_leaves();
        assert_eq!(
            leaves,
            vec![
                SymbolWeight::leaf(companion, 0.0),
                SymbolWeight::leaf(symbol, 1.0)
            ]
        );
    }

    #[test]
    fn empty_source_has_no_leaves() {
        let table = FrequencyTable::scan(&b""[..]).unwrap();
        assert_eq!(table.total(), 0);
        assert!(table.sorted_leaves().is_empty());
    }

    #[test]
    fn rejects_bytes_outside_alphabet() {
        let err = FrequencyTable::scan(&b"ab\xc3\xa9"[..]).unwrap_err();
        assert!(matches!(
            err,
            HuffmanError::SymbolOutOfRange {
                byte: 0xc3,
                offset: 2
            }
        ));
    }
}
