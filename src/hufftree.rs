use std::collections::VecDeque;
use std::fmt;
use std::io::Read;

use tracing::debug;

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::symbol_table::{FrequencyTable, SymbolWeight};

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Scans `source` and builds its tree. `Ok(None)` for an empty source.
    pub fn from_source<R: Read>(source: R) -> Result<Option<Self>> {
        let leaves = FrequencyTable::scan(source)?.sorted_leaves();
        if leaves.is_empty() {
            return Ok(None);
        }
        HuffmanTree::from_leaves(&leaves).map(Some)
    }

    /// Builds the tree from leaves sorted ascending by weight.
    ///
    /// Leaves drain from one FIFO and merged nodes go to a second one. Merged
    /// weights only grow, so the smallest node is always at one of the two
    /// fronts; equal fronts are taken from the leaf queue.
    pub fn from_leaves(leaves: &[SymbolWeight]) -> Result<Self> {
        if leaves.len() < 2 {
            return Err(HuffmanError::InsufficientSymbols {
                found: leaves.len(),
            });
        }

        let mut singles = leaves
            .iter()
            .enumerate()
            .map(|(index, record)| HuffNode::from_record(index, record))
            .collect::<Result<VecDeque<HuffNode>>>()?;
        let mut merged: VecDeque<HuffNode> = VecDeque::with_capacity(leaves.len() - 1);

        while !(singles.is_empty() && merged.len() == 1) {
            let first = take_lightest(&mut singles, &mut merged)?;
            let second = take_lightest(&mut singles, &mut merged)?;
            merged.push_back(HuffNode::merge(first, second));
        }

        let root = merged
            .pop_front()
            .ok_or(HuffmanError::InsufficientSymbols { found: 0 })?;
        let tree = HuffmanTree { root };
        debug!(
            leaves = leaves.len(),
            depth = tree.depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    pub fn generate_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        self.root.generate_table(&mut table, &mut String::new());
        table
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Walks the tree bit by bit, emitting a symbol at every leaf.
    pub fn decode_bits(&self, bits: &str) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        let mut current_node = &self.root;
        let mut depth = 0;

        for (position, bit) in bits.chars().enumerate() {
            let (left, right) = match current_node {
                HuffNode::Internal { left, right, .. } => (left, right),
                // a leaf root only happens for single-leaf trees, which
                // from_leaves never builds
                HuffNode::Leaf { .. } => {
                    return Err(HuffmanError::InsufficientSymbols { found: 1 })
                }
            };

            current_node = match bit {
                '0' => left,
                '1' => right,
                character => {
                    return Err(HuffmanError::InvalidBitCharacter {
                        character,
                        position,
                    })
                }
            };
            depth += 1;

            if let HuffNode::Leaf { symbol, .. } = current_node {
                result.push(*symbol);
                current_node = &self.root;
                depth = 0;
            }
        }

        if depth != 0 {
            return Err(HuffmanError::TruncatedStream {
                consumed_bits: bits.len(),
                depth,
            });
        }

        Ok(result)
    }
}

fn take_lightest(
    singles: &mut VecDeque<HuffNode>,
    merged: &mut VecDeque<HuffNode>,
) -> Result<HuffNode> {
    let from_singles = match (singles.front(), merged.front()) {
        (Some(s), Some(t)) => s.weight() <= t.weight(),
        (Some(_), None) => true,
        (None, _) => false,
    };
    let node = if from_singles {
        singles.pop_front()
    } else {
        merged.pop_front()
    };
    node.ok_or(HuffmanError::InsufficientSymbols { found: 1 })
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        self.root.fmt_node(f, 0, "root")
    }
}

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: f64,
        symbol: u8,
    },
    Internal {
        weight: f64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn new(symbol: u8, weight: f64) -> Self {
        HuffNode::Leaf { weight, symbol }
    }

    fn from_record(index: usize, record: &SymbolWeight) -> Result<Self> {
        match record.symbol {
            Some(symbol) => Ok(HuffNode::new(symbol, record.weight)),
            None => Err(HuffmanError::LeafWithoutSymbol { index }),
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// The node's symbol-weight record; internal nodes carry no symbol.
    pub fn record(&self) -> SymbolWeight {
        match self {
            HuffNode::Leaf { weight, symbol } => SymbolWeight::leaf(*symbol, *weight),
            HuffNode::Internal { weight, .. } => SymbolWeight::internal(*weight),
        }
    }

    pub fn merge(a: Self, b: Self) -> Self {
        // a is the lighter node and goes left
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn generate_table(&self, code_table: &mut CodeTable, path: &mut String) {
        match self {
            HuffNode::Leaf { symbol, .. } => {
                code_table.insert(*symbol, path.clone());
            }
            HuffNode::Internal { left, right, .. } => {
                path.push('0');
                left.generate_table(code_table, path);
                path.pop();

                path.push('1');
                right.generate_table(code_table, path);
                path.pop();
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let record = self.record();
        match record.symbol {
            Some(symbol) => writeln!(
                f,
                "{}{}-> Leaf: {:?} ({}) [weight: {:.4}]",
                indent, label, symbol as char, symbol, record.weight
            ),
            None => {
                writeln!(f, "{}{}-> Internal [weight: {:.4}]", indent, label, record.weight)?;
                if let HuffNode::Internal { left, right, .. } = self {
                    left.fmt_node(f, depth + 1, "L")?;
                    right.fmt_node(f, depth + 1, "R")?;
                }
                Ok(())
            }
        }
    }
}
