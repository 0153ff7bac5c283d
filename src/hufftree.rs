use std::collections::BTreeMap;

use crate::freq::FreqTable;
use crate::min_heap::MinHeap;

/// Symbol -> (code bits, code length in bits).
///
/// Codes are accumulated left-to-right into the low bits of the `u64`,
/// so the most significant code bit is at position `length - 1`. A
/// maximally skewed tree built from 4-byte frequency fields stays under
/// 60 bits deep (depth d needs Fibonacci-scale weights), so `u64` is
/// wide enough where `u32` would not be.
pub type CodeTable = BTreeMap<u8, (u64, usize)>;

/// One node in the tree arena. Leaves carry `symbol = Some` and no
/// children; internal nodes carry both children and the summed weight.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub symbol: Option<u8>,
    pub weight: u64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Heap ordering key for tree construction: weight first, then insertion
/// sequence, so equal-weight ties always go to the first-inserted node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    weight: u64,
    seq: u32,
    index: usize,
}

/// A static Huffman tree stored as an arena of index-linked nodes.
///
/// Nodes are owned by the arena rather than boxed into each other, so
/// there is no recursive ownership to manage and no recursion needed to
/// traverse; an empty frequency table yields a rootless tree.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl HuffmanTree {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_frequencies(&FreqTable::from_bytes(data))
    }

    /// Builds the tree by repeatedly merging the two lowest-weight nodes
    /// until one remains. Leaves are seeded in ascending symbol order;
    /// `distinct - 1` merges follow.
    pub fn from_frequencies(freq: &FreqTable) -> Self {
        let mut nodes = Vec::with_capacity(freq.distinct() * 2);
        let mut heap = MinHeap::with_capacity(freq.distinct());
        let mut seq = 0u32;

        for (symbol, count) in freq.entries() {
            let index = nodes.len();
            nodes.push(Node {
                symbol: Some(symbol),
                weight: count,
                left: None,
                right: None,
            });
            heap.push(HeapEntry { weight: count, seq, index });
            seq += 1;
        }

        if nodes.is_empty() {
            return HuffmanTree { nodes, root: None };
        }

        while heap.len() > 1 {
            let first = match heap.pop() {
                Some(entry) => entry,
                None => break,
            };
            let second = match heap.pop() {
                Some(entry) => entry,
                None => break,
            };

            let weight = first.weight + second.weight;
            let index = nodes.len();
            nodes.push(Node {
                symbol: None,
                weight,
                left: Some(first.index),
                right: Some(second.index),
            });
            heap.push(HeapEntry { weight, seq, index });
            seq += 1;
        }

        let root = heap.pop().map(|entry| entry.index);
        HuffmanTree { nodes, root }
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// Derives the prefix-free code table: `0` descending left, `1`
    /// descending right. A single-symbol tree has no internal edge to
    /// derive a code from, so that symbol's code is the single bit `0`
    /// by explicit rule.
    ///
    /// The traversal uses an explicit stack; a pathological frequency
    /// distribution can skew the tree up to 255 levels deep, which is
    /// more than recursion should be trusted with.
    pub fn code_table(&self) -> CodeTable {
        let mut table = BTreeMap::new();
        let root = match self.root {
            Some(root) => root,
            None => return table,
        };

        if let Some(symbol) = self.nodes[root].symbol {
            table.insert(symbol, (0, 1));
            return table;
        }

        let mut stack = vec![(root, 0u64, 0usize)];
        while let Some((index, code, depth)) = stack.pop() {
            let node = &self.nodes[index];
            match node.symbol {
                Some(symbol) => {
                    table.insert(symbol, (code, depth));
                }
                None => {
                    if let Some(right) = node.right {
                        stack.push((right, (code << 1) | 1, depth + 1));
                    }
                    if let Some(left) = node.left {
                        stack.push((left, code << 1, depth + 1));
                    }
                }
            }
        }
        table
    }
}
