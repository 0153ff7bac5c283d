/// Occurrence counts for every byte value in a buffer.
///
/// Counters are 64-bit so counting itself can never overflow; the
/// Huffman container's 4-byte frequency field is checked when the header
/// is written, not here. Iteration over present symbols is always in
/// ascending byte order, which keeps tree construction deterministic on
/// both the encode and decode paths.
#[derive(Debug, Clone)]
pub struct FreqTable {
    counts: [u64; 256],
}

impl FreqTable {
    pub fn new() -> Self {
        FreqTable { counts: [0; 256] }
    }

    /// Counts every byte in `data` in a single pass.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = FreqTable::new();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Replaces the count for `byte`. Used when rebuilding the table
    /// from a container header; a repeated symbol entry overwrites the
    /// earlier one.
    pub fn set(&mut self, byte: u8, count: u64) {
        self.counts[byte as usize] = count;
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of symbol occurrences.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Present symbols with their counts, in ascending byte order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }
}

impl Default for FreqTable {
    fn default() -> Self {
        Self::new()
    }
}
