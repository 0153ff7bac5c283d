//! # bytepack
//!
//! Lossless byte-stream compression with two independent codecs: static
//! Huffman entropy coding and LZ77 sliding-window matching. Each codec
//! turns a whole in-memory buffer into one self-describing blob and
//! back; the blob carries everything a decoder needs (frequency table or
//! original size, plus the padding bit count), so no external metadata
//! is required.
//!
//! ## Quick Start
//!
//! ```rust
//! let data = b"abracadabra abracadabra";
//!
//! let blob = bytepack::huffman::compress(data)?;
//! assert_eq!(bytepack::huffman::decompress(&blob)?, data);
//!
//! let blob = bytepack::lz77::compress(data)?;
//! assert_eq!(bytepack::lz77::decompress(&blob)?, data);
//! # Ok::<(), bytepack::CodecError>(())
//! ```
//!
//! Neither codec keeps state between calls; concurrent calls on
//! independent buffers need no coordination.

pub mod error;
pub mod freq;
pub mod huffman;
pub mod hufftree;
pub mod lz77;

// Internal modules - not part of public API
mod bitstream;
mod min_heap;

// Re-export main types for convenience
pub use error::CodecError;
pub use freq::FreqTable;
pub use hufftree::HuffmanTree;

#[cfg(test)]
mod test {
    #[test]
    fn codecs_round_trip_the_same_buffer_independently() {
        let data = b"The quick brown fox jumps over the lazy dog. ".repeat(20);

        let huff = crate::huffman::compress(&data).unwrap();
        let lz = crate::lz77::compress(&data).unwrap();
        assert_ne!(huff, lz);

        assert_eq!(crate::huffman::decompress(&huff).unwrap(), data);
        assert_eq!(crate::lz77::decompress(&lz).unwrap(), data);
    }
}
