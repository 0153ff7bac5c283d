//! Static Huffman codec with a self-describing container.
//!
//! Container layout (big-endian):
//!
//! | field            | size    |
//! |------------------|---------|
//! | padding bits     | 1 byte  |
//! | distinct symbols | 2 bytes |
//! | symbol + count   | 5 bytes each |
//! | packed payload   | rest    |
//!
//! The frequency entries are enough to rebuild the exact tree the
//! encoder used, so the blob needs no external metadata. There is no
//! magic number; which codec a blob belongs to is the caller's
//! convention (file extension, originally).

use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::bitstream::{BitReader, BitWriter};
use crate::error::CodecError;
use crate::freq::FreqTable;
use crate::hufftree::HuffmanTree;

/// Compresses `data` into a self-contained Huffman blob.
///
/// An empty input produces the 3-byte zero-entry header and no payload.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let freq = FreqTable::from_bytes(data);
    let tree = HuffmanTree::from_frequencies(&freq);
    let table = tree.code_table();

    let mut writer = BitWriter::new();
    for &byte in data {
        let &(code, length) = table.get(&byte).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("byte {byte:#04x} missing from code table"),
            )
        })?;
        // Codes can exceed the 32-bit write width on skewed trees, so
        // they go out one bit at a time, most significant first.
        for bit_pos in (0..length).rev() {
            writer.write_bits(((code >> bit_pos) & 1) as u32, 1);
        }
    }
    let (payload, padding) = writer.finish();

    let mut blob = Vec::with_capacity(3 + freq.distinct() * 5 + payload.len());
    blob.write_u8(padding)?;
    blob.write_u16::<BigEndian>(freq.distinct() as u16)?;
    for (symbol, count) in freq.entries() {
        let field = u32::try_from(count)
            .map_err(|_| CodecError::CountOverflow { symbol, count })?;
        blob.write_u8(symbol)?;
        blob.write_u32::<BigEndian>(field)?;
    }
    blob.extend_from_slice(&payload);

    debug!(
        "huffman: {} bytes in, {} bytes out ({} distinct symbols)",
        data.len(),
        blob.len(),
        freq.distinct()
    );
    Ok(blob)
}

/// Decompresses a blob produced by [`compress`].
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut cursor = Cursor::new(blob);

    let padding = cursor
        .read_u8()
        .map_err(|_| CodecError::TruncatedHeader("padding bits"))?;
    if padding > 7 {
        return Err(CodecError::CorruptHeader("padding bits out of range"));
    }

    let entry_count = cursor
        .read_u16::<BigEndian>()
        .map_err(|_| CodecError::TruncatedHeader("distinct symbol count"))?;
    if entry_count > 256 {
        return Err(CodecError::CorruptHeader("more than 256 distinct symbols"));
    }

    let mut freq = FreqTable::new();
    for _ in 0..entry_count {
        let symbol = cursor
            .read_u8()
            .map_err(|_| CodecError::TruncatedHeader("frequency entry symbol"))?;
        let count = cursor
            .read_u32::<BigEndian>()
            .map_err(|_| CodecError::TruncatedHeader("frequency entry count"))?;
        freq.set(symbol, count as u64);
    }

    let total = freq.total() as usize;
    let payload = &blob[cursor.position() as usize..];
    debug!("huffman: rebuilding {total} symbols from a {entry_count}-entry header");

    let mut output = Vec::with_capacity(total);
    if total == 0 {
        return Ok(output);
    }

    let tree = HuffmanTree::from_frequencies(&freq);
    let root = tree
        .root()
        .ok_or(CodecError::CorruptHeader("no symbols to rebuild the tree"))?;
    let mut reader = BitReader::new(payload, padding);

    if let Some(symbol) = tree.node(root).symbol {
        // Single-symbol tree: each occurrence was coded as the bit "0".
        while output.len() < total {
            reader.read_bits(1)?;
            output.push(symbol);
        }
    } else {
        while output.len() < total {
            let mut index = root;
            loop {
                let node = tree.node(index);
                if let Some(symbol) = node.symbol {
                    output.push(symbol);
                    break;
                }
                let bit = reader.read_bits(1)?;
                let next = if bit == 1 { node.right } else { node.left };
                index = next.ok_or(CodecError::CorruptHeader("malformed tree"))?;
            }
        }
    }

    if output.len() != total {
        return Err(CodecError::SizeMismatch {
            expected: total,
            actual: output.len(),
        });
    }
    Ok(output)
}

/// Reads `input`, compresses it, writes the blob to `output`.
pub fn compress_file<P, Q>(input: P, output: Q) -> Result<(), CodecError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let data = fs::read(input)?;
    let blob = compress(&data)?;
    fs::write(output, blob)?;
    Ok(())
}

/// Reads a compressed blob from `input` and writes the original bytes
/// to `output`.
pub fn decompress_file<P, Q>(input: P, output: Q) -> Result<(), CodecError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let blob = fs::read(input)?;
    let data = decompress(&blob)?;
    fs::write(output, data)?;
    Ok(())
}
