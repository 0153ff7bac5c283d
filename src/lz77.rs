//! LZ77 codec: sliding-window matching over a packed token bit stream.
//!
//! Container layout (big-endian): 8-byte original size, 1-byte padding
//! bit count, then the token payload. Tokens are MSB-first:
//!
//! - Literal: flag `0` + 8-bit byte (9 bits).
//! - Match: flag `1` + 12-bit distance + 4-bit `length - 3`, then an
//!   8-bit trailing literal *only* when bytes remained after the match.
//!
//! The trailing literal is not flagged in the stream; the decoder
//! recomputes the encoder's `decoded + length < original_size` condition
//! to know whether those 8 bits exist. Both sides must agree exactly or
//! the stream misaligns.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use crate::bitstream::{BitReader, BitWriter};
use crate::error::CodecError;

/// Matches are sourced at most this far behind the current position;
/// the distance must fit in 12 bits and 0 is reserved as "no match".
pub const SEARCH_WINDOW: usize = 4095;
/// Longest run a single match token can cover.
pub const LOOKAHEAD: usize = 15;
/// Shorter matches cost more than the literals they replace.
pub const MIN_MATCH: usize = 3;

/// Longest match for the bytes at `pos`, searched over the window
/// `data[pos - SEARCH_WINDOW..pos]`. Returns `(distance, length)` or
/// `None` when nothing reaches [`MIN_MATCH`].
///
/// The comparison runs over the underlying buffer, so a match source may
/// overlap the region being encoded (distance < length); the decoder's
/// byte-at-a-time copy reproduces exactly that. Ties keep the first
/// candidate found scanning the window left to right, i.e. the farthest
/// one — only a strictly longer match displaces the current best.
fn longest_match(data: &[u8], pos: usize) -> Option<(u16, u8)> {
    let lookahead = LOOKAHEAD.min(data.len() - pos);
    if lookahead < MIN_MATCH {
        return None;
    }

    let window_start = pos.saturating_sub(SEARCH_WINDOW);
    let first = data[pos];
    let mut best_length = 0usize;
    let mut best_distance = 0usize;

    for start in window_start..pos {
        if data[start] != first {
            continue;
        }
        let mut length = 0;
        while length < lookahead && data[start + length] == data[pos + length] {
            length += 1;
        }
        if length > best_length {
            best_length = length;
            best_distance = pos - start;
        }
    }

    if best_length < MIN_MATCH {
        None
    } else {
        Some((best_distance as u16, best_length as u8))
    }
}

/// Compresses `data` into a self-contained LZ77 blob.
///
/// An empty input produces the 9-byte header (size 0) and no payload.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let n = data.len();
    let mut writer = BitWriter::new();
    let mut tokens = 0usize;
    let mut i = 0;

    while i < n {
        match longest_match(data, i) {
            Some((distance, length)) => {
                writer.write_bits(1, 1);
                writer.write_bits(distance as u32, 12);
                writer.write_bits((length as usize - MIN_MATCH) as u32, 4);

                let mut advance = length as usize;
                // The trailing literal exists only when the match did
                // not consume the rest of the input.
                if i + advance < n {
                    writer.write_bits(data[i + advance] as u32, 8);
                    advance += 1;
                }
                i += advance;
            }
            None => {
                writer.write_bits(0, 1);
                writer.write_bits(data[i] as u32, 8);
                i += 1;
            }
        }
        tokens += 1;
    }

    let (payload, padding) = writer.finish();
    let mut blob = Vec::with_capacity(9 + payload.len());
    blob.write_u64::<BigEndian>(n as u64)?;
    blob.write_u8(padding)?;
    blob.extend_from_slice(&payload);

    debug!("lz77: {} bytes in, {} bytes out ({tokens} tokens)", n, blob.len());
    Ok(blob)
}

/// Decompresses a blob produced by [`compress`].
pub fn decompress(blob: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut cursor = Cursor::new(blob);

    let original_size = cursor
        .read_u64::<BigEndian>()
        .map_err(|_| CodecError::TruncatedHeader("original size"))?
        as usize;
    let padding = cursor
        .read_u8()
        .map_err(|_| CodecError::TruncatedHeader("padding bits"))?;
    if padding > 7 {
        return Err(CodecError::CorruptHeader("padding bits out of range"));
    }

    let payload = &blob[cursor.position() as usize..];
    let mut reader = BitReader::new(payload, padding);
    let mut output = Vec::with_capacity(original_size);
    debug!("lz77: restoring {original_size} bytes from {} payload bytes", payload.len());

    while output.len() < original_size {
        let flag = reader.read_bits(1)?;

        if flag == 0 {
            let literal = reader.read_bits(8)?;
            output.push(literal as u8);
            continue;
        }

        let distance = reader.read_bits(12)? as u16;
        let length = reader.read_bits(4)? as usize + MIN_MATCH;

        // Mirrors the encoder's emission condition bit for bit; there is
        // no flag distinguishing the two match-token widths.
        let trailing = if output.len() + length < original_size {
            Some(reader.read_bits(8)? as u8)
        } else {
            None
        };

        if distance == 0 || distance as usize > output.len() {
            return Err(CodecError::CorruptStream {
                distance,
                decoded: output.len(),
            });
        }

        // Byte at a time: with distance < length the copy reads bytes
        // it just appended.
        let mut src = output.len() - distance as usize;
        for _ in 0..length {
            if output.len() >= original_size {
                break;
            }
            let byte = output[src];
            output.push(byte);
            src += 1;
        }

        if let Some(literal) = trailing {
            if output.len() < original_size {
                output.push(literal);
            }
        }
    }

    if output.len() != original_size {
        return Err(CodecError::SizeMismatch {
            expected: original_size,
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

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn round_trip(data: &[u8]) {
        let blob = compress(data).unwrap();
        assert_eq!(decompress(&blob).unwrap(), data);
    }

    /// Re-parses a blob's payload into (distance, length, trailing) /
    /// literal tokens for structural asserts.
    #[derive(Debug, PartialEq)]
    enum Token {
        Literal(u8),
        Match { distance: u16, length: usize, trailing: Option<u8> },
    }

    fn parse_tokens(blob: &[u8]) -> Vec<Token> {
        let original_size = u64::from_be_bytes(blob[..8].try_into().unwrap()) as usize;
        let padding = blob[8];
        let mut reader = BitReader::new(&blob[9..], padding);
        let mut tokens = Vec::new();
        let mut decoded = 0usize;

        while decoded < original_size {
            if reader.read_bits(1).unwrap() == 0 {
                tokens.push(Token::Literal(reader.read_bits(8).unwrap() as u8));
                decoded += 1;
            } else {
                let distance = reader.read_bits(12).unwrap() as u16;
                let length = reader.read_bits(4).unwrap() as usize + MIN_MATCH;
                let trailing = if decoded + length < original_size {
                    Some(reader.read_bits(8).unwrap() as u8)
                } else {
                    None
                };
                decoded += length + trailing.map_or(0, |_| 1);
                tokens.push(Token::Match { distance, length, trailing });
            }
        }
        tokens
    }

    #[test]
    fn matcher_ignores_short_runs() {
        // Empty window at position 0.
        assert_eq!(longest_match(b"ababab", 0), None);
        // Fewer than MIN_MATCH lookahead bytes remain.
        assert_eq!(longest_match(b"aaaa", 2), None);
        // Longest common prefix stops at 2, below MIN_MATCH.
        assert_eq!(longest_match(b"abxaby", 3), None);
    }

    #[test]
    fn matcher_finds_repeats() {
        //           0123456789
        let data = b"abcdefabcdef";
        let (distance, length) = longest_match(data, 6).unwrap();
        assert_eq!(distance, 6);
        assert_eq!(length, 6);
    }

    #[test]
    fn matcher_allows_overlapping_source() {
        let data = b"ABABABAB";
        let (distance, length) = longest_match(data, 2).unwrap();
        assert_eq!(distance, 2);
        assert_eq!(length, 6);
    }

    #[test]
    fn matcher_ties_keep_the_farthest_candidate() {
        // "abc" appears at 0 and 4; the lookahead at 8 matches both with
        // equal length. The left-to-right scan keeps index 0.
        let data = b"abcxabcxabc";
        let (distance, length) = longest_match(data, 8).unwrap();
        assert_eq!(length, 3);
        assert_eq!(distance, 8);
    }

    #[test]
    fn abababab_token_sequence() {
        let blob = compress(b"ABABABAB").unwrap();
        let tokens = parse_tokens(&blob);
        assert_eq!(
            tokens,
            vec![
                Token::Literal(b'A'),
                Token::Literal(b'B'),
                Token::Match { distance: 2, length: 6, trailing: None },
            ]
        );
        assert_eq!(decompress(&blob).unwrap(), b"ABABABAB");
    }

    #[test]
    fn match_tokens_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(0x4C5A3737);
        let data: Vec<u8> = (0..5000).map(|_| rng.gen_range(b'a'..=b'd')).collect();
        let blob = compress(&data).unwrap();
        for token in parse_tokens(&blob) {
            if let Token::Match { distance, length, .. } = token {
                assert!((1..=4095).contains(&distance));
                assert!((MIN_MATCH..=18).contains(&length));
            }
        }
        assert_eq!(decompress(&blob).unwrap(), data);
    }

    #[test]
    fn empty_input_is_a_nine_byte_header() {
        let blob = compress(b"").unwrap();
        assert_eq!(blob, vec![0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(decompress(&blob).unwrap().is_empty());
    }

    #[test]
    fn round_trips_basics() {
        round_trip(b"a");
        round_trip(b"ab");
        round_trip(&[0x55; 1000]);
        round_trip(b"the quick brown fox jumps over the lazy dog. ".repeat(40).as_slice());
    }

    #[test]
    fn round_trips_all_256_values() {
        let data: Vec<u8> = (0..=255u8).collect();
        round_trip(&data);
    }

    #[test]
    fn round_trips_random_binary() {
        let mut rng = StdRng::seed_from_u64(0xB17E);
        for len in [1, 17, 100, 4095, 4096, 10_000] {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            round_trip(&data);
        }
    }

    #[test]
    fn round_trips_window_spanning_repetition() {
        // Repeats spaced wider than the window still compress (as
        // literals) and must survive the trip.
        let mut data = vec![b'x'; 4100];
        data.extend_from_slice(b"needle");
        data.extend(vec![b'y'; 4100]);
        data.extend_from_slice(b"needle");
        round_trip(&data);
    }

    #[test]
    fn decoding_is_idempotent() {
        let blob = compress(b"banana banana banana").unwrap();
        assert_eq!(decompress(&blob).unwrap(), decompress(&blob).unwrap());
    }

    #[test]
    fn truncated_header_fields_are_reported() {
        assert!(matches!(
            decompress(&[0, 0, 0]),
            Err(CodecError::TruncatedHeader("original size"))
        ));
        assert!(matches!(
            decompress(&[0, 0, 0, 0, 0, 0, 0, 9]),
            Err(CodecError::TruncatedHeader("padding bits"))
        ));
    }

    #[test]
    fn truncated_payload_is_exhaustion() {
        let blob = compress(b"banana banana banana").unwrap();
        let cut = &blob[..blob.len() - 2];
        assert!(matches!(
            decompress(cut),
            Err(CodecError::ExhaustedStream { .. })
        ));
    }

    #[test]
    fn zero_distance_is_a_corrupt_stream() {
        // size 3, no padding declared, then a hand-built match token:
        // flag 1, distance 0, length code 0 -> 17 bits over 3 bytes.
        let mut blob = vec![0, 0, 0, 0, 0, 0, 0, 3, 7];
        blob.extend_from_slice(&[0b1000_0000, 0b0000_0000, 0b0000_0000]);
        assert!(matches!(
            decompress(&blob),
            Err(CodecError::CorruptStream { distance: 0, .. })
        ));
    }

    #[test]
    fn distance_past_decoded_length_is_a_corrupt_stream() {
        // One literal 'a', then a match claiming distance 5.
        let mut writer = crate::bitstream::BitWriter::new();
        writer.write_bits(0, 1);
        writer.write_bits(b'a' as u32, 8);
        writer.write_bits(1, 1);
        writer.write_bits(5, 12);
        writer.write_bits(0, 4);
        let (payload, padding) = writer.finish();

        let mut blob = Vec::new();
        blob.extend_from_slice(&4u64.to_be_bytes());
        blob.push(padding);
        blob.extend_from_slice(&payload);
        assert!(matches!(
            decompress(&blob),
            Err(CodecError::CorruptStream { distance: 5, decoded: 1 })
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir();
        let input = dir.join("bytepack_lz_in.bin");
        let packed = dir.join("bytepack_lz_packed.bin");
        let restored = dir.join("bytepack_lz_out.bin");

        let data = b"repetition repetition repetition".to_vec();
        fs::write(&input, &data).unwrap();
        compress_file(&input, &packed).unwrap();
        decompress_file(&packed, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), data);

        for path in [&input, &packed, &restored] {
            let _ = fs::remove_file(path);
        }
    }
}
