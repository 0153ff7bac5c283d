use crate::error::CodecError;

/// Accumulates bits MSB-first into a byte buffer.
///
/// Partial bytes are buffered across calls; `finish` zero-pads the last
/// byte and reports how many padding bits it added so a reader can stop
/// short of them.
#[derive(Default, Debug)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8; // which byte is target?
        let bit_offset = self.bit_count % 8; // which bit position is target?

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }

        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends the `width` least-significant bits of `value`, most
    /// significant first. `width` must be in `1..=32`.
    pub fn write_bits(&mut self, value: u32, width: usize) {
        debug_assert!((1..=32).contains(&width));
        for bit_pos in (0..width).rev() {
            self.push_bit((value >> bit_pos) & 1 != 0);
        }
    }

    /// Consumes the writer, returning the packed bytes and the number of
    /// zero bits (0..=7) padding the final byte.
    pub fn finish(self) -> (Vec<u8>, u8) {
        // push_bit only ever sets bits, so the tail of a partial byte is
        // already zero; the padding just needs to be counted.
        let padding = (8 - self.bit_count % 8) % 8;
        (self.bytes, padding as u8)
    }
}

/// Reads bits MSB-first from a byte slice up to a declared logical end.
///
/// The cursor is plain offset arithmetic (`pos / 8`, `pos % 8`) so both
/// codecs get identical bit semantics.
#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    limit: usize,
}

impl<'a> BitReader<'a> {
    /// `padding_bits` is the count declared by the container header; bits
    /// past `len * 8 - padding_bits` are never served.
    pub fn new(bytes: &'a [u8], padding_bits: u8) -> Self {
        BitReader {
            bytes,
            pos: 0,
            limit: (bytes.len() * 8).saturating_sub(padding_bits as usize),
        }
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.pos
    }

    /// Consumes `width` bits (1..=32) and returns them right-aligned.
    pub fn read_bits(&mut self, width: usize) -> Result<u32, CodecError> {
        debug_assert!((1..=32).contains(&width));
        if self.pos + width > self.limit {
            return Err(CodecError::ExhaustedStream {
                needed: width,
                remaining: self.remaining(),
            });
        }

        let mut value = 0u32;
        for _ in 0..width {
            let byte_index = self.pos / 8;
            let bit_offset = self.pos % 8;
            let bit = (self.bytes[byte_index] >> (7 - bit_offset)) & 1;
            value = (value << 1) | bit as u32;
            self.pos += 1;
        }
        Ok(value)
    }
}
