use thiserror::Error;

/// Everything that can go wrong while compressing or decompressing.
///
/// All variants abort the current call; no partial output is ever
/// returned. The codecs are pure functions of their input, so none of
/// these failures are transient.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// A fixed-size header field could not be read in full.
    #[error("header truncated while reading {0}")]
    TruncatedHeader(&'static str),

    /// A header field held a value the format does not allow.
    #[error("corrupt header: {0}")]
    CorruptHeader(&'static str),

    /// The bit payload ran out before the declared symbol/byte count
    /// was reached.
    #[error("bit stream exhausted: needed {needed} more bits, {remaining} left")]
    ExhaustedStream { needed: usize, remaining: usize },

    /// An LZ77 back-reference pointed before the start of the decoded
    /// buffer (or had distance zero). The stream is misaligned.
    #[error("corrupt stream: back-reference distance {distance} with only {decoded} bytes decoded")]
    CorruptStream { distance: u16, decoded: usize },

    /// Decoding finished but produced a different amount of data than
    /// the header declared.
    #[error("size mismatch: header declared {expected} bytes, decoded {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A symbol occurred more often than the 4-byte frequency field
    /// can record.
    #[error("symbol {symbol:#04x} occurs {count} times, which overflows the frequency field")]
    CountOverflow { symbol: u8, count: u64 },
}
