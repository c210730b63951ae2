//! Bit-granular I/O over byte sinks and sources.
//!
//! A stream starts with a [`HEADER_LEN`]-byte big-endian count of the meaningful bits, followed by
//! the bits themselves packed MSB-first; the padding of the last byte is zero. The count is what
//! tells the reader where the data ends and the padding begins.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

/// Size in bytes of the bit count that prefixes every stream.
pub const HEADER_LEN: usize = std::mem::size_of::<u64>();

/// Number of bytes a stream of `bits` meaningful bits occupies, header included.
pub fn stream_len(bits: u64) -> u64 {
    HEADER_LEN as u64 + bits.div_ceil(8)
}
