use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use bitvec::prelude::*;

use crate::bitio::HEADER_LEN;
use crate::{Error, Result};

/// Reads back, one at a time, the bits written by a [`BitWriter`](super::BitWriter).
pub struct BitReader<R: Read> {
    source: R,

    /// The number of meaningful bits, as declared by the header.
    total_bits: u64,

    bits_read: u64,

    /// The byte being consumed.
    current: u8,

    /// Index, MSB-first, of the next bit of `current`.
    next: usize,
}

impl BitReader<BufReader<File>> {
    /// Opens the bit stream stored in the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::source_unavailable(path, e))?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read> BitReader<R> {
    /// Reads the header of the stream from `source`.
    pub fn new(mut source: R) -> Result<Self> {
        let mut header = [0_u8; HEADER_LEN];
        source.read_exact(&mut header).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::StreamTruncated { bits_read: 0 },
            _ => Error::SourceCorrupt(e),
        })?;

        Ok(Self {
            source,
            total_bits: u64::from_be_bytes(header),
            bits_read: 0,
            current: 0,
            next: u8::BITS as usize,
        })
    }

    /// Returns the next bit, or `None` when all the meaningful bits have been read.
    ///
    /// Fails with [`Error::StreamTruncated`] if the source ends before the number of bits declared
    /// in the header.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_read == self.total_bits {
            return Ok(None);
        }

        if self.next == u8::BITS as usize {
            let mut byte = [0_u8; 1];
            self.source.read_exact(&mut byte).map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::StreamTruncated {
                    bits_read: self.bits_read,
                },
                _ => Error::SourceCorrupt(e),
            })?;
            self.current = byte[0];
            self.next = 0;
        }

        let bit = self.current.view_bits::<Msb0>()[self.next];
        self.next += 1;
        self.bits_read += 1;
        Ok(Some(bit))
    }

    /// The number of meaningful bits declared by the header.
    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    /// The number of bits returned so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }
}
