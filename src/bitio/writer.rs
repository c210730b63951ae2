use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use bitvec::prelude::*;

use crate::bitio::HEADER_LEN;
use crate::{Error, Result};

/// Writes single bits, MSB-first, into a byte sink.
///
/// The stream is finalized by [`close`](Self::close), which writes the last, partially filled
/// byte and stores the number of meaningful bits in the header. A writer that is dropped without
/// being closed finalizes itself, ignoring any error.
///
/// The header only declares bits that reached the sink: a bit whose byte could not be written is
/// not counted, so a stream cut short by a failed write still reads back up to the failure.
pub struct BitWriter<W: Write + Seek> {
    /// The sink. It is `None` only once the writer has been closed.
    sink: Option<W>,

    /// Position of the header in the sink.
    header_pos: u64,

    /// The byte being filled.
    pending: BitArray<[u8; 1], Msb0>,

    /// How many bits of `pending` are meaningful.
    filled: usize,

    /// The number of bits stored in bytes already handed to the sink.
    flushed: u64,
}

impl BitWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and starts a bit stream in it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::sink_unavailable(path, e))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write + Seek> BitWriter<W> {
    /// Starts a bit stream at the current position of `sink`, reserving the room for its header.
    pub fn new(mut sink: W) -> Result<Self> {
        let header_pos = sink.stream_position().map_err(Error::SinkCorrupt)?;
        sink.write_all(&[0; HEADER_LEN]).map_err(Error::SinkCorrupt)?;

        Ok(Self {
            sink: Some(sink),
            header_pos,
            pending: BitArray::ZERO,
            filled: 0,
            flushed: 0,
        })
    }

    /// Appends a bit to the stream.
    ///
    /// If the byte completed by `bit` cannot be written, `bit` is discarded and the bits before
    /// it stay pending.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.pending.set(self.filled, bit);
        self.filled += 1;

        if self.filled == u8::BITS as usize {
            if let Err(e) = self.flush_pending() {
                self.filled -= 1;
                self.pending.set(self.filled, false);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Appends all the bits of `bits`, in order.
    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// The number of meaningful bits written so far, pending ones included.
    pub fn bits_written(&self) -> u64 {
        self.flushed + self.filled as u64
    }

    /// Finalizes the stream and hands back the sink.
    pub fn close(mut self) -> Result<W> {
        let finished = self.finish();
        let sink = self.sink.take();
        finished?;
        sink.ok_or_else(|| Error::SinkCorrupt(io::ErrorKind::NotConnected.into()))
    }

    /// Writes `pending` to the sink, zero padding included.
    fn flush_pending(&mut self) -> Result<()> {
        let byte = self.pending.into_inner();
        self.sink_mut()?.write_all(&byte).map_err(Error::SinkCorrupt)?;

        self.flushed += self.filled as u64;
        self.pending = BitArray::ZERO;
        self.filled = 0;
        Ok(())
    }

    /// Writes the last byte, then the header. The header is written even if the last byte is
    /// not, and the first error is returned.
    fn finish(&mut self) -> Result<()> {
        let padded = match self.filled {
            0 => Ok(()),
            _ => self.flush_pending(),
        };

        let header_pos = self.header_pos;
        let header = self.flushed.to_be_bytes();
        let sealed =
            write_header(self.sink_mut()?, header_pos, &header).map_err(Error::SinkCorrupt);

        padded.and(sealed)
    }

    fn sink_mut(&mut self) -> Result<&mut W> {
        self.sink
            .as_mut()
            .ok_or_else(|| Error::SinkCorrupt(io::ErrorKind::NotConnected.into()))
    }
}

fn write_header<W: Write + Seek>(sink: &mut W, pos: u64, header: &[u8]) -> io::Result<()> {
    sink.seek(SeekFrom::Start(pos))?;
    sink.write_all(header)?;
    sink.seek(SeekFrom::End(0))?;
    sink.flush()
}

impl<W: Write + Seek> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            let _ = self.finish();
        }
    }
}
