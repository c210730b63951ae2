use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

use log::debug;

use crate::bitio::BitWriter;
use crate::codebook::CodeBook;
use crate::{Error, Result};

/// What an [`Encoder`] produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeSummary {
    /// The number of symbols read from the source.
    pub symbols: u64,

    /// The number of meaningful bits written to the sink.
    pub bits: u64,
}

/// Writes the codewords of a [`CodeBook`] for every symbol of a source.
///
/// The codebook must come from the same input: this is the second of the two passes over it.
pub struct Encoder<'a> {
    codebook: &'a CodeBook,
}

impl<'a> Encoder<'a> {
    pub fn new(codebook: &'a CodeBook) -> Self {
        Self { codebook }
    }

    /// Encodes the whole `source` into a bit stream written to `sink`.
    ///
    /// The stream is finalized even when encoding fails half-way, so that every bit that reached
    /// the sink before the failure can be read back. The first error is the one returned.
    pub fn encode<R: Read, W: Write + Seek>(&self, source: R, sink: W) -> Result<EncodeSummary> {
        self.encode_stream(source, BitWriter::new(sink)?)
    }

    fn encode_stream<R: Read, W: Write + Seek>(
        &self,
        source: R,
        mut writer: BitWriter<W>,
    ) -> Result<EncodeSummary> {
        let encoded = self.encode_symbols(source, &mut writer);
        let bits = writer.bits_written();
        let closed = writer.close();

        let symbols = encoded?;
        closed?;

        debug!("Encoded {} symbols into {} bits", symbols, bits);
        Ok(EncodeSummary { symbols, bits })
    }

    fn encode_symbols<R: Read, W: Write + Seek>(
        &self,
        source: R,
        writer: &mut BitWriter<W>,
    ) -> Result<u64> {
        let mut offset = 0_u64;

        for byte in BufReader::new(source).bytes() {
            let symbol = byte.map_err(Error::SourceCorrupt)?;
            let code = self
                .codebook
                .get(symbol)
                .ok_or(Error::SymbolUnencodable { symbol, offset })?;

            writer.write_bits(code)?;
            offset += 1;
        }
        Ok(offset)
    }

    /// Encodes the file at `input` into the file at `output`, which is created or truncated.
    pub fn encode_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<EncodeSummary> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let source = File::open(input).map_err(|e| Error::source_unavailable(input, e))?;
        let writer = BitWriter::create(output)?;

        self.encode_stream(source, writer)
    }
}
