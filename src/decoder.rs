use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::ptr;

use log::debug;

use crate::bitio::BitReader;
use crate::tree::Tree;
use crate::{Error, Result};

/// What a [`Decoder`] produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// The number of bits consumed.
    pub bits: u64,

    /// The number of symbols written to the sink.
    pub symbols: u64,
}

/// Turns a bit stream back into symbols by walking the [`Tree`] that encoded it.
pub struct Decoder<'a> {
    /// The root of the tree, `None` if the encoded input was empty.
    root: Option<&'a Tree>,
}

impl<'a> Decoder<'a> {
    pub fn new(root: Option<&'a Tree>) -> Self {
        Self { root }
    }

    /// Decodes the bit stream read from `source`, writing the symbols to `sink`.
    ///
    /// Starting from the root, every `0` moves to the left child and every `1` to the right one;
    /// reaching a leaf emits its symbol and goes back to the root. The stream must end at the root:
    /// stopping half-way down the tree means that the stream lost the tail of its last codeword.
    pub fn decode<R: Read, W: Write>(&self, source: R, sink: W) -> Result<DecodeSummary> {
        self.decode_stream(BitReader::new(source)?, sink)
    }

    fn decode_stream<R: Read, W: Write>(
        &self,
        mut reader: BitReader<R>,
        sink: W,
    ) -> Result<DecodeSummary> {
        let mut out = BufWriter::new(sink);
        let mut symbols = 0_u64;

        match self.root {
            Some(Tree::Leaf { symbol, .. }) => {
                // every bit stands for the only symbol
                while reader.read_bit()?.is_some() {
                    out.write_all(&[*symbol]).map_err(Error::SinkCorrupt)?;
                    symbols += 1;
                }
            }
            Some(root) => {
                let mut cursor = root;

                while let Some(bit) = reader.read_bit()? {
                    // the cursor never rests on a leaf, so both children exist
                    let child = if bit { cursor.right() } else { cursor.left() };
                    cursor = child.ok_or(Error::StreamUnexpectedBit {
                        bits_read: reader.bits_read(),
                    })?;

                    if let Tree::Leaf { symbol, .. } = cursor {
                        out.write_all(&[*symbol]).map_err(Error::SinkCorrupt)?;
                        symbols += 1;
                        cursor = root;
                    }
                }

                if !ptr::eq(cursor, root) {
                    return Err(Error::StreamTruncated {
                        bits_read: reader.bits_read(),
                    });
                }
            }
            None => {
                if reader.read_bit()?.is_some() {
                    return Err(Error::StreamUnexpectedBit { bits_read: 1 });
                }
            }
        }

        out.flush().map_err(Error::SinkCorrupt)?;

        let bits = reader.bits_read();
        debug!("Decoded {} bits into {} symbols", bits, symbols);
        Ok(DecodeSummary { bits, symbols })
    }

    /// Decodes the file at `input` into the file at `output`, which is created or truncated.
    pub fn decode_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<DecodeSummary> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let reader = BitReader::open(input)?;
        let sink = File::create(output).map_err(|e| Error::sink_unavailable(output, e))?;

        self.decode_stream(reader, sink)
    }
}
