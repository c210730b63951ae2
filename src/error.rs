//! Error types for the compression pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Symbol;

/// Result type alias for the compression pipeline.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can make a compression session fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file cannot be opened.
    #[error("cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An output file cannot be created.
    #[error("cannot create {}: {source}", path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read failed after the source was opened.
    #[error("read failed: {0}")]
    SourceCorrupt(#[source] io::Error),

    /// A write failed after the sink was created.
    #[error("write failed: {0}")]
    SinkCorrupt(#[source] io::Error),

    /// The bit stream ended before its declared length, or in the middle of a codeword.
    #[error("bit stream truncated after {bits_read} bits")]
    StreamTruncated { bits_read: u64 },

    /// The decoder was asked to descend to a child the tree does not have.
    #[error("bit {bits_read} leads outside of the code tree")]
    StreamUnexpectedBit { bits_read: u64 },

    /// The input contains a symbol that has no codeword, i.e. it changed between the frequency pass
    /// and the encoding pass.
    #[error("symbol 0x{symbol:02x} at offset {offset} has no codeword")]
    SymbolUnencodable { symbol: Symbol, offset: u64 },

    /// The output paths cannot be derived from the input path.
    #[error("cannot derive output paths from {}", path.display())]
    InvalidPath { path: PathBuf },

    /// The decompressed file differs from the input.
    #[error("decompressed output differs from the input at offset {offset}")]
    RoundTripMismatch { offset: u64 },
}

/// The kind of an [`Error`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SourceUnavailable,
    SinkUnavailable,
    SourceCorrupt,
    SinkCorrupt,
    StreamTruncated,
    StreamUnexpectedBit,
    SymbolUnencodable,
    InvalidPath,
    RoundTripMismatch,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Error::SinkUnavailable { .. } => ErrorKind::SinkUnavailable,
            Error::SourceCorrupt(_) => ErrorKind::SourceCorrupt,
            Error::SinkCorrupt(_) => ErrorKind::SinkCorrupt,
            Error::StreamTruncated { .. } => ErrorKind::StreamTruncated,
            Error::StreamUnexpectedBit { .. } => ErrorKind::StreamUnexpectedBit,
            Error::SymbolUnencodable { .. } => ErrorKind::SymbolUnencodable,
            Error::InvalidPath { .. } => ErrorKind::InvalidPath,
            Error::RoundTripMismatch { .. } => ErrorKind::RoundTripMismatch,
        }
    }

    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn sink_unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::SinkUnavailable {
            path: path.into(),
            source,
        }
    }
}

impl ErrorKind {
    /// A hint for the user, for the kinds that have an obvious remedy.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ErrorKind::SourceUnavailable => {
                Some("Please pick another file and run the program again.")
            }
            ErrorKind::InvalidPath => {
                Some("The input path must end with a four-character extension, such as .txt")
            }
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::SourceUnavailable => "SourceUnavailable",
            ErrorKind::SinkUnavailable => "SinkUnavailable",
            ErrorKind::SourceCorrupt => "SourceCorrupt",
            ErrorKind::SinkCorrupt => "SinkCorrupt",
            ErrorKind::StreamTruncated => "StreamTruncated",
            ErrorKind::StreamUnexpectedBit => "StreamUnexpectedBit",
            ErrorKind::SymbolUnencodable => "SymbolUnencodable",
            ErrorKind::InvalidPath => "InvalidPath",
            ErrorKind::RoundTripMismatch => "RoundTripMismatch",
        };
        f.write_str(name)
    }
}
