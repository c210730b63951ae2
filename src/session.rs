//! The compress, decompress and verify round trip on a file.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, info, warn};

use crate::builder::TreeBuilder;
use crate::codebook::CodeBook;
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::frequency::FrequencyTable;
use crate::{Error, Result};

/// Suffix appended to the stem of the input path to name the compressed file.
pub const COMPRESSED_SUFFIX: &str = "_compressed";

/// Suffix appended to the stem of the input path to name the decompressed file.
pub const DECOMPRESSED_SUFFIX: &str = "_decompressed";

/// How many characters are dropped from the end of the input path to get the stem of the outputs.
const EXTENSION_LEN: usize = 4;

/// Where a session writes its results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub compressed: PathBuf,
    pub decompressed: PathBuf,
}

impl OutputPaths {
    /// Derives the output paths from the input path: its last four characters, assumed to be an
    /// extension such as `.txt`, are replaced by [`COMPRESSED_SUFFIX`] and [`DECOMPRESSED_SUFFIX`].
    ///
    /// `/data/notes.txt` gives `/data/notes_compressed` and `/data/notes_decompressed`.
    pub fn derive(input: impl AsRef<Path>) -> Result<Self> {
        let input = input.as_ref();
        let invalid = || Error::InvalidPath {
            path: input.to_path_buf(),
        };

        let path = input.to_str().ok_or_else(invalid)?;
        let kept = path
            .char_indices()
            .nth_back(EXTENSION_LEN - 1)
            .map(|(index, _)| &path[..index])
            .ok_or_else(invalid)?;

        Ok(Self {
            compressed: PathBuf::from(format!("{}{}", kept, COMPRESSED_SUFFIX)),
            decompressed: PathBuf::from(format!("{}{}", kept, DECOMPRESSED_SUFFIX)),
        })
    }
}

/// What a successful [`Session`] measured.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionReport {
    /// The length of the input, in bytes.
    pub input_bytes: u64,

    /// How many distinct symbols the input contains.
    pub distinct_symbols: usize,

    /// The number of nodes of the code tree, 0 for an empty input.
    pub tree_size: usize,

    /// The number of meaningful bits in the compressed file.
    pub compressed_bits: u64,

    /// The size of the compressed file, header and padding included.
    pub compressed_bytes: u64,

    /// The length of the decompressed file.
    pub decompressed_bytes: u64,

    /// The empirical entropy of the input, in bits per symbol.
    pub entropy: f64,
}

impl SessionReport {
    /// The average number of bits spent per input symbol.
    pub fn bits_per_symbol(&self) -> f64 {
        match self.input_bytes {
            0 => 0.0,
            n => self.compressed_bits as f64 / n as f64,
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} B in, {} B compressed ({} bits), {} B out | {} symbols | {:.3} bits/symbol (entropy {:.3})",
            self.input_bytes,
            self.compressed_bytes,
            self.compressed_bits,
            self.decompressed_bytes,
            self.distinct_symbols,
            self.bits_per_symbol(),
            self.entropy,
        )
    }
}

/// Compresses a file, decompresses the result and checks that it matches the input.
///
/// The code tree lives only as long as [`run`](Self::run): the compressed file does not describe
/// it, so the decompression has to happen in the same session.
#[derive(Clone, Debug)]
pub struct Session {
    input: PathBuf,
    outputs: OutputPaths,
}

impl Session {
    /// Creates a session whose output paths are derived from `input`, see [`OutputPaths::derive`].
    pub fn new(input: impl Into<PathBuf>) -> Result<Self> {
        let input = input.into();
        let outputs = OutputPaths::derive(&input)?;
        Ok(Self::with_paths(input, outputs))
    }

    pub fn with_paths(input: impl Into<PathBuf>, outputs: OutputPaths) -> Self {
        Self {
            input: input.into(),
            outputs,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn outputs(&self) -> &OutputPaths {
        &self.outputs
    }

    /// Runs the whole round trip.
    pub fn run(&self) -> Result<SessionReport> {
        info!("Counting symbols of {}...", self.input.display());
        let table = FrequencyTable::from_path(&self.input)?;
        debug!(
            "Frequencies: {}",
            table
                .iter()
                .map(|(symbol, freq)| format!("{:?}:{}", char::from(symbol), freq))
                .join(" ")
        );

        info!("Building the code tree...");
        let tree = TreeBuilder::new(&table).build();
        if let Some(tree) = &tree {
            debug!("Code tree:\n{}", tree);
        }
        let codebook = CodeBook::from(tree.as_ref());
        debug!("Codebook: {:?}", codebook);

        info!("Compressing into {}...", self.outputs.compressed.display());
        let encoded = Encoder::new(&codebook).encode_file(&self.input, &self.outputs.compressed)?;

        info!(
            "Decompressing into {}...",
            self.outputs.decompressed.display()
        );
        let decoded = Decoder::new(tree.as_ref())
            .decode_file(&self.outputs.compressed, &self.outputs.decompressed)?;

        info!("Verifying the round trip...");
        verify(&self.input, &self.outputs.decompressed)?;

        let compressed_bytes = fs::metadata(&self.outputs.compressed)
            .map_err(Error::SourceCorrupt)?
            .len();

        Ok(SessionReport {
            input_bytes: encoded.symbols,
            distinct_symbols: table.len(),
            tree_size: tree.as_ref().map_or(0, |tree| tree.size()),
            compressed_bits: encoded.bits,
            compressed_bytes,
            decompressed_bytes: decoded.symbols,
            entropy: table.entropy(),
        })
    }

    /// Deletes whatever output files exist. Meant for cleaning up after a failed run.
    pub fn remove_outputs(&self) {
        for path in [&self.outputs.compressed, &self.outputs.decompressed] {
            match fs::remove_file(path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Could not remove {}: {}", path.display(), e),
            }
        }
    }
}

/// Checks that the files at `original` and `copy` have the same content.
pub fn verify(original: impl AsRef<Path>, copy: impl AsRef<Path>) -> Result<()> {
    let (original, copy) = (original.as_ref(), copy.as_ref());
    let original = File::open(original).map_err(|e| Error::source_unavailable(original, e))?;
    let copy = File::open(copy).map_err(|e| Error::source_unavailable(copy, e))?;

    let mut offset = 0_u64;
    let mut copy_bytes = BufReader::new(copy).bytes();

    for byte in BufReader::new(original).bytes() {
        let byte = byte.map_err(Error::SourceCorrupt)?;
        match copy_bytes.next().transpose().map_err(Error::SourceCorrupt)? {
            Some(other) if other == byte => offset += 1,
            _ => return Err(Error::RoundTripMismatch { offset }),
        }
    }

    match copy_bytes.next() {
        None => Ok(()),
        Some(_) => Err(Error::RoundTripMismatch { offset }),
    }
}
