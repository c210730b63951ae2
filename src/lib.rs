//! Per-file Huffman compression.
//!
//! The pipeline counts the symbols of a file ([`FrequencyTable`]), merges them into a prefix tree
//! ([`TreeBuilder`], [`Tree`]), derives the codewords ([`CodeBook`]), packs them into a bit stream
//! ([`Encoder`], [`bitio::BitWriter`]) and walks the tree back to the original bytes ([`Decoder`]).
//! A [`Session`] runs the whole compress, decompress and verify round trip on a file.
//!
//! The tree is the only description of the code: the compressed file carries no table, so it can be
//! decoded only by whoever still holds the tree that produced it.

pub mod bitio;
pub mod builder;
pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod session;
pub mod tree;
pub mod utils;

pub use builder::TreeBuilder;
pub use codebook::{CodeBook, Codeword};
pub use decoder::{DecodeSummary, Decoder};
pub use encoder::{EncodeSummary, Encoder};
pub use error::{Error, ErrorKind, Result};
pub use frequency::FrequencyTable;
pub use session::{OutputPaths, Session, SessionReport};
pub use tree::Tree;

/// The unit of compression. Input files are read as plain bytes, so the round trip is exact for any
/// content, text or not.
pub type Symbol = u8;

/// The type representing the weight of a tree node, i.e. the number of occurrences of the symbols
/// below it.
pub type Weight = u64;

/// The number of distinct values a [`Symbol`] can take.
pub const ALPHABET_SIZE: usize = 1 << Symbol::BITS;
