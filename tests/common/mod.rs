/*
 * Utility functions and consts used by the tests.
 *
 */
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use huffcomp::{Session, Symbol};
use rand::prelude::{Distribution, SmallRng};
use rand::SeedableRng;
use rand_distr::Zipf;
use tempfile::TempDir;

/// Size of the list of symbols used to test.
pub const SYMBOL_LIST_LENGTH: usize = 100_000;

/// Number of distinct values the zipfian distribution can output.
const ALPHABET: u64 = 1 << Symbol::BITS;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a sequence of size [`SYMBOL_LIST_LENGTH`], containing symbols sampled from a Zipfian
/// distribution over the whole byte alphabet.
pub fn get_symbols(seed: u64) -> Vec<Symbol> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let distribution = Zipf::new(ALPHABET, 1.0).unwrap();
    let mut symbols = Vec::with_capacity(SYMBOL_LIST_LENGTH);

    for _ in 0..SYMBOL_LIST_LENGTH {
        // the distribution outputs values in 1..=ALPHABET
        symbols.push((distribution.sample(&mut rng) as u64 - 1) as Symbol);
    }
    symbols
}

/// Writes `content` to `<dir>/input.txt` and returns its path.
pub fn write_input(dir: &TempDir, content: &[u8]) -> PathBuf {
    let path = dir.path().join("input.txt");
    fs::write(&path, content).unwrap();
    path
}

/// Runs a whole session on `content`, returning the session so that its outputs can be inspected.
pub fn run_session(dir: &TempDir, content: &[u8]) -> (Session, huffcomp::SessionReport) {
    let session = Session::new(write_input(dir, content)).unwrap();
    let report = session.run().unwrap();
    (session, report)
}

pub fn file_len(path: &Path) -> u64 {
    fs::metadata(path).unwrap().len()
}
