use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use itertools::Itertools;
use log::debug;

use crate::utils::entropy;
use crate::{Error, Result, Symbol, Weight};

/// The number of occurrences of every symbol of an input.
///
/// Only symbols that actually occur are represented: every entry has a count of at least 1.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    /// The frequency of each symbol seen so far.
    freqs: HashMap<Symbol, Weight>,

    /// The sum of all the frequencies.
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the symbols of `source` in a single pass.
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let mut table = Self::new();

        for byte in BufReader::new(source).bytes() {
            table.push_symbol(byte.map_err(Error::SourceCorrupt)?);
        }

        debug!(
            "Counted {} symbols, {} of them distinct",
            table.total,
            table.len()
        );
        Ok(table)
    }

    /// Counts the symbols of the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::source_unavailable(path, e))?;
        Self::from_reader(file)
    }

    /// Records one more occurrence of `symbol`.
    pub fn push_symbol(&mut self, symbol: Symbol) {
        *self.freqs.entry(symbol).or_insert(0) += 1;
        self.total += 1;
    }

    /// The number of occurrences of `symbol`, `None` if it never occurred.
    pub fn get(&self, symbol: Symbol) -> Option<Weight> {
        self.freqs.get(&symbol).copied()
    }

    /// The number of distinct symbols.
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    /// The number of symbols counted, i.e. the length of the input.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The (symbol, count) pairs, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Weight)> + '_ {
        self.freqs
            .iter()
            .map(|(symbol, freq)| (*symbol, *freq))
            .sorted_unstable()
    }

    /// The distinct symbols, in ascending order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.freqs.keys().copied().sorted_unstable().collect()
    }

    /// The empirical entropy of the input, in bits per symbol.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let distr = self.freqs.values().copied().collect::<Vec<Weight>>();
        entropy(&distr, self.total as f64)
    }
}

impl FromIterator<Symbol> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut table = Self::new();
        for symbol in iter {
            table.push_symbol(symbol);
        }
        table
    }
}
