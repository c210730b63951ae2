use std::fmt;

use bitvec::prelude::*;
use log::debug;

use crate::frequency::FrequencyTable;
use crate::tree::Tree;
use crate::{Symbol, ALPHABET_SIZE};

/// The bits of a codeword, first bit first.
pub type Codeword = BitVec<u8, Msb0>;

/// The codeword of every symbol of a [`Tree`].
///
/// The codeword of a symbol is the path from the root to its leaf, `0` for every left turn and `1`
/// for every right one. Since symbols only sit in leaves, no codeword is a prefix of another.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeBook {
    /// Contains, for each index, the codeword of the symbol equal to that index.
    table: Vec<Option<Codeword>>,

    /// How many symbols have a codeword.
    len: usize,
}

impl Default for CodeBook {
    /// The codebook of the empty tree: no symbol has a codeword.
    fn default() -> Self {
        Self {
            table: vec![None; ALPHABET_SIZE],
            len: 0,
        }
    }
}

impl CodeBook {
    /// Derives the codewords of all the leaves of `tree`.
    ///
    /// A tree made of a single leaf would give its symbol an empty codeword, which could not be
    /// told apart from the end of the stream: that symbol gets the codeword `0` instead.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut codebook = Self::default();
        let mut path = match tree.is_leaf() {
            true => bitvec![u8, Msb0; 0],
            false => Codeword::new(),
        };

        codebook.collect(tree, &mut path);
        debug!("Derived {} codewords", codebook.len);
        codebook
    }

    fn collect(&mut self, node: &Tree, path: &mut Codeword) {
        match node {
            Tree::Leaf { symbol, .. } => {
                self.table[*symbol as usize] = Some(path.clone());
                self.len += 1;
            }
            Tree::Internal { left, right, .. } => {
                path.push(false);
                self.collect(left, path);
                path.pop();

                path.push(true);
                self.collect(right, path);
                path.pop();
            }
        }
    }

    /// The codeword of `symbol`, `None` if the symbol is not in the tree.
    pub fn get(&self, symbol: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.table[symbol as usize].as_deref()
    }

    /// The number of symbols with a codeword.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The (symbol, codeword) pairs, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &BitSlice<u8, Msb0>)> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_deref().map(|code| (symbol as Symbol, code)))
    }

    /// Whether no codeword is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let codes = self.iter().map(|(_, code)| code).collect::<Vec<_>>();

        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(*a))
        })
    }

    /// The number of bits needed to encode an input whose symbols occur as in `table`.
    ///
    /// Symbols of `table` without a codeword are not counted.
    pub fn encoded_len(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .filter_map(|(symbol, freq)| self.get(symbol).map(|code| freq * code.len() as u64))
            .sum()
    }
}

impl From<Option<&Tree>> for CodeBook {
    fn from(tree: Option<&Tree>) -> Self {
        tree.map(Self::from_tree).unwrap_or_default()
    }
}

impl fmt::Debug for CodeBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(symbol, code)| {
                let bits = code
                    .iter()
                    .by_vals()
                    .map(|bit| if bit { '1' } else { '0' })
                    .collect::<String>();
                (char::from(symbol), bits)
            }))
            .finish()
    }
}
