use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::{debug, trace};

use crate::frequency::FrequencyTable;
use crate::tree::Tree;
use crate::{Symbol, Weight};

/// A tree waiting in the priority queue.
///
/// Trees are ordered by weight first and then by the smallest symbol they contain. Since every
/// symbol appears in exactly one tree of the queue, no two entries compare equal, so the merge
/// order, and therefore the final tree, does not depend on the order of insertion.
#[derive(Debug)]
struct Queued {
    tree: Tree,
    min_symbol: Symbol,
}

impl Queued {
    fn key(&self) -> (Weight, Symbol) {
        (self.tree.weight(), self.min_symbol)
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Builds the Huffman tree of a [`FrequencyTable`] by repeatedly merging the two lightest trees.
pub struct TreeBuilder {
    /// A min-priority queue of the trees still to be merged.
    queue: BinaryHeap<Reverse<Queued>>,
}

impl TreeBuilder {
    /// Creates a builder whose queue holds a single-leaf tree for each symbol of `table`.
    pub fn new(table: &FrequencyTable) -> Self {
        let queue = table
            .iter()
            .map(|(symbol, freq)| {
                Reverse(Queued {
                    tree: Tree::leaf(symbol, freq),
                    min_symbol: symbol,
                })
            })
            .collect::<BinaryHeap<_>>();

        Self { queue }
    }

    /// The number of trees in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Merges the queued trees into one.
    ///
    /// Returns `None` if the table was empty. With a single symbol its leaf is returned as it is:
    /// the [`CodeBook`](crate::CodeBook) and the [`Decoder`](crate::Decoder) know how to deal with a
    /// tree made of one leaf.
    pub fn build(mut self) -> Option<Tree> {
        while let Some(Reverse(first)) = self.queue.pop() {
            let Some(Reverse(second)) = self.queue.pop() else {
                // the last tree left is the whole tree
                let tree = first.tree;
                debug!(
                    "Built a tree with {} leaves, {} nodes and height {}",
                    tree.leaf_count(),
                    tree.size(),
                    tree.height()
                );
                return Some(tree);
            };

            trace!(
                "Merging trees of weight {} and {}",
                first.tree.weight(),
                second.tree.weight()
            );

            let min_symbol = first.min_symbol.min(second.min_symbol);
            self.queue.push(Reverse(Queued {
                tree: Tree::internal(first.tree, second.tree),
                min_symbol,
            }));
        }
        None
    }
}
