//! The prefix tree shared by the encoder and the decoder.

use std::fmt;

use crate::{Symbol, Weight};

/// A node of a Huffman tree, together with everything below it.
///
/// Trees are built bottom-up and never modified afterwards: the only way to get an internal node
/// is [`Tree::internal`], which takes ownership of both children and sums their weights.
#[derive(Clone, Debug)]
pub enum Tree {
    Leaf {
        symbol: Symbol,
        weight: Weight,
    },
    Internal {
        weight: Weight,
        left: Box<Tree>,
        right: Box<Tree>,
    },
}

impl Tree {
    /// Creates a tree made of a single leaf.
    pub fn leaf(symbol: Symbol, weight: Weight) -> Self {
        Tree::Leaf { symbol, weight }
    }

    /// Creates an internal node whose weight is the sum of the weights of `left` and `right`.
    pub fn internal(left: Tree, right: Tree) -> Self {
        Tree::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf { .. })
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Tree::Leaf { symbol, .. } => Some(*symbol),
            Tree::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&Tree> {
        match self {
            Tree::Internal { left, .. } => Some(left.as_ref()),
            Tree::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Tree> {
        match self {
            Tree::Internal { right, .. } => Some(right.as_ref()),
            Tree::Leaf { .. } => None,
        }
    }

    pub fn weight(&self) -> Weight {
        match self {
            Tree::Leaf { weight, .. } | Tree::Internal { weight, .. } => *weight,
        }
    }

    /// The total number of nodes, internal ones included.
    pub fn size(&self) -> usize {
        match self {
            Tree::Leaf { .. } => 1,
            Tree::Internal { left, right, .. } => 1 + left.size() + right.size(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Tree::Leaf { .. } => 1,
            Tree::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// The length of the longest path from this node to a leaf. A leaf has height 0.
    pub fn height(&self) -> usize {
        match self {
            Tree::Leaf { .. } => 0,
            Tree::Internal { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    /// The symbols of the leaves, from left to right.
    pub fn fringe(&self) -> Vec<Symbol> {
        let mut fringe = Vec::with_capacity(self.leaf_count());
        self.push_fringe(&mut fringe);
        fringe
    }

    fn push_fringe(&self, fringe: &mut Vec<Symbol>) {
        match self {
            Tree::Leaf { symbol, .. } => fringe.push(*symbol),
            Tree::Internal { left, right, .. } => {
                left.push_fringe(fringe);
                right.push_fringe(fringe);
            }
        }
    }

    /// The nodes of the tree, each before its children.
    pub fn preorder(&self) -> Vec<&Tree> {
        let mut nodes = Vec::with_capacity(self.size());
        self.visit(&mut nodes, Order::Pre);
        nodes
    }

    /// The nodes of the tree, each between its left and its right subtree.
    pub fn inorder(&self) -> Vec<&Tree> {
        let mut nodes = Vec::with_capacity(self.size());
        self.visit(&mut nodes, Order::In);
        nodes
    }

    /// The nodes of the tree, each after its children.
    pub fn postorder(&self) -> Vec<&Tree> {
        let mut nodes = Vec::with_capacity(self.size());
        self.visit(&mut nodes, Order::Post);
        nodes
    }

    fn visit<'a>(&'a self, nodes: &mut Vec<&'a Tree>, order: Order) {
        match self {
            Tree::Leaf { .. } => nodes.push(self),
            Tree::Internal { left, right, .. } => {
                if order == Order::Pre {
                    nodes.push(self);
                }
                left.visit(nodes, order);
                if order == Order::In {
                    nodes.push(self);
                }
                right.visit(nodes, order);
                if order == Order::Post {
                    nodes.push(self);
                }
            }
        }
    }

    /// The sum, over all leaves, of weight times depth: the number of bits needed to encode the
    /// input the tree was built from.
    ///
    /// A lone leaf counts as depth 1, since it is given a one-bit codeword.
    pub fn weighted_path_length(&self) -> u64 {
        match self {
            Tree::Leaf { weight, .. } => *weight,
            Tree::Internal { .. } => self.weighted_depths(0),
        }
    }

    fn weighted_depths(&self, depth: u64) -> u64 {
        match self {
            Tree::Leaf { weight, .. } => weight * depth,
            Tree::Internal { left, right, .. } => {
                left.weighted_depths(depth + 1) + right.weighted_depths(depth + 1)
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Tree::Leaf { symbol, weight } => {
                writeln!(f, "{:indent$}{:?}:{}", "", char::from(*symbol), weight)
            }
            Tree::Internal {
                weight,
                left,
                right,
            } => {
                right.fmt_indented(f, indent + 2)?;
                writeln!(f, "{:indent$}*:{}", "", weight)?;
                left.fmt_indented(f, indent + 2)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
}

/// Two trees are equal when they have the same shape and the same symbols in the same leaves;
/// weights are not compared.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tree::Leaf { symbol: a, .. }, Tree::Leaf { symbol: b, .. }) => a == b,
            (
                Tree::Internal {
                    left: l1,
                    right: r1,
                    ..
                },
                Tree::Internal {
                    left: l2,
                    right: r2,
                    ..
                },
            ) => l1 == l2 && r1 == r2,
            _ => false,
        }
    }
}

impl Eq for Tree {}

/// Prints the tree sideways: right subtrees above their parent, left subtrees below, two spaces of
/// indentation per level.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
