//! Huffman tree construction.
//!
//! The tree is built with the classic greedy merge: every symbol with a non-zero count becomes a
//! leaf, and the two lightest nodes are repeatedly joined under a new parent until one node is
//! left. Weight ties are broken by insertion order (first in, first out), with leaves inserted in
//! ascending symbol order and each new parent inserted right after its children are removed.
//! That makes the tree, and therefore the compressed output, identical on every run.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::tools::freq_count::Counts;
use crate::PSEUDO_EOF;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u16),
}

/// One node of a Huffman tree. A parent owns both of its children; there is no sharing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf for symbol with the given weight
    pub fn leaf(symbol: u16, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(symbol),
        }
    }

    /// Join two subtrees under a new parent. Left is the 0 branch, right the 1 branch.
    pub fn merge(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    /// The symbol of a leaf, None for an internal node.
    pub fn symbol(&self) -> Option<u16> {
        match self.node_data {
            NodeData::Leaf(sym) => Some(sym),
            NodeData::Kids(..) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match &node.node_data {
                NodeData::Leaf(_) => count += 1,
                NodeData::Kids(left, right) => {
                    pending.push(right.as_ref());
                    pending.push(left.as_ref());
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 0)];
        while let Some((node, depth)) = pending.pop() {
            match &node.node_data {
                NodeData::Leaf(_) => deepest = deepest.max(depth),
                NodeData::Kids(left, right) => {
                    pending.push((right.as_ref(), depth + 1));
                    pending.push((left.as_ref(), depth + 1));
                }
            }
        }
        deepest
    }
}

/// A node waiting in the priority queue, stamped with its insertion sequence number.
#[derive(Debug)]
struct Queued {
    seq: u32,
    node: Node,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    /// Sort by decreasing weight, then decreasing sequence number, so that the max-heap hands
    /// out the lightest, oldest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight
            .cmp(&self.node.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build the Huffman tree for a set of counts. Returns None only when every count is zero,
/// which cannot happen for counts produced by the frequency counter (the end-of-stream symbol
/// always has a count of 1).
pub fn make_tree_from_counts(counts: &Counts) -> Option<Node> {
    let mut seq = 0_u32;
    let mut queue = BinaryHeap::with_capacity(counts.len());
    for (sym, &count) in counts.iter().enumerate().filter(|(_, count)| **count > 0) {
        queue.push(Queued {
            seq,
            node: Node::leaf(sym as u16, count),
        });
        seq += 1;
    }
    debug!("Building tree from {} leaves", queue.len());

    while queue.len() > 1 {
        let (left, right) = match (queue.pop(), queue.pop()) {
            (Some(left), Some(right)) => (left, right),
            _ => break,
        };
        queue.push(Queued {
            seq,
            node: Node::merge(left.node, right.node),
        });
        seq += 1;
    }

    let root = queue.pop()?.node;
    debug!(
        "Tree has weight {}, {} leaves, depth {}",
        root.weight,
        root.leaf_count(),
        root.depth()
    );
    Some(root)
}

/// True if the tree is the degenerate single end-of-stream leaf produced by an empty input.
pub fn is_empty_stream_tree(root: &Node) -> bool {
    root.symbol() == Some(PSEUDO_EOF)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::freqs;

    #[test]
    fn empty_input_is_a_single_eof_leaf() {
        let root = make_tree_from_counts(&freqs(b"")).unwrap();
        assert_eq!(root, Node::leaf(PSEUDO_EOF, 1));
        assert!(is_empty_stream_tree(&root));
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn repeated_byte_merges_eof_first() {
        let root = make_tree_from_counts(&freqs(b"aaa")).unwrap();
        let expected = Node::merge(Node::leaf(PSEUDO_EOF, 1), Node::leaf(97, 3));
        assert_eq!(root, expected);
        assert_eq!(root.weight, 4);
    }

    #[test]
    fn equal_weights_merge_in_insertion_order() {
        // a b c d EOF all weigh 1: (a,b) then (c,d) then (EOF,ab) then (cd,EOFab).
        let root = make_tree_from_counts(&freqs(b"abcd")).unwrap();
        let ab = Node::merge(Node::leaf(b'a' as u16, 1), Node::leaf(b'b' as u16, 1));
        let cd = Node::merge(Node::leaf(b'c' as u16, 1), Node::leaf(b'd' as u16, 1));
        let eof_ab = Node::merge(Node::leaf(PSEUDO_EOF, 1), ab);
        assert_eq!(root, Node::merge(cd, eof_ab));
    }

    #[test]
    fn leaf_per_distinct_symbol() {
        let root = make_tree_from_counts(&freqs(b"mississippi")).unwrap();
        // i m p s and EOF
        assert_eq!(root.leaf_count(), 5);
        assert_eq!(root.weight, 12);
    }

    #[test]
    fn building_is_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let first = make_tree_from_counts(&freqs(data));
        let second = make_tree_from_counts(&freqs(data));
        assert_eq!(first, second);
    }

    #[test]
    fn all_zero_counts_build_nothing() {
        assert_eq!(make_tree_from_counts(&[0; crate::SYMBOL_COUNT]), None);
    }
}
