//! Tree header serialization.
//!
//! The tree is written in preorder. An internal node is a single 0 bit followed by its left and
//! then its right subtree. A leaf is a single 1 bit followed by its symbol in a 9-bit field
//! (wide enough for the 256 byte values plus the end-of-stream symbol). There is no node count:
//! every internal node is followed by exactly two subtrees, so the encoding ends itself.
//!
//! Weights are not transmitted; decoded nodes carry a weight of zero.

use std::io::{Read, Write};

use log::{debug, trace};

use super::tree::{Node, NodeData};
use crate::bitstream::{BitReader, BitWriter};
use crate::error::{HuffError, Result};
use crate::{PSEUDO_EOF, SYMBOL_BITS, SYMBOL_COUNT};

/// Write the tree in preorder.
pub fn write_header<W: Write>(root: &Node, bw: &mut BitWriter<W>) -> Result<()> {
    let start = bw.bits_written();
    write_node(root, bw)?;
    debug!("Tree header is {} bits", bw.bits_written() - start);
    Ok(())
}

/// Preorder walk. Depth is bounded by the alphabet size, so recursion is safe on our own trees.
fn write_node<W: Write>(node: &Node, bw: &mut BitWriter<W>) -> Result<()> {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            bw.write_bits(1, 0)?;
            write_node(left, bw)?;
            write_node(right, bw)?;
        }
        NodeData::Leaf(sym) => {
            bw.write_bits(1, 1)?;
            bw.write_bits(SYMBOL_BITS, *sym as u32)?;
        }
    }
    Ok(())
}

/// Rebuild a tree from its preorder header.
///
/// Works with an explicit stack rather than recursion because the header comes from untrusted
/// input. Each stack entry is an internal node still waiting for its children: `None` until its
/// left subtree is complete, then `Some(left)` until its right subtree is complete.
///
/// Fails with `TruncatedHeader` if the input ends before the tree is complete, `InvalidSymbol`
/// for a leaf value above the end-of-stream symbol, and `OversizedTree` once the header holds
/// more internal nodes than a tree over the whole alphabet can have.
pub fn read_tree_header<R: Read>(br: &mut BitReader<R>) -> Result<Node> {
    let mut pending: Vec<Option<Node>> = Vec::new();
    let mut internal_nodes = 0_usize;
    let mut leaves = 0_usize;

    loop {
        let bit = br.bit()?.ok_or(HuffError::TruncatedHeader)?;
        let mut node = if bit == 0 {
            internal_nodes += 1;
            if internal_nodes >= SYMBOL_COUNT {
                return Err(HuffError::OversizedTree);
            }
            pending.push(None);
            continue;
        } else {
            let value = br
                .read_bits(SYMBOL_BITS)?
                .ok_or(HuffError::TruncatedHeader)? as u16;
            if value > PSEUDO_EOF {
                return Err(HuffError::InvalidSymbol(value));
            }
            leaves += 1;
            trace!("Header leaf {} at {}", value, br.loc());
            Node::leaf(value, 0)
        };

        // Hang the finished subtree on the nearest parent that still needs a child, completing
        // as many parents as it takes.
        loop {
            match pending.pop() {
                None => {
                    debug!(
                        "Read tree header: {} leaves, {} internal nodes",
                        leaves, internal_nodes
                    );
                    return Ok(node);
                }
                Some(None) => {
                    pending.push(Some(node));
                    break;
                }
                Some(Some(left)) => node = Node::merge(left, node),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::huffman_coding::tree::make_tree_from_counts;
    use crate::tools::freq_count::freqs;

    fn header_bytes(root: &Node) -> Vec<u8> {
        let mut bw = BitWriter::new(Vec::new());
        write_header(root, &mut bw).unwrap();
        bw.close().unwrap()
    }

    /// The decoder does not keep weights, so compare shape and symbols only.
    fn strip_weights(node: &Node) -> Node {
        match &node.node_data {
            NodeData::Leaf(sym) => Node::leaf(*sym, 0),
            NodeData::Kids(left, right) => Node::merge(strip_weights(left), strip_weights(right)),
        }
    }

    #[test]
    fn repeated_byte_header_bits() {
        let root = make_tree_from_counts(&freqs(b"aaa")).unwrap();
        // 0 | 1 100000000 | 1 001100001, padded
        assert_eq!(header_bytes(&root), vec![0b0110_0000, 0b0001_0011, 0b0000_1000]);
    }

    #[test]
    fn single_leaf_header() {
        let root = make_tree_from_counts(&freqs(b"")).unwrap();
        let bytes = header_bytes(&root);
        assert_eq!(bytes, vec![0b1100_0000, 0b0000_0000]);
        let mut br = BitReader::new(bytes.as_slice());
        assert_eq!(read_tree_header(&mut br).unwrap(), Node::leaf(PSEUDO_EOF, 0));
    }

    #[test]
    fn header_rebuilds_the_tree() {
        let root = make_tree_from_counts(&freqs(b"she sells sea shells by the sea shore")).unwrap();
        let bytes = header_bytes(&root);
        let mut br = BitReader::new(bytes.as_slice());
        let decoded = read_tree_header(&mut br).unwrap();
        assert_eq!(decoded, strip_weights(&root));
        assert_eq!(decoded.leaf_count(), root.leaf_count());
        assert_eq!(decoded.weight, 0);
    }

    #[test]
    fn full_alphabet_header_round_trips() {
        let data: Vec<u8> = (0..=255).collect();
        let root = make_tree_from_counts(&freqs(&data)).unwrap();
        let bytes = header_bytes(&root);
        let mut br = BitReader::new(bytes.as_slice());
        let decoded = read_tree_header(&mut br).unwrap();
        assert_eq!(decoded.leaf_count(), SYMBOL_COUNT);
        assert_eq!(decoded, strip_weights(&root));
    }

    #[test]
    fn truncated_header_fails() {
        let root = make_tree_from_counts(&freqs(b"abcdefgh")).unwrap();
        let bytes = header_bytes(&root);
        let mut br = BitReader::new(&bytes[..bytes.len() / 2]);
        assert!(matches!(
            read_tree_header(&mut br),
            Err(HuffError::TruncatedHeader)
        ));
    }

    #[test]
    fn empty_header_fails() {
        let mut br = BitReader::new(std::io::empty());
        assert!(matches!(
            read_tree_header(&mut br),
            Err(HuffError::TruncatedHeader)
        ));
    }

    #[test]
    fn leaf_value_out_of_range_fails() {
        // 1 111111111 is symbol 511
        let mut br = BitReader::new([0b1111_1111_u8, 0b1100_0000].as_slice());
        assert!(matches!(
            read_tree_header(&mut br),
            Err(HuffError::InvalidSymbol(511))
        ));
    }

    #[test]
    fn endless_internal_nodes_fail() {
        let zeros = vec![0_u8; 64];
        let mut br = BitReader::new(zeros.as_slice());
        assert!(matches!(
            read_tree_header(&mut br),
            Err(HuffError::OversizedTree)
        ));
    }
}
