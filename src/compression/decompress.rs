use std::io::{Read, Write};

use log::{debug, error, info};

use super::CodecStats;
use crate::bitstream::{BitReader, BitWriter};
use crate::error::{HuffError, Result};
use crate::huffman_coding::header::read_tree_header;
use crate::huffman_coding::tree::{is_empty_stream_tree, Node, NodeData};
use crate::{BITS_PER_INT, BITS_PER_WORD, HUFF_TREE, PSEUDO_EOF};

/// Decompress a huffpack stream and close the output.
///
/// A bad magic number is reported before anything is written. Later failures (a truncated body,
/// for example) can leave bytes in the output; the caller must discard them.
pub fn decompress<R: Read, W: Write>(
    mut br: BitReader<R>,
    mut bw: BitWriter<W>,
) -> Result<CodecStats> {
    let bits = br.read_bits(BITS_PER_INT)?.ok_or_else(|| {
        error!("Input is too short to hold a huffpack header");
        HuffError::TruncatedHeader
    })?;
    if bits != HUFF_TREE {
        error!("Not a huffpack stream, header starts with {:#010x}", bits);
        return Err(HuffError::BadMagic(bits));
    }

    let root = read_tree_header(&mut br)?;
    read_compressed_bits(&root, &mut br, &mut bw)?;

    let stats = CodecStats {
        bits_read: br.bits_read(),
        bits_written: bw.bits_written(),
    };
    bw.close()?;
    info!(
        "Decompressed {} bits into {} bytes",
        stats.bits_read,
        stats.bits_written / BITS_PER_WORD as u64
    );
    Ok(stats)
}

/// Walk the tree one bit at a time, left on 0 and right on 1. Each literal leaf writes its byte
/// and restarts at the root; the end-of-stream leaf ends the body. Padding after the
/// end-of-stream code is never read.
fn read_compressed_bits<R: Read, W: Write>(
    root: &Node,
    br: &mut BitReader<R>,
    bw: &mut BitWriter<W>,
) -> Result<()> {
    // A lone leaf has an empty code. Only the end-of-stream leaf of an empty input may stand
    // alone; anything else could never reach end-of-stream.
    if root.is_leaf() {
        return if is_empty_stream_tree(root) {
            debug!("Tree is a single end-of-stream leaf, body is empty");
            Ok(())
        } else {
            Err(HuffError::MissingEndOfStream)
        };
    }

    let mut current = root;
    loop {
        let bit = br.bit()?.ok_or(HuffError::TruncatedBody)?;
        current = match &current.node_data {
            NodeData::Kids(left, right) => {
                if bit == 0 {
                    left.as_ref()
                } else {
                    right.as_ref()
                }
            }
            // Only reachable for a lone root leaf, which is handled above.
            NodeData::Leaf(_) => return Err(HuffError::MissingEndOfStream),
        };
        if let NodeData::Leaf(sym) = current.node_data {
            if sym == PSEUDO_EOF {
                return Ok(());
            }
            bw.write_bits(BITS_PER_WORD, sym as u32)?;
            current = root;
        }
    }
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(BitReader::new(data), BitWriter::new(&mut out))?;
    Ok(out)
}
