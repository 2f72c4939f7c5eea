use std::io::{Cursor, Read, Seek, Write};

use log::{debug, info};

use super::CodecStats;
use crate::bitstream::{BitReader, BitWriter};
use crate::error::{HuffError, Result};
use crate::huffman_coding::code_table::{Code, CodeTable};
use crate::huffman_coding::header::write_header;
use crate::huffman_coding::tree::make_tree_from_counts;
use crate::tools::freq_count::read_for_counts;
use crate::{BITS_PER_INT, BITS_PER_WORD, HUFF_TREE, PSEUDO_EOF};

/// Compress everything in the input and close the output.
///
/// The input is read twice: once to count byte frequencies and, after a reset, once more to
/// write the codes. Output is the 32-bit magic number, the tree header, the code for every input
/// byte and finally the end-of-stream code, padded with zero bits to a whole byte.
pub fn compress<R: Read + Seek, W: Write>(
    mut br: BitReader<R>,
    mut bw: BitWriter<W>,
) -> Result<CodecStats> {
    let counts = read_for_counts(&mut br)?;
    let mut bits_read = br.bits_read();

    // The end-of-stream symbol always has a count, so there is always a tree.
    let root = make_tree_from_counts(&counts).ok_or(HuffError::MissingEndOfStream)?;
    let codings = CodeTable::from_tree(&root);
    debug!(
        "Code table has {} symbols, longest code {} bits",
        codings.len(),
        root.depth()
    );

    bw.write_bits(BITS_PER_INT, HUFF_TREE)?;
    write_header(&root, &mut bw)?;

    br.reset()?;
    write_compressed_bits(&codings, &mut br, &mut bw)?;
    bits_read += br.bits_read();

    let stats = CodecStats {
        bits_read,
        bits_written: bw.bits_written(),
    };
    bw.close()?;
    info!(
        "Compressed {} bytes into {} bits",
        counts[..PSEUDO_EOF as usize].iter().sum::<u64>(),
        stats.bits_written
    );
    Ok(stats)
}

/// Second pass: the code for every input byte, then the end-of-stream code.
fn write_compressed_bits<R: Read, W: Write>(
    codings: &CodeTable,
    br: &mut BitReader<R>,
    bw: &mut BitWriter<W>,
) -> Result<()> {
    let eof = codings
        .get(PSEUDO_EOF)
        .ok_or(HuffError::MissingEndOfStream)?;
    while let Some(word) = br.read_bits(BITS_PER_WORD)? {
        // Every byte of the first pass has a code.
        let code = codings
            .get(word as u16)
            .ok_or(HuffError::InputChanged(word as u8))?;
        write_code(code, bw)?;
    }
    write_code(eof, bw)
}

fn write_code<W: Write>(code: &Code, bw: &mut BitWriter<W>) -> Result<()> {
    for &bit in code.bits() {
        bw.write_bit(bit)?;
    }
    Ok(())
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(BitReader::new(Cursor::new(data)), BitWriter::new(&mut out))?;
    Ok(out)
}
