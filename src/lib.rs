//! huffpack: lossless compression with a static Huffman code.
//!
//! Version 0.1.0
//!
//! Every byte value plus one end-of-stream symbol gets a code from a Huffman tree built from the
//! byte frequencies of the input. The tree itself is stored in front of the coded data, so a
//! compressed stream can be decoded without any outside dictionary.
//!
//! Compressed stream layout, most significant bit first:
//! - 32-bit magic number `0xface8201`.
//! - The tree in preorder: `0` + left + right for an internal node, `1` + 9-bit symbol for a leaf.
//! - The code of every input byte, then the code of the end-of-stream symbol.
//! - 0 to 7 zero bits of padding to finish the last byte.
//!
//! Trees are built deterministically (equal weights leave the queue in insertion order), so the
//! same input always compresses to the same bytes.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffpack notes.txt`
//!
//! This will compress the file and create the file notes.txt.hf.
//! The original file will be deleted unless `-k` is given.
//!
//! In memory:
//!
//! ```
//! let packed = huffpack::compress_bytes(b"abracadabra")?;
//! assert_eq!(huffpack::decompress_bytes(&packed)?, b"abracadabra");
//! # Ok::<(), huffpack::HuffError>(())
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::{compress, compress_bytes};
pub use compression::decompress::{decompress, decompress_bytes};
pub use compression::CodecStats;
pub use error::HuffError;

/// Bits in one input word (a byte).
pub const BITS_PER_WORD: u32 = 8;
/// Bits in the magic number field.
pub const BITS_PER_INT: u32 = 32;
/// Number of literal byte values.
pub const ALPH_SIZE: u16 = 1 << BITS_PER_WORD;
/// The end-of-stream symbol, one past the last byte value.
pub const PSEUDO_EOF: u16 = ALPH_SIZE;
/// Width of a symbol in the tree header: enough for 0..=PSEUDO_EOF.
pub const SYMBOL_BITS: u32 = BITS_PER_WORD + 1;
/// Size of the alphabet including the end-of-stream symbol.
pub const SYMBOL_COUNT: usize = ALPH_SIZE as usize + 1;
/// Format family marker.
pub const HUFF_NUMBER: u32 = 0xface_8200;
/// Magic number of the tree-header format.
pub const HUFF_TREE: u32 = HUFF_NUMBER | 1;
