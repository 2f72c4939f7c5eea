//! Error type shared by the codec and the command line front end.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a compress or decompress call. Any error means the operation did
/// not complete; bytes already written to the output should be discarded.
#[derive(Error, Debug)]
pub enum HuffError {
    /// The first 32 bits are not the huffman-tree format marker.
    #[error("illegal header starts with {0:#010x}")]
    BadMagic(u32),
    /// Input ended before the magic number or the tree header was complete.
    #[error("stream ended inside the tree header")]
    TruncatedHeader,
    /// A leaf in the header carries a 9-bit value above the end-of-stream symbol.
    #[error("tree header holds invalid symbol {0}")]
    InvalidSymbol(u16),
    /// The header describes more leaves than the alphabet has symbols.
    #[error("tree header describes more than {} leaves", crate::SYMBOL_COUNT)]
    OversizedTree,
    /// Input ended before the end-of-stream code was read.
    #[error("bad input, no PSEUDO_EOF")]
    TruncatedBody,
    /// The tree has no code for the end-of-stream symbol, so the body could never terminate.
    #[error("tree has no end-of-stream leaf")]
    MissingEndOfStream,
    /// Compression found a byte on its second pass that the first pass never counted.
    #[error("input changed between passes: byte {0} was not counted")]
    InputChanged(u8),
    /// The command line refused to overwrite an existing file.
    #[error("output file {} already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, HuffError>;
