//! The compression module drives both directions of the huffpack codec.
//!
//! Compression makes two passes over a rewindable input:
//! - Count the frequency of every byte (plus one end-of-stream symbol).
//! - Build the Huffman tree and derive a code for every symbol.
//! - Write the magic number and the tree header, rewind the input, write the code for every
//!   byte, then the end-of-stream code, and close the output (padding the final byte).
//!
//! Decompression is a single pass: check the magic number, rebuild the tree from the header and
//! walk it one bit at a time, writing a byte at every leaf until the end-of-stream leaf.
//!
pub mod compress;
pub mod decompress;

/// Bit counts for one compress or decompress call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodecStats {
    /// Bits consumed from the input, counting both passes when compressing.
    pub bits_read: u64,
    /// Bits written to the output, not counting the padding added by close.
    pub bits_written: u64,
}
