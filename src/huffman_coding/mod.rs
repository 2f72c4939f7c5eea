//! The huffman module builds the coding model for huffpack: the tree, the code table derived
//! from it, and the tree header that makes every compressed stream self-describing.
//!
//! Compression builds all three from the frequency counts. Decompression only ever needs the
//! tree, which it rebuilds from the header and walks bit by bit.
//!
pub mod code_table;
pub mod header;
pub mod tree;
