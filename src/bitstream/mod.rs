//! The bitstream module forms the I/O subsystem for huffpack.
//!
//! Everything huffpack reads or writes goes through these two types, one field of 1 to 32 bits
//! at a time, most significant bit first:
//! - BitReader: `read_bits(n)` hands back `None` at end of input, and `reset()` rewinds a
//!   seekable source for the compressor's second pass.
//! - BitWriter: `write_bits(n, value)`, then `close()` pads the final byte with zero bits and
//!   flushes the sink.
//!
pub mod bitreader;
pub mod bitwriter;

pub use bitreader::BitReader;
pub use bitwriter::BitWriter;
