//! BitReader: the input half of the huffpack I/O subsystem.
//!
//! Reads a packed, most-significant-bit-first bitstream from any source that supports read().
//! When the source also supports seek(), the reader can be rewound to the start so the
//! compressor can make its second pass over the input.
//!

use std::io::{self, Read, Seek, SeekFrom};

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads a bitstream from a byte source.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    /// Number of valid bytes in the buffer.
    filled: usize,
    cursor: usize,
    bit_index: usize,
    bits_read: u64,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            filled: 0,
            cursor: 0,
            bit_index: 0,
            bits_read: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more.
    fn have_data(&mut self) -> io::Result<bool> {
        if self.cursor < self.filled {
            return Ok(true);
        }
        let size = loop {
            match self.source.read(&mut self.buffer) {
                Ok(size) => break size,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.filled = size;
        self.cursor = 0;
        self.bit_index = 0;
        Ok(size > 0)
    }

    /// Return the next bit (1 or 0), or None if there is no more data to read.
    pub fn bit(&mut self) -> io::Result<Option<u32>> {
        if self.bit_index == 0 && !self.have_data()? {
            return Ok(None);
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        self.bits_read += 1;
        Ok(Some(bit as u32))
    }

    /// Return the next n bits (1..=32) as an unsigned value, or None if fewer than n bits are
    /// left. Bits consumed by a short read are lost; callers treat None as end of input.
    pub fn read_bits(&mut self, n: u32) -> io::Result<Option<u32>> {
        debug_assert!((1..=32).contains(&n), "read_bits width out of range: {}", n);
        let mut n = n;
        let mut result = 0_u32;

        // Drain a partial byte first.
        while n > 0 && self.bit_index > 0 {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit,
                None => return Ok(None),
            }
            n -= 1;
        }
        // Then whole bytes straight from the buffer.
        while n >= 8 {
            if !self.have_data()? {
                return Ok(None);
            }
            result = result << 8 | self.buffer[self.cursor] as u32;
            self.cursor += 1;
            self.bits_read += 8;
            n -= 8;
        }
        // And whatever is left.
        while n > 0 {
            match self.bit()? {
                Some(bit) => result = result << 1 | bit,
                None => return Ok(None),
            }
            n -= 1;
        }
        Ok(Some(result))
    }

    /// Total number of bits handed out since creation (or the last reset).
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

impl<R: Read + Seek> BitReader<R> {
    /// Rewind the source to its start and discard anything buffered.
    pub fn reset(&mut self) -> io::Result<()> {
        self.source.seek(SeekFrom::Start(0))?;
        self.filled = 0;
        self.cursor = 0;
        self.bit_index = 0;
        self.bits_read = 0;
        Ok(())
    }
}
