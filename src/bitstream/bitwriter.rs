use std::io::{self, Write};

/// Flush the output buffer to the sink once it holds this many bytes.
const BUFFER_SIZE: usize = 64 * 1024;

/// Writes a most-significant-bit-first bitstream to any sink that supports write(). Bits are
/// gathered in a queue, packed into the output buffer a byte at a time, and handed to the sink
/// whenever the buffer fills. Call close() to pad the final byte and flush everything.
pub struct BitWriter<W: Write> {
    /// Output buffer of packed bytes waiting for the sink.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Total bits accepted by write_bits, padding excluded.
    bits_written: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter over the sink.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(BUFFER_SIZE),
            queue: 0,
            q_bits: 0,
            bits_written: 0,
            writer,
        }
    }

    /// Put the low n bits (1..=32) of value on the stream.
    pub fn write_bits(&mut self, n: u32, value: u32) -> io::Result<()> {
        debug_assert!((1..=32).contains(&n), "write_bits width out of range: {}", n);
        // Make sure the queue is empty enough to hold the data
        self.push_queue();
        let mask = if n == 32 { u32::MAX } else { (1 << n) - 1 };
        self.queue <<= n;
        self.queue |= (value & mask) as u64;
        self.q_bits += n as u8;
        self.bits_written += n as u64;

        if self.output.len() >= BUFFER_SIZE {
            self.writer.write_all(&self.output)?;
            self.output.clear();
        }
        Ok(())
    }

    /// Put a single bit on the stream. Any non-zero value is written as 1.
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.write_bits(1, bit as u32)
    }

    /// Total number of bits written so far, not counting close() padding.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Move every full byte from the queue to the output buffer.
    fn push_queue(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits, writes all buffered bytes and returns the sink.
    pub fn close(mut self) -> io::Result<W> {
        self.push_queue();
        if self.q_bits > 0 {
            let byte = ((self.queue & (0xff >> (8 - self.q_bits))) as u8) << (8 - self.q_bits);
            self.output.push(byte);
            self.q_bits = 0;
        }
        self.writer.write_all(&self.output)?;
        self.output.clear();
        self.writer.flush()?;
        Ok(self.writer)
    }
}
