use std::io::{self, Read};

use log::trace;

use crate::bitstream::BitReader;
use crate::{BITS_PER_WORD, PSEUDO_EOF, SYMBOL_COUNT};

/// Frequency count for every symbol, indexed by symbol value. Slot PSEUDO_EOF is the
/// end-of-stream symbol.
pub type Counts = [u64; SYMBOL_COUNT];

/// Returns a frequency count of the input, reading 8-bit words until the end of input.
/// The end-of-stream symbol always gets a count of 1 so that it takes part in every tree,
/// even for an empty input.
pub fn read_for_counts<R: Read>(br: &mut BitReader<R>) -> io::Result<Counts> {
    let mut freqs = [0_u64; SYMBOL_COUNT];
    freqs[PSEUDO_EOF as usize] = 1;
    while let Some(word) = br.read_bits(BITS_PER_WORD)? {
        freqs[word as usize] += 1;
    }
    trace!(
        "Counted {} input bytes over {} distinct values",
        freqs[..PSEUDO_EOF as usize].iter().sum::<u64>(),
        freqs[..PSEUDO_EOF as usize].iter().filter(|&&f| f > 0).count()
    );
    Ok(freqs)
}

/// Frequency count of an in-memory slice, with the same end-of-stream convention.
pub fn freqs(data: &[u8]) -> Counts {
    let mut freqs = [0_u64; SYMBOL_COUNT];
    freqs[PSEUDO_EOF as usize] = 1;
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_input_counts_only_eof() {
        let mut br = BitReader::new(io::empty());
        let counts = read_for_counts(&mut br).unwrap();
        assert_eq!(counts[PSEUDO_EOF as usize], 1);
        assert_eq!(counts.iter().sum::<u64>(), 1);
    }

    #[test]
    fn counts_each_byte() {
        let mut br = BitReader::new("abracadabra".as_bytes());
        let counts = read_for_counts(&mut br).unwrap();
        assert_eq!(counts[b'a' as usize], 5);
        assert_eq!(counts[b'b' as usize], 2);
        assert_eq!(counts[b'r' as usize], 2);
        assert_eq!(counts[b'c' as usize], 1);
        assert_eq!(counts[b'd' as usize], 1);
        assert_eq!(counts[PSEUDO_EOF as usize], 1);
        assert_eq!(counts, freqs(b"abracadabra"));
    }

    #[test]
    fn counts_every_byte_value() {
        let data: Vec<u8> = (0..=255).collect();
        let counts = freqs(&data);
        assert!(counts.iter().all(|&c| c == 1));
    }
}
