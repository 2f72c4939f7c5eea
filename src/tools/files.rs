//! File handling for the command line front end: pick the input and output, run the codec and
//! clean up afterwards.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use super::cli::{HuffOpts, Mode, Output};
use crate::bitstream::{BitReader, BitWriter};
use crate::compression::compress::compress;
use crate::compression::decompress::decompress;
use crate::compression::CodecStats;
use crate::error::{HuffError, Result};

/// Suffix of compressed files.
pub const SUFFIX: &str = ".hf";

/// Name of the output file for an input file: compression appends the suffix, decompression
/// strips it (or appends ".out" when it is missing).
pub fn output_name(input: &str, mode: Mode) -> String {
    match mode {
        Mode::Zip => format!("{}{}", input, SUFFIX),
        Mode::Unzip | Mode::Test => match input.strip_suffix(SUFFIX) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{}.out", input),
        },
    }
}

/// Run one compress, decompress or test operation as described by the options.
pub fn run(opts: &HuffOpts) -> Result<CodecStats> {
    match &opts.file {
        Some(name) => {
            let input = File::open(name)?;
            let stats = run_with_input(opts, input)?;
            if !opts.keep_input_files && opts.op_mode != Mode::Test && opts.output == Output::File
            {
                info!("Removing input file {}", name);
                fs::remove_file(name)?;
            }
            Ok(stats)
        }
        None => {
            // Compression needs to rewind its input, so stdin is buffered in full.
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            info!("Read {} bytes from stdin", buf.len());
            run_with_input(opts, Cursor::new(buf))
        }
    }
}

fn run_with_input<R: Read + Seek>(opts: &HuffOpts, input: R) -> Result<CodecStats> {
    if opts.op_mode == Mode::Test {
        let stats = process(Mode::Test, input, io::sink())?;
        info!("Stream is intact ({} bytes)", stats.bits_written / 8);
        return Ok(stats);
    }

    let path = match (opts.output, &opts.output_file, &opts.file) {
        (Output::Stdout, _, _) => None,
        (Output::File, Some(name), _) => Some(PathBuf::from(name)),
        (Output::File, None, Some(name)) => Some(PathBuf::from(output_name(name, opts.op_mode))),
        (Output::File, None, None) => None,
    };

    let path = match path {
        None => return process(opts.op_mode, input, io::stdout().lock()),
        Some(path) => path,
    };

    let out = open_output(&path, opts.force_overwrite)?;
    match process(opts.op_mode, input, out) {
        Ok(stats) => {
            info!("Wrote {}", path.display());
            Ok(stats)
        }
        Err(e) => {
            // Partial output is useless; don't leave it behind.
            error!("Fatal error: {}", e);
            if let Err(rm) = fs::remove_file(&path) {
                warn!("Could not remove partial output {}: {}", path.display(), rm);
            }
            Err(e)
        }
    }
}

fn open_output(path: &Path, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => HuffError::OutputExists(path.to_path_buf()),
        _ => HuffError::Io(e),
    })
}

fn process<R: Read + Seek, W: Write>(mode: Mode, input: R, output: W) -> Result<CodecStats> {
    let br = BitReader::new(input);
    let bw = BitWriter::new(output);
    let stats = match mode {
        Mode::Zip => compress(br, bw)?,
        Mode::Unzip | Mode::Test => decompress(br, bw)?,
    };
    if mode == Mode::Zip && stats.bits_read > 0 {
        // Both passes are counted in bits_read.
        let original = stats.bits_read / 2;
        info!(
            "{:.3}:1, {:.2}% saved, {} in, {} out.",
            original as f64 / stats.bits_written as f64,
            100.0 * (1.0 - stats.bits_written as f64 / original as f64),
            original / 8,
            (stats.bits_written + 7) / 8
        );
    }
    Ok(stats)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compressed_name_appends_suffix() {
        assert_eq!(output_name("notes.txt", Mode::Zip), "notes.txt.hf");
    }

    #[test]
    fn decompressed_name_strips_suffix() {
        assert_eq!(output_name("notes.txt.hf", Mode::Unzip), "notes.txt");
        assert_eq!(output_name("notes.txt", Mode::Unzip), "notes.txt.out");
        assert_eq!(output_name(".hf", Mode::Unzip), ".hf.out");
    }

    #[test]
    fn process_round_trips_in_memory() {
        let mut packed = Vec::new();
        process(Mode::Zip, Cursor::new(b"round and round".to_vec()), &mut packed).unwrap();
        let mut plain = Vec::new();
        process(Mode::Unzip, Cursor::new(packed), &mut plain).unwrap();
        assert_eq!(plain, b"round and round");
    }
}
