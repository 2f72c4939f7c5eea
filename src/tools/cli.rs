use clap::Parser;
use log::{info, warn, LevelFilter};
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Compress, Decompress, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static Huffman file compressor",
    long_about = "
    Compresses any file with a static Huffman code over the 256 byte values plus an
    end-of-stream symbol. The code tree travels in the compressed file, so decompression
    needs nothing but the .hf file itself.

    With no file name, huffpack reads standard input and writes standard output."
)]
pub struct Args {
    /// Filename of file to process
    #[clap()]
    filename: Option<String>,

    /// Perform compression on the input file (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test", conflicts_with_all = &["compress", "decompress"])]
    test: bool,

    /// Write to this file instead of the derived name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout", conflicts_with = "output")]
    stdout: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,

    /// Sets verbosity. -v shows progress, -vvv is chatty
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: usize,
}

/// All user settable options that control program behavior
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Name of the file to read for input, stdin if absent
    pub file: Option<String>,
    /// Explicit output file name
    pub output_file: Option<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            file: None,
            output_file: None,
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Args> for HuffOpts {
    fn from(args: Args) -> Self {
        let op_mode = if args.test {
            Mode::Test
        } else if args.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };
        let verbose = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Warnings,
            (false, 1) => Verbosity::Info,
            (false, 2) => Verbosity::Debug,
            _ => Verbosity::Trace,
        };
        // Without an input file there is no name to derive an output name from.
        let output = if args.stdout || (args.filename.is_none() && args.output.is_none()) {
            Output::Stdout
        } else {
            Output::File
        };
        HuffOpts {
            file: args.filename,
            output_file: args.output,
            force_overwrite: args.force,
            keep_input_files: args.keep,
            op_mode,
            output,
            verbose,
        }
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- huffpack initialization start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.file {
        Some(s) => info!("Getting input from the file {}", s),
        None => info!("Getting input from stdin"),
    }
    match opts.output {
        Output::Stdout => info!("Sending output to stdout"),
        Output::File => {
            if let Some(name) = &opts.output_file {
                info!("Sending output to the file {}", name)
            }
        }
    }
    if opts.force_overwrite {
        warn!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- huffpack initialization end ----");
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn opts(args: &[&str]) -> HuffOpts {
        HuffOpts::from(Args::parse_from(args))
    }

    #[test]
    fn defaults_to_compress() {
        let o = opts(&["huffpack", "notes.txt"]);
        assert_eq!(o.op_mode, Mode::Zip);
        assert_eq!(o.output, Output::File);
        assert_eq!(o.verbose, Verbosity::Warnings);
        assert_eq!(o.file.as_deref(), Some("notes.txt"));
    }

    #[test]
    fn decompress_to_stdout() {
        let o = opts(&["huffpack", "-d", "-c", "notes.txt.hf"]);
        assert_eq!(o.op_mode, Mode::Unzip);
        assert_eq!(o.output, Output::Stdout);
    }

    #[test]
    fn stdin_goes_to_stdout() {
        let o = opts(&["huffpack", "-d"]);
        assert_eq!(o.file, None);
        assert_eq!(o.output, Output::Stdout);
    }

    #[test]
    fn verbosity_counts_flags() {
        assert_eq!(opts(&["huffpack", "-vv", "x"]).verbose, Verbosity::Debug);
        assert_eq!(opts(&["huffpack", "-vvvvv", "x"]).verbose, Verbosity::Trace);
        assert_eq!(opts(&["huffpack", "-q", "-v", "x"]).verbose, Verbosity::Quiet);
    }

    #[test]
    fn test_mode_and_flags() {
        let o = opts(&["huffpack", "-t", "-k", "-f", "x.hf"]);
        assert_eq!(o.op_mode, Mode::Test);
        assert!(o.keep_input_files);
        assert!(o.force_overwrite);
    }

    #[test]
    fn conflicting_modes_are_rejected() {
        assert!(Args::try_parse_from(&["huffpack", "-z", "-d", "x"]).is_err());
    }
}
