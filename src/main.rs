//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use huffpack::tools::cli::huffopts_init;
use huffpack::tools::files::run;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace. The filter is narrowed by the
    // command line; logs go to stderr so stdout can carry data.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("huffpack: could not start the logger");
    }

    let options = huffopts_init();

    match run(&options) {
        Ok(stats) => {
            info!(
                "Done. {} bits read, {} bits written.",
                stats.bits_read, stats.bits_written
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("huffpack: {}", e);
            ExitCode::FAILURE
        }
    }
}
