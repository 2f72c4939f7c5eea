//! The tools module provides helper functions for huffpack.
//!
//! The tools are:
//! - cli: Command line interface for huffpack.
//! - files: Input/output file selection and cleanup for the command line.
//! - freq_count: Frequency count of the input symbols.
//!
pub mod cli;
pub mod files;
pub mod freq_count;
