//! Command line front end for the deep search: argument parsing, server lookup, progress bars
//! and writing the generated searches out.
pub use clap;

pub mod cli;
pub mod error;
pub mod output;
pub mod progress_bars;
