//! epitome CLI library
//!
//! Command-line front end for the epitome extractive summarizer: input
//! resolution, corpus indexing, summary output and progress reporting.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use commands::Commands;
pub use config::{CliConfig, OutputFormat};
pub use error::{CliError, CliResult};
