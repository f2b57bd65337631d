//! CLI command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use epitome_core::{get_language_resources, LanguageResources};
use std::path::Path;

pub mod generate_config;
pub mod index;
pub mod summarize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize documents into the output directory
    Summarize(summarize::SummarizeArgs),

    /// Build a corpus term index and save it for later runs
    Index(index::IndexArgs),

    /// Write a configuration file with every option at its default
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file and report the first bad option
    Validate(validate::ValidateArgs),
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Summarize(args) => args.execute(),
            Commands::Index(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A logger may already be installed when commands run in-process.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

/// Language tables from an external file, or the embedded set for `code`
pub(crate) fn load_language_resources(
    language_config: Option<&Path>,
    code: &str,
) -> Result<LanguageResources> {
    match language_config {
        Some(path) => {
            let resources = LanguageResources::from_file(path).with_context(|| {
                format!("Failed to load language config: {}", path.display())
            })?;
            log::info!(
                "Using external language resources '{}' from {}",
                resources.metadata.code,
                path.display()
            );
            Ok(resources)
        }
        None => Ok(get_language_resources(code)?.clone()),
    }
}

/// Rayon pool sized by `threads`, or by the CPU count when 0
pub(crate) fn build_thread_pool(threads: usize) -> Result<rayon::ThreadPool> {
    let threads = if threads == 0 {
        num_cpus::get()
    } else {
        threads
    };
    log::debug!("Using {threads} worker threads");
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build worker pool")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_resources() {
        let resources = load_language_resources(None, "el").unwrap();
        assert_eq!(resources.metadata.code, "el");
        assert!(load_language_resources(None, "xx").is_err());
    }

    #[test]
    fn test_missing_language_file() {
        let error =
            load_language_resources(Some(Path::new("/nonexistent/greek.toml")), "el").unwrap_err();
        assert!(error.to_string().contains("Failed to load language config"));
    }

    #[test]
    fn test_thread_pool_size() {
        assert_eq!(build_thread_pool(2).unwrap().current_num_threads(), 2);
        assert!(build_thread_pool(0).unwrap().current_num_threads() >= 1);
    }
}
