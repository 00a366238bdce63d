//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::Os;
use clap::Parser;
use std::path::PathBuf;

/// RecSift - filter contact lists and average site-visit durations
///
/// Loads a JSON dataset of contacts, site visits and people (or a built-in
/// sample), applies a name-prefix/phone-number filter to the contacts,
/// averages visit durations per platform and writes a report.
///
/// Examples:
///   recsift --prefix Dm --only-with-phone --stdout
///   recsift --data visits.json --os ios,android
///   recsift --data visits.json --os ios --path /signup --format json
///   recsift --find Alice --younger-than 30
///   recsift --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON dataset to load
    ///
    /// Uses the built-in sample dataset when not given.
    #[arg(short, long, value_name = "FILE", env = "RECSIFT_DATA")]
    pub data: Option<PathBuf>,

    /// Keep contacts whose first or last name starts with this prefix
    ///
    /// Matching is case-sensitive. An empty prefix matches every contact.
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Keep only contacts that have a phone number on file
    #[arg(long)]
    pub only_with_phone: bool,

    /// Platforms for the custom visit query (comma-separated)
    ///
    /// Values: windows, mac, ios, android
    #[arg(long, value_name = "OS", value_delimiter = ',')]
    pub os: Option<Vec<Os>>,

    /// Page path for the custom visit query
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Look for the first person with this exact name
    #[arg(long, value_name = "NAME")]
    pub find: Option<String>,

    /// List people strictly younger than this age
    #[arg(long, value_name = "AGE")]
    pub younger_than: Option<u32>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the report to standard output instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .recsift.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .recsift.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref path) = self.path {
            if !path.starts_with('/') {
                return Err(format!("Visit path must start with '/': {}", path));
            }
        }

        if let Some(ref name) = self.find {
            if name.trim().is_empty() {
                return Err("Name to find must not be empty".to_string());
            }
        }

        if let Some(ref data) = self.data {
            if !data.exists() {
                return Err(format!("Dataset file does not exist: {}", data.display()));
            }
            if !data.is_file() {
                return Err(format!("Dataset path is not a file: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `general.verbose` value from the config file.
    /// `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            prefix: None,
            only_with_phone: false,
            os: None,
            path: None,
            find: None,
            younger_than: None,
            format: OutputFormat::Markdown,
            output: None,
            stdout: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_os_list() {
        let args = Args::parse_from(["recsift", "--os", "ios,Android", "--path", "/signup"]);
        assert_eq!(args.os, Some(vec![Os::Ios, Os::Android]));
        assert_eq!(args.path.as_deref(), Some("/signup"));
    }

    #[test]
    fn test_parse_rejects_unknown_os() {
        assert!(Args::try_parse_from(["recsift", "--os", "linux"]).is_err());
    }

    #[test]
    fn test_output_conflicts_with_stdout() {
        assert!(Args::try_parse_from(["recsift", "--stdout", "--output", "x.md"]).is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_relative_path() {
        let mut args = make_args();
        args.path = Some("signup".to_string());
        assert!(args.validate().is_err());

        args.path = Some("/signup".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = make_args();

        args.data = Some(dir.path().join("missing.json"));
        assert!(args.validate().is_err());

        args.data = Some(dir.path().to_path_buf());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skipped_for_init_config() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
