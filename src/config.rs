//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.recsift.toml` files.

use crate::analysis::ContactFilter;
use crate::models::Os;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".recsift.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Contact filter settings.
    #[serde(default)]
    pub contacts: ContactFilter,

    /// Visit query settings.
    #[serde(default)]
    pub visits: VisitConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default report output path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Dataset file. The built-in sample is used when unset.
    #[serde(default)]
    pub data: Option<PathBuf>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            data: None,
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "recsift_report.md".to_string()
}

/// Custom visit query. Disabled when both fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitConfig {
    /// Platforms to include. Empty means every platform.
    #[serde(default)]
    pub os: Vec<Os>,

    /// Restrict the query to this path.
    #[serde(default)]
    pub path: Option<String>,
}

impl VisitConfig {
    /// Whether a custom query was configured.
    pub fn is_set(&self) -> bool {
        !self.os.is_empty() || self.path.is_some()
    }

    /// Human-readable description of the query.
    pub fn describe(&self) -> String {
        let platforms = if self.os.is_empty() {
            "all platforms".to_string()
        } else {
            self.os
                .iter()
                .map(|os| os.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self.path {
            Some(ref path) => format!("{} on {}", platforms, path),
            None => platforms,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from `dir`.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence, but only where they were given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data) = args.data {
            self.general.data = Some(data.clone());
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(ref prefix) = args.prefix {
            self.contacts.prefix = prefix.clone();
        }
        if args.only_with_phone {
            self.contacts.only_with_phone_number = true;
        }

        if let Some(ref os) = args.os {
            self.visits.os = os.clone();
        }
        if let Some(ref path) = args.path {
            self.visits.path = Some(path.clone());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
