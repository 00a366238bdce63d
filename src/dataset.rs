//! Dataset loading and validation.
//!
//! Datasets are JSON documents with optional `contacts`, `visits` and
//! `people` arrays. When no file is given the built-in sample is used.

use crate::models::{Contact, Dataset, Os, Person, SiteVisit};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {kind} #{index}: {reason}")]
    Invalid {
        kind: &'static str,
        index: usize,
        reason: String,
    },
}

impl Dataset {
    /// Load and validate a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json(&content).map_err(|e| match e {
            DatasetError::Parse { source, .. } => DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

        info!(
            "Loaded {} contacts, {} visits, {} people from {}",
            dataset.contacts.len(),
            dataset.visits.len(),
            dataset.people.len(),
            path.display()
        );

        Ok(dataset)
    }

    /// Parse and validate a dataset from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, DatasetError> {
        let dataset: Dataset =
            serde_json::from_str(content).map_err(|source| DatasetError::Parse {
                path: PathBuf::from("<inline>"),
                source,
            })?;

        dataset.validate()?;
        Ok(dataset)
    }

    /// Check every record for values the filters cannot use.
    pub fn validate(&self) -> Result<(), DatasetError> {
        for (index, visit) in self.visits.iter().enumerate() {
            if !visit.duration.is_finite() || visit.duration < 0.0 {
                return Err(DatasetError::Invalid {
                    kind: "visit",
                    index,
                    reason: format!(
                        "duration must be a non-negative number, got {}",
                        visit.duration
                    ),
                });
            }
        }

        debug!("Dataset passed validation");
        Ok(())
    }

    /// The built-in sample dataset.
    pub fn sample() -> Self {
        Self {
            contacts: vec![
                Contact::new("Dmitry", "Jemerov", Some("123-4567")),
                Contact::new("Svetlana", "Isakova", None),
            ],
            visits: vec![
                SiteVisit::new("/", 34.0, Os::Windows),
                SiteVisit::new("/", 22.0, Os::Mac),
                SiteVisit::new("/login", 12.0, Os::Windows),
                SiteVisit::new("/signup", 8.0, Os::Ios),
                SiteVisit::new("/", 16.3, Os::Android),
            ],
            people: vec![Person::new("Alice", 29), Person::new("Bob", 31)],
        }
    }
}
