//! Data models for record sifting.
//!
//! This module contains the flat record types the filters operate on,
//! the dataset that bundles them, and the report structures produced
//! from a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Operating system a site visit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Os {
    Windows,
    Mac,
    Ios,
    Android,
}

impl Os {
    /// Returns true for the mobile platforms (iOS and Android).
    pub fn is_mobile(&self) -> bool {
        matches!(self, Os::Ios | Os::Android)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Windows => write!(f, "Windows"),
            Os::Mac => write!(f, "Mac"),
            Os::Ios => write!(f, "iOS"),
            Os::Android => write!(f, "Android"),
        }
    }
}

/// Error returned when a string does not name a known platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operating system '{0}' (expected windows, mac, ios or android)")]
pub struct ParseOsError(pub String);

impl FromStr for Os {
    type Err = ParseOsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Ok(Os::Windows),
            "mac" | "macos" => Ok(Os::Mac),
            "ios" => Ok(Os::Ios),
            "android" => Ok(Os::Android),
            _ => Err(ParseOsError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Os {
    type Error = ParseOsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An entry in a contact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    /// `None` means no phone number on file. An empty string still counts as present.
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Contact {
    pub fn new(first_name: &str, last_name: &str, phone_number: Option<&str>) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: phone_number.map(String::from),
        }
    }

    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.phone_number {
            Some(phone) => write!(f, "{} ({})", self.full_name(), phone),
            None => write!(f, "{}", self.full_name()),
        }
    }
}

/// A single page visit from a site log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteVisit {
    pub os: Os,
    pub path: String,
    /// Time spent on the page, in seconds.
    pub duration: f64,
}

impl SiteVisit {
    pub fn new(path: &str, duration: f64, os: Os) -> Self {
        Self {
            os,
            path: path.to_string(),
            duration,
        }
    }
}

/// A person searched for by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.age)
    }
}

/// All records loaded for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub visits: Vec<SiteVisit>,
    #[serde(default)]
    pub people: Vec<Person>,
}

/// Average duration for one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsDuration {
    pub os: Os,
    pub visits: usize,
    pub average: f64,
}

/// Duration statistics for the visit log.
///
/// Every average is `None` when no visit matched, which is distinct from an
/// average of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisitSummary {
    /// Total number of visits in the log.
    pub total: usize,
    /// Average over the whole log.
    pub overall_average: Option<f64>,
    /// Averages for each platform present in the log.
    pub by_os: Vec<OsDuration>,
    /// Average over iOS and Android visits.
    pub mobile_average: Option<f64>,
    /// Human-readable description of the custom query, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Number of visits matching the custom query.
    pub query_matches: usize,
    /// Average over the visits matching the custom query.
    pub query_average: Option<f64>,
}

/// Outcome of the people search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeopleSummary {
    /// Name that was searched for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_name: Option<String>,
    /// First person with that name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<Person>,
    /// Age bound applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub younger_than: Option<u32>,
    /// People strictly younger than the bound.
    pub younger: Vec<Person>,
}

/// Metadata about a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Dataset file, or "built-in sample".
    pub source: String,
    pub generated_at: DateTime<Utc>,
    /// Contact prefix applied.
    pub prefix: String,
    /// Whether contacts without a phone number were dropped.
    pub only_with_phone_number: bool,
    pub total_contacts: usize,
    pub matched_contacts: usize,
    /// Contacts in the dataset that have a phone number.
    pub contacts_with_phone: usize,
}

/// The complete report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub contacts: Vec<Contact>,
    pub visits: VisitSummary,
    pub people: PeopleSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_from_str() {
        assert_eq!("windows".parse::<Os>(), Ok(Os::Windows));
        assert_eq!("MAC".parse::<Os>(), Ok(Os::Mac));
        assert_eq!(" iOS ".parse::<Os>(), Ok(Os::Ios));
        assert_eq!("Android".parse::<Os>(), Ok(Os::Android));
        assert_eq!(
            "linux".parse::<Os>(),
            Err(ParseOsError("linux".to_string()))
        );
    }

    #[test]
    fn test_os_deserializes_any_case() {
        let parsed: SiteVisit =
            serde_json::from_str(r#"{"os":"ios","path":"/signup","duration":8.0}"#).unwrap();
        assert_eq!(parsed.os, Os::Ios);

        let platforms: Vec<Os> = serde_json::from_str(r#"["Windows","mac","ANDROID"]"#).unwrap();
        assert_eq!(platforms, vec![Os::Windows, Os::Mac, Os::Android]);

        assert!(serde_json::from_str::<Os>(r#""linux""#).is_err());
    }

    #[test]
    fn test_person_display() {
        assert_eq!(Person::new("Alice", 29).to_string(), "Alice (29)");
    }

    #[test]
    fn test_os_is_mobile() {
        assert!(Os::Ios.is_mobile());
        assert!(Os::Android.is_mobile());
        assert!(!Os::Windows.is_mobile());
        assert!(!Os::Mac.is_mobile());
    }

    #[test]
    fn test_os_serializes_upper_case() {
        let visit = SiteVisit::new("/", 34.0, Os::Windows);
        let json = serde_json::to_string(&visit).unwrap();
        assert!(json.contains("\"WINDOWS\""));

        let parsed: SiteVisit =
            serde_json::from_str(r#"{"os":"ANDROID","path":"/","duration":16.3}"#).unwrap();
        assert_eq!(parsed.os, Os::Android);
    }

    #[test]
    fn test_contact_missing_phone_defaults_to_none() {
        let contact: Contact =
            serde_json::from_str(r#"{"first_name":"Svetlana","last_name":"Isakova"}"#).unwrap();
        assert_eq!(contact.phone_number, None);
    }

    #[test]
    fn test_contact_display() {
        let with_phone = Contact::new("Dmitry", "Jemerov", Some("123-4567"));
        let without_phone = Contact::new("Svetlana", "Isakova", None);
        assert_eq!(with_phone.to_string(), "Dmitry Jemerov (123-4567)");
        assert_eq!(without_phone.to_string(), "Svetlana Isakova");
    }

    #[test]
    fn test_dataset_sections_default_to_empty() {
        let dataset: Dataset = serde_json::from_str(r#"{"people":[]}"#).unwrap();
        assert!(dataset.contacts.is_empty());
        assert!(dataset.visits.is_empty());
    }
}
