//! Predicate-based filtering and averaging.
//!
//! Everything here is a pure function over in-memory records. Averages
//! return `None` when no record survives the filter, so an empty selection
//! is never confused with a mean of zero.

use crate::models::{Contact, Os, Person, SiteVisit};
use serde::{Deserialize, Serialize};

/// Boxed predicate over a record type.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Keep the records matching `predicate`, preserving their order.
pub fn filter<T, P>(records: &[T], predicate: P) -> Vec<T>
where
    T: Clone,
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(*r)).cloned().collect()
}

/// Arithmetic mean of `field` over the records matching `predicate`.
///
/// Returns `None` if no record matches.
pub fn average<T, P, F>(records: &[T], predicate: P, field: F) -> Option<f64>
where
    P: Fn(&T) -> bool,
    F: Fn(&T) -> f64,
{
    let (sum, count) = records
        .iter()
        .filter(|r| predicate(*r))
        .fold((0.0, 0usize), |(sum, count), r| (sum + field(r), count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Settings used to build a contact predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFilter {
    /// First or last name must start with this. Empty matches everyone.
    #[serde(default)]
    pub prefix: String,
    /// Drop contacts that have no phone number on file.
    #[serde(default)]
    pub only_with_phone_number: bool,
}

impl ContactFilter {
    #[allow(dead_code)] // Convenience constructor, main builds filters from config
    pub fn new(prefix: impl Into<String>, only_with_phone_number: bool) -> Self {
        Self {
            prefix: prefix.into(),
            only_with_phone_number,
        }
    }

    /// Consume the settings and build the matching predicate.
    pub fn into_predicate(self) -> Predicate<Contact> {
        build_contact_predicate(self)
    }
}

/// Matches contacts whose first or last name starts with `prefix`.
pub fn starts_with_prefix(prefix: String) -> impl Fn(&Contact) -> bool {
    move |c: &Contact| c.first_name.starts_with(&prefix) || c.last_name.starts_with(&prefix)
}

/// Matches contacts with a phone number on file.
pub fn has_phone_number(contact: &Contact) -> bool {
    contact.phone_number.is_some()
}

/// Build a predicate from a contact filter.
///
/// The phone-number check is only chained on when the flag is set.
pub fn build_contact_predicate(filter: ContactFilter) -> Predicate<Contact> {
    let prefix_matches = starts_with_prefix(filter.prefix);

    if !filter.only_with_phone_number {
        return Box::new(prefix_matches);
    }

    Box::new(move |c: &Contact| prefix_matches(c) && has_phone_number(c))
}

/// Duration queries over a visit log.
pub trait VisitLogExt {
    /// Average duration of visits from `os`.
    fn average_duration(&self, os: Os) -> Option<f64>;

    /// Average duration of visits matching `predicate`.
    fn average_duration_for<P>(&self, predicate: P) -> Option<f64>
    where
        P: Fn(&SiteVisit) -> bool;
}

impl VisitLogExt for [SiteVisit] {
    fn average_duration(&self, os: Os) -> Option<f64> {
        self.average_duration_for(|v| v.os == os)
    }

    fn average_duration_for<P>(&self, predicate: P) -> Option<f64>
    where
        P: Fn(&SiteVisit) -> bool,
    {
        average(self, predicate, |v| v.duration)
    }
}

/// Matches visits from any of `platforms`, optionally restricted to one path.
pub fn visit_query(platforms: Vec<Os>, path: Option<String>) -> Predicate<SiteVisit> {
    Box::new(move |v: &SiteVisit| {
        let os_matches = platforms.is_empty() || platforms.contains(&v.os);
        let path_matches = path.as_deref().map_or(true, |p| v.path == p);
        os_matches && path_matches
    })
}

/// Return the first person named `name`, stopping at the first match.
pub fn find_by_name<'a>(people: &'a [Person], name: &str) -> Option<&'a Person> {
    for person in people {
        if person.name == name {
            return Some(person);
        }
    }
    None
}

/// Matches people strictly younger than `age`.
pub fn younger_than(age: u32) -> impl Fn(&Person) -> bool {
    move |p: &Person| p.age < age
}
