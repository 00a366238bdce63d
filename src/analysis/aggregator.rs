//! Visit and contact aggregation.
//!
//! This module builds the summary statistics that go into a report from
//! the filtered record collections.

use super::filters::{average, filter, find_by_name, has_phone_number, younger_than, Predicate};
use super::VisitLogExt;
use crate::models::{Contact, Os, OsDuration, PeopleSummary, Person, SiteVisit, VisitSummary};
use std::collections::BTreeMap;
use tracing::debug;

/// Contact counts for a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactStats {
    pub total: usize,
    pub with_phone: usize,
}

impl ContactStats {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        Self {
            total: contacts.len(),
            with_phone: contacts.iter().filter(|c| has_phone_number(c)).count(),
        }
    }
}

/// Group visits by platform, in `Os` declaration order.
pub fn group_by_os(visits: &[SiteVisit]) -> BTreeMap<Os, Vec<SiteVisit>> {
    let mut grouped: BTreeMap<Os, Vec<SiteVisit>> = BTreeMap::new();

    for visit in visits {
        grouped.entry(visit.os).or_default().push(visit.clone());
    }

    grouped
}

/// Average duration for each platform present in the log.
pub fn duration_by_os(visits: &[SiteVisit]) -> Vec<OsDuration> {
    group_by_os(visits)
        .into_iter()
        .filter_map(|(os, group)| {
            group.average_duration(os).map(|average| OsDuration {
                os,
                visits: group.len(),
                average,
            })
        })
        .collect()
}

/// Summarize the visit log, optionally with a custom query.
pub fn summarize_visits(
    visits: &[SiteVisit],
    query: Option<(String, Predicate<SiteVisit>)>,
) -> VisitSummary {
    let mut summary = VisitSummary {
        total: visits.len(),
        overall_average: average(visits, |_| true, |v| v.duration),
        by_os: duration_by_os(visits),
        mobile_average: visits.average_duration_for(|v| v.os.is_mobile()),
        ..VisitSummary::default()
    };

    if let Some((description, predicate)) = query {
        let matched = filter(visits, &predicate);
        debug!("Query '{}' matched {} visits", description, matched.len());
        summary.query_matches = matched.len();
        summary.query_average = matched.average_duration_for(|_| true);
        summary.query = Some(description);
    }

    summary
}

/// Run the name search and the age filter over `people`.
pub fn summarize_people(
    people: &[Person],
    name: Option<&str>,
    younger_than_age: Option<u32>,
) -> PeopleSummary {
    let found = name.and_then(|n| find_by_name(people, n)).cloned();
    let younger = younger_than_age
        .map(|age| filter(people, younger_than(age)))
        .unwrap_or_default();

    PeopleSummary {
        searched_name: name.map(String::from),
        found,
        younger_than: younger_than_age,
        younger,
    }
}

/// Platforms sorted by average duration, longest first.
pub fn slowest_platforms(by_os: &[OsDuration]) -> Vec<&OsDuration> {
    let mut sorted: Vec<&OsDuration> = by_os.iter().collect();
    sorted.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::visit_query;

    fn log() -> Vec<SiteVisit> {
        vec![
            SiteVisit::new("/", 34.0, Os::Windows),
            SiteVisit::new("/", 22.0, Os::Mac),
            SiteVisit::new("/login", 12.0, Os::Windows),
            SiteVisit::new("/signup", 8.0, Os::Ios),
            SiteVisit::new("/", 16.3, Os::Android),
        ]
    }

    #[test]
    fn test_contact_stats() {
        let contacts = vec![
            Contact::new("Dmitry", "Jemerov", Some("123-4567")),
            Contact::new("Svetlana", "Isakova", None),
        ];

        let stats = ContactStats::from_contacts(&contacts);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.with_phone, 1);
    }

    #[test]
    fn test_duration_by_os_skips_absent_platforms() {
        let visits = vec![
            SiteVisit::new("/", 60.0, Os::Windows),
            SiteVisit::new("/", 40.0, Os::Windows),
            SiteVisit::new("/", 10.0, Os::Mac),
        ];

        let by_os = duration_by_os(&visits);
        assert_eq!(by_os.len(), 2);
        assert_eq!(by_os[0].os, Os::Windows);
        assert_eq!(by_os[0].visits, 2);
        assert_eq!(by_os[0].average, 50.0);
        assert_eq!(by_os[1].os, Os::Mac);
        assert_eq!(by_os[1].average, 10.0);
    }

    #[test]
    fn test_summarize_visits_with_query() {
        let visits = log();
        let query = (
            "iOS on /signup".to_string(),
            visit_query(vec![Os::Ios], Some("/signup".to_string())),
        );

        let summary = summarize_visits(&visits, Some(query));
        assert_eq!(summary.total, 5);
        assert_eq!(summary.by_os.len(), 4);
        assert_eq!(summary.query_matches, 1);
        assert_eq!(summary.query_average, Some(8.0));
        assert_eq!(summary.query.as_deref(), Some("iOS on /signup"));

        let mobile = summary.mobile_average.unwrap();
        assert!((mobile - 12.15).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty_log() {
        let summary = summarize_visits(&[], None);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.overall_average, None);
        assert_eq!(summary.mobile_average, None);
        assert!(summary.by_os.is_empty());
        assert_eq!(summary.query, None);
    }

    #[test]
    fn test_summarize_people() {
        let people = vec![Person::new("Alice", 29), Person::new("Bob", 31)];

        let summary = summarize_people(&people, Some("Alice"), Some(30));
        assert_eq!(summary.found, Some(Person::new("Alice", 29)));
        assert_eq!(summary.younger, vec![Person::new("Alice", 29)]);

        let missing = summarize_people(&people, Some("Carol"), None);
        assert_eq!(missing.searched_name.as_deref(), Some("Carol"));
        assert_eq!(missing.found, None);
        assert!(missing.younger.is_empty());
    }

    #[test]
    fn test_slowest_platforms() {
        let by_os = duration_by_os(&log());
        let sorted = slowest_platforms(&by_os);
        assert_eq!(sorted[0].os, Os::Windows);
        assert_eq!(sorted[sorted.len() - 1].os, Os::Ios);
    }
}
