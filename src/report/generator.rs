//! Markdown and JSON report generation.
//!
//! This module renders a [`Report`] for the console or for a file. Averages
//! that have no value (no matching visit) render as `n/a` in Markdown and
//! as `null` in JSON.

use super::text::{anchor, escape_cell, join_to_string, JoinOptions};
use crate::analysis::slowest_platforms;
use crate::models::{Contact, PeopleSummary, Person, Report, ReportMetadata, VisitSummary};
use anyhow::Result;

const CONTACTS_HEADING: &str = "Matched Contacts";
const VISITS_HEADING: &str = "Visit Durations";
const PEOPLE_HEADING: &str = "People";

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# RecSift Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report));
    output.push_str(&generate_contacts_section(&report.contacts));
    output.push_str(&generate_visits_section(&report.visits));
    output.push_str(&generate_people_section(&report.people));
    output.push_str(&generate_footer());

    output
}

/// Render an optional average, `n/a` when there is none.
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("{:.2}s", value),
        None => "n/a".to_string(),
    }
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let prefix = if metadata.prefix.is_empty() {
        "(any)".to_string()
    } else {
        format!("`{}`", metadata.prefix)
    };
    section.push_str(&format!("- **Name Prefix:** {}\n", prefix));
    section.push_str(&format!(
        "- **Only With Phone Number:** {}\n",
        if metadata.only_with_phone_number { "yes" } else { "no" }
    ));
    section.push_str(&format!(
        "- **Contacts:** {} matched of {} ({} with phone number)\n",
        metadata.matched_contacts, metadata.total_contacts, metadata.contacts_with_phone
    ));
    section.push('\n');

    section
}

fn generate_table_of_contents(report: &Report) -> String {
    let headings = [
        Some("Metadata"),
        Some(CONTACTS_HEADING),
        Some(VISITS_HEADING),
        has_people_section(&report.people).then_some(PEOPLE_HEADING),
    ];
    let headings: Vec<&str> = headings.into_iter().flatten().collect();

    let options = JoinOptions {
        separator: "\n",
        prefix: "## Table of Contents\n\n",
        postfix: "\n\n",
    };

    join_to_string(
        &headings,
        &options,
        Some(|h: &&str| format!("- [{}](#{})", h, anchor(h))),
    )
}

fn generate_contacts_section(contacts: &[Contact]) -> String {
    let mut section = format!("## {}\n\n", CONTACTS_HEADING);

    if contacts.is_empty() {
        section.push_str("No contacts matched the filter.\n\n");
        return section;
    }

    section.push_str("| First Name | Last Name | Phone |\n");
    section.push_str("|:---|:---|:---|\n");
    for contact in contacts {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&contact.first_name),
            escape_cell(&contact.last_name),
            escape_cell(contact.phone_number.as_deref().unwrap_or("-"))
        ));
    }
    section.push('\n');

    section
}

fn generate_visits_section(visits: &VisitSummary) -> String {
    let mut section = format!("## {}\n\n", VISITS_HEADING);

    section.push_str(&format!(
        "- **Visits:** {}\n- **Overall Average:** {}\n- **Mobile Average:** {}\n",
        visits.total,
        format_average(visits.overall_average),
        format_average(visits.mobile_average)
    ));

    if let Some(ref query) = visits.query {
        section.push_str(&format!(
            "- **Query** ({}): {} ({} visits)\n",
            query,
            format_average(visits.query_average),
            visits.query_matches
        ));
    }
    section.push('\n');

    if !visits.by_os.is_empty() {
        section.push_str("| Platform | Visits | Average |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for entry in slowest_platforms(&visits.by_os) {
            section.push_str(&format!(
                "| {} | {} | {} |\n",
                entry.os,
                entry.visits,
                format_average(Some(entry.average))
            ));
        }
        section.push('\n');
    }

    section
}

fn has_people_section(people: &PeopleSummary) -> bool {
    people.searched_name.is_some() || people.younger_than.is_some()
}

fn generate_people_section(people: &PeopleSummary) -> String {
    if !has_people_section(people) {
        return String::new();
    }

    let mut section = format!("## {}\n\n", PEOPLE_HEADING);

    if let Some(ref name) = people.searched_name {
        match people.found {
            Some(ref person) => section.push_str(&format!(
                "- **{}:** found (age {})\n",
                name, person.age
            )),
            None => section.push_str(&format!("- **{}:** not found\n", name)),
        }
    }

    if let Some(age) = people.younger_than {
        let names = join_to_string(
            &people.younger,
            &JoinOptions::default(),
            None::<fn(&Person) -> String>,
        );
        let names = if names.is_empty() { "none".to_string() } else { names };
        section.push_str(&format!("- **Younger than {}:** {}\n", age, names));
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    "---\n\n*Report generated by RecSift*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
