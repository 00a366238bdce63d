//! Small text helpers used when rendering reports.

use std::fmt::Display;

/// Separator, prefix and postfix for [`join_to_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOptions<'a> {
    pub separator: &'a str,
    pub prefix: &'a str,
    pub postfix: &'a str,
}

impl Default for JoinOptions<'_> {
    fn default() -> Self {
        Self {
            separator: ", ",
            prefix: "",
            postfix: "",
        }
    }
}

/// Join `items` into one string.
///
/// Each item is rendered with `transform` when given, otherwise with its
/// `Display` implementation.
pub fn join_to_string<T, F>(items: &[T], options: &JoinOptions<'_>, transform: Option<F>) -> String
where
    T: Display,
    F: Fn(&T) -> String,
{
    let mut result = String::from(options.prefix);

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            result.push_str(options.separator);
        }
        match &transform {
            Some(f) => result.push_str(&f(item)),
            None => result.push_str(&item.to_string()),
        }
    }

    result.push_str(options.postfix);
    result
}

/// Keep only the characters of `text` matching `predicate`.
pub fn filter_chars<P>(text: &str, predicate: P) -> String
where
    P: Fn(char) -> bool,
{
    text.chars().filter(|c| predicate(*c)).collect()
}

/// Escape a value for use inside a Markdown table cell.
pub fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

/// Build a Markdown heading anchor: lower-case, spaces to dashes, other
/// punctuation dropped.
pub fn anchor(heading: &str) -> String {
    let lowered = heading.to_lowercase().replace(' ', "-");
    filter_chars(&lowered, |c| c.is_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    #[test]
    fn test_join_with_defaults() {
        let joined = join_to_string(&[1, 2, 3], &JoinOptions::default(), None::<fn(&i32) -> String>);
        assert_eq!(joined, "1, 2, 3");
    }

    #[test]
    fn test_join_with_prefix_postfix_and_transform() {
        let options = JoinOptions {
            separator: "; ",
            prefix: "(",
            postfix: ")",
        };
        let joined = join_to_string(&["a", "b"], &options, Some(|s: &&str| s.to_uppercase()));
        assert_eq!(joined, "(A; B)");
    }

    #[test]
    fn test_join_uses_display_without_transform() {
        let people = vec![Person::new("Alice", 29), Person::new("Bob", 31)];
        let joined = join_to_string(&people, &JoinOptions::default(), None::<fn(&Person) -> String>);
        assert_eq!(joined, "Alice (29), Bob (31)");
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("A|B"), "A\\|B");
        assert_eq!(escape_cell("plain"), "plain");
    }

    #[test]
    fn test_join_empty() {
        let options = JoinOptions {
            prefix: "[",
            postfix: "]",
            ..JoinOptions::default()
        };
        let empty: [i32; 0] = [];
        assert_eq!(join_to_string(&empty, &options, None::<fn(&i32) -> String>), "[]");
    }

    #[test]
    fn test_filter_chars() {
        assert_eq!(filter_chars("ab1c", |c| c.is_ascii_lowercase()), "abc");
        assert_eq!(filter_chars("", |_| true), "");
    }

    #[test]
    fn test_anchor() {
        assert_eq!(anchor("Visit Durations"), "visit-durations");
        assert_eq!(anchor("People (search)"), "people-search");
    }
}
