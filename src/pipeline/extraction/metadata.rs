//! Patient name and test date lookup in free-form lab report text.
//!
//! Lab reports have no common schema, so this is a first-match heuristic over
//! labelled fields. It will happily pick up an unrelated "Name:" line (a
//! referring physician, a lab name) if that line comes first. That is expected
//! behavior: callers get a best guess, or `[Unknown]`.

use std::sync::LazyLock;

use regex::Regex;

use super::types::UNKNOWN_FIELD;

/// `Name`, `Patient Name` or `Nom du patient`, then a run of word characters
/// and spaces. The capture stops at the end of the line.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Name|Patient Name|Nom du patient)[:\s]*([\w ]+)").unwrap()
});

/// `Date`, `Test Date` or `Date du test`, then DD/MM/YYYY or YYYY-MM-DD.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Date|Test Date|Date du test)[:\s]*(\d{2}/\d{2}/\d{4}|\d{4}-\d{2}-\d{2})")
        .unwrap()
});

/// Patient metadata found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientMetadata {
    pub patient_name: String,
    pub test_date: String,
}

/// Find the first labelled patient name and test date in `text`.
/// Missing fields come back as `[Unknown]`.
pub fn parse_metadata(text: &str) -> PatientMetadata {
    PatientMetadata {
        patient_name: first_capture(&NAME_PATTERN, text),
        test_date: first_capture(&DATE_PATTERN, text),
    }
}

fn first_capture(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string())
}
