//! Best-effort facts pulled out of free-text notes.
//!
//! Extraction notes often carry facts that never made it into structured
//! fields ("Occupancy: 94%", "Avg. Rent/SF: $2.15", "1.2 miles from
//! subject"). These helpers are only consulted when the structured field is
//! absent.

use std::sync::LazyLock;

use regex::Regex;

use crate::property::PropertyRecord;

static OCCUPANCY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Occupancy:\s*(\d+(?:\.\d+)?)").expect("Invalid occupancy regex")
});

static RENT_PER_SF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Avg\.?\s*Rent/SF:\s*\$?(\d+(?:\.\d+)?)").expect("Invalid rent/sf regex")
});

static DISTANCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:mi|miles?)\b").expect("Invalid distance regex")
});

fn capture_number(regex: &Regex, text: &str) -> Option<f64> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|value| value.as_str().parse().ok())
}

/// Occupancy percentage mentioned in the notes.
pub fn occupancy_from_notes(notes: &str) -> Option<f64> {
    capture_number(&OCCUPANCY_REGEX, notes)
}

/// Average rent per square foot mentioned in the notes.
pub fn rent_per_sf_from_notes(notes: &str) -> Option<f64> {
    capture_number(&RENT_PER_SF_REGEX, notes)
}

/// Distance (as written, e.g. "1.2 miles") mentioned in the notes.
pub fn distance_from_notes(notes: &str) -> Option<String> {
    DISTANCE_REGEX
        .find(notes)
        .map(|found| found.as_str().to_string())
}

/// Structured occupancy, falling back to the notes.
pub fn occupancy(record: &PropertyRecord) -> Option<f64> {
    record
        .basic_info
        .occupancy_rate
        .or_else(|| record.notes.as_deref().and_then(occupancy_from_notes))
}

/// Average rent per square foot; only ever present in notes.
pub fn rent_per_sf(record: &PropertyRecord) -> Option<f64> {
    record.notes.as_deref().and_then(rent_per_sf_from_notes)
}

/// Structured distance, falling back to the notes.
pub fn distance(record: &PropertyRecord) -> Option<String> {
    record
        .distance_from_subject
        .clone()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| record.notes.as_deref().and_then(distance_from_notes))
}
