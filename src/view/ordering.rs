// src/view/ordering.rs
use crate::models::attendance::{parse_date, Attendance};
use chrono::NaiveDate;
use std::cmp::Ordering;

// Parseable dates first (ascending), unparseable ones after them
fn date_sort_key(raw: &str) -> (bool, Option<NaiveDate>) {
    let parsed = parse_date(raw);
    (parsed.is_none(), parsed)
}

/// Chronological comparison of two wire-format dates.
/// Two unparseable dates compare equal so a stable sort keeps their input order.
pub fn compare_dates(a: &str, b: &str) -> Ordering {
    date_sort_key(a).cmp(&date_sort_key(b))
}

/// Oldest first. Each date is parsed once.
pub fn sort_attendances(mut attendances: Vec<Attendance>) -> Vec<Attendance> {
    attendances.sort_by_cached_key(|a| date_sort_key(&a.date));
    attendances
}
