// src/models/attendance.rs
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Presence status of a student on a given date.
/// On the wire the backend uses the two-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presence {
    #[serde(rename = "PR")]
    Present,
    #[serde(rename = "EX")]
    Excused,
    #[serde(rename = "UN")]
    Unexcused,
}

impl Presence {
    /// Every value, in the order the select control lists them.
    pub const ALL: [Presence; 3] = [Presence::Present, Presence::Excused, Presence::Unexcused];

    pub fn code(self) -> &'static str {
        match self {
            Presence::Present => "PR",
            Presence::Excused => "EX",
            Presence::Unexcused => "UN",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Presence::Present => "Present",
            Presence::Excused => "Excused Absence",
            Presence::Unexcused => "Unexcused Absence",
        }
    }
}

/// One attendance record as returned by `GET /api/students/{id}/attendance/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub date: String, // kept as the backend sent it; parsed only for ordering
    pub presence: Presence,
}

/// Body of `PUT /api/students/{id}/attendances/`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresenceUpdate {
    pub id: i64,
    pub presence: Presence,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part only).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_uses_two_letter_wire_codes() {
        let update = PresenceUpdate { id: 4, presence: Presence::Excused };
        let json = serde_json::to_value(update).unwrap();
        assert_eq!(json, serde_json::json!({"id": 4, "presence": "EX"}));

        let parsed: Attendance =
            serde_json::from_str(r#"{"id": 1, "date": "2024-02-01", "presence": "UN"}"#).unwrap();
        assert_eq!(parsed.presence, Presence::Unexcused);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(serde_json::from_str::<Attendance>(r#"{"id": 1, "date": "x", "presence": "LA"}"#).is_err());
        assert!(serde_json::from_str::<Presence>(r#""pr""#).is_err());
    }

    #[test]
    fn labels_match_select_options() {
        let labels: Vec<_> = Presence::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(labels, ["Present", "Excused Absence", "Unexcused Absence"]);
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("2024-03-09"), Some(day));
        assert_eq!(parse_date("2024-03-09T08:30:00Z"), Some(day));
        assert_eq!(parse_date("2024-03-09T23:30:00-02:00"), Some(day));
        assert_eq!(parse_date("March 9th"), None);
    }
}
