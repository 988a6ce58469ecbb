//! Small text and date helpers shared by the extractors.

use chrono::NaiveDate;

/// Format used in every date-stamped file name.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[must_use]
pub fn date_stamp(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` stamp.
#[must_use]
pub fn parse_date_stamp(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Remove `**` bold markers and surrounding whitespace.
#[must_use]
pub fn strip_bold(s: &str) -> String {
    s.replace("**", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_stamp_round_trips() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7);
        assert_eq!(date.map(date_stamp).as_deref(), Some("2026-03-07"));
        assert_eq!(parse_date_stamp(" 2026-03-07 "), date);
        assert_eq!(parse_date_stamp("03/07/2026"), None);
    }

    #[test]
    fn test_strip_bold() {
        assert_eq!(strip_bold(" **Ship** the beta "), "Ship the beta");
    }
}
