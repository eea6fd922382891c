use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses the timestamp shapes the backend emits. Offset-less values are
/// treated as UTC and bare dates as UTC midnight.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn format_optional_date(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_date).unwrap_or_else(|| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_bare_dates_as_utc_midnight() {
        let parsed = parse_timestamp("2024-01-01").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2024, 1, 1));
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn parses_rfc3339_and_normalizes_offset() {
        let parsed = parse_timestamp("2024-03-05T10:30:00.000+05:30").unwrap();
        assert_eq!((parsed.hour(), parsed.minute()), (5, 0));
        assert!(parse_timestamp("2024-03-05T10:30:00Z").is_some());
    }

    #[test]
    fn parses_naive_date_times() {
        assert!(parse_timestamp("2024-03-05T10:30:00").is_some());
        assert!(parse_timestamp("2024-03-05 10:30:00.123").is_some());
    }

    #[test]
    fn rejects_blank_and_malformed_values() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-40").is_none());
    }

    #[test]
    fn optional_dates_fall_back_to_na() {
        assert_eq!(format_optional_date(None), "N/A");
        let date = parse_timestamp("2024-02-09").unwrap();
        assert_eq!(format_optional_date(Some(&date)), "09/02/2024");
    }
}
