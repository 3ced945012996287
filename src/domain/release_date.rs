//! Release date parsing
//!
//! Sheets hold dates written by either table format: `YYYY-MM-DD` for most
//! components and `YY-MM-DD` for the icon category. Both must order correctly
//! against each other.

use chrono::NaiveDate;

/// Canonical date format written to sheets and used for "today" comparisons
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Two-digit-year fallback
const SHORT_DATE_FORMAT: &str = "%y-%m-%d";

/// Parse a release date, trying the four-digit year form first and the
/// two-digit year form second. Returns `None` when neither applies.
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let year = value.split('-').next()?;
    if !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let format = match year.len() {
        4 => DATE_FORMAT,
        2 => SHORT_DATE_FORMAT,
        _ => return None,
    };
    NaiveDate::parse_from_str(value, format).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_four_digit_year() {
        assert_eq!(parse_release_date("2024-02-03"), Some(date(2024, 2, 3)));
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(parse_release_date("23-01-02"), Some(date(2023, 1, 2)));
    }

    #[test]
    fn test_single_digit_month_and_day() {
        assert_eq!(parse_release_date("2024-1-5"), Some(date(2024, 1, 5)));
    }

    #[test]
    fn test_short_and_long_forms_compare() {
        let short = parse_release_date("23-12-31").unwrap();
        let long = parse_release_date("2024-01-01").unwrap();
        assert!(short < long);
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_release_date(""), None);
        assert_eq!(parse_release_date("TBD"), None);
        assert_eq!(parse_release_date("2024/01/02"), None);
        assert_eq!(parse_release_date("2024-13-01"), None);
        assert_eq!(parse_release_date("202-01-01"), None);
        assert_eq!(parse_release_date("-2024-01-01"), None);
    }
}
