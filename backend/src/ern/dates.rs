//! Release date helpers.

use chrono::NaiveDate;

use crate::error::{ErnError, ErnResult};

/// `YYYY-MM-DD` prefix of the release date when it is a real calendar date,
/// otherwise the trimmed input.
pub fn format_release_date(raw: &str) -> String {
    let value = raw.trim();
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Leading four-digit year of the release date.
pub fn release_year(raw: &str) -> ErnResult<i32> {
    let value = raw.trim();
    value
        .get(..4)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
        .ok_or_else(|| ErnError::malformed("releaseDate", value, "no leading four-digit year"))
}

/// Explicit copyright year, else the release year.
pub fn copyright_year(explicit: Option<i32>, release_date: &str) -> ErnResult<i32> {
    match explicit {
        Some(year) => Ok(year),
        None => release_year(release_date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("2024-03-15"), "2024-03-15");
        assert_eq!(format_release_date("2024-03-15T00:00:00.000Z"), "2024-03-15");
        assert_eq!(format_release_date(" 2024-03-15 "), "2024-03-15");
        // Not a calendar date: kept as-is
        assert_eq!(format_release_date("2024-02-30"), "2024-02-30");
        assert_eq!(format_release_date("2024"), "2024");
        assert_eq!(format_release_date(""), "");
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year("2024-03-15").unwrap(), 2024);
        assert_eq!(release_year("1999").unwrap(), 1999);
    }

    #[test]
    fn test_release_year_malformed() {
        for raw in ["", "TBA", "15/03/2024", "20-1"] {
            let err = release_year(raw).unwrap_err();
            assert!(err.is_malformed_input(), "{raw}");
        }
    }

    #[test]
    fn test_copyright_year() {
        assert_eq!(copyright_year(Some(2019), "2024-03-15").unwrap(), 2019);
        assert_eq!(copyright_year(None, "2024-03-15").unwrap(), 2024);
        // An explicit year never looks at the date
        assert_eq!(copyright_year(Some(2019), "TBA").unwrap(), 2019);
        assert!(copyright_year(None, "TBA").is_err());
    }
}
