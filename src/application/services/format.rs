//! Display formatting for bill fields.

use chrono::{Datelike, NaiveDate};

/// French short month names, capitalized the way the product displays them.
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Formats an ISO calendar date for display: `2004-04-04` → `4 Avr. 04`.
///
/// # Errors
/// Returns the parse error for anything that is not a `YYYY-MM-DD` date;
/// callers fall back to the raw string so one corrupt record never takes
/// the whole list down.
pub fn format_display_date(raw: &str) -> Result<String, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    let month = MONTH_ABBREVIATIONS[date.month0() as usize];
    Ok(format!(
        "{} {}. {:02}",
        date.day(),
        month,
        date.year().rem_euclid(100)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2004-04-04", "4 Avr. 04")]
    #[test_case("2001-01-01", "1 Jan. 01")]
    #[test_case("2021-12-31", "31 Déc. 21")]
    #[test_case("2003-03-03", "3 Mar. 03")]
    fn test_formats_iso_dates(raw: &str, expected: &str) {
        assert_eq!(format_display_date(raw).unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("not-a-date"; "garbage")]
    #[test_case("2004-13-01"; "month out of range")]
    #[test_case("04/04/2004"; "wrong separator order")]
    fn test_rejects_malformed_dates(raw: &str) {
        assert!(format_display_date(raw).is_err());
    }
}
