//! Card expiry parsing and comparison.
//!
//! The payment forms accept exactly one layout, `MM/YY`: two digits, a
//! slash, two digits, with nothing around them. The year is read as
//! `2000 + YY`.
//!
//! # Example
//!
//! ```
//! use storefront_cards::expiry::{parse_expiry, ExpiryDate};
//! use chrono::NaiveDate;
//!
//! let expiry = parse_expiry("12/30").unwrap();
//! assert_eq!(expiry.month(), 12);
//! assert_eq!(expiry.year(), 2030);
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! assert!(!expiry.is_expired_at(today));
//! assert!(ExpiryDate::new(9, 2026).unwrap().is_expired_at(today));
//! ```

use crate::error::{Field, ValidationError};
use chrono::{Datelike, NaiveDate};
use std::fmt;

const FORMAT_HINT: &str = "be in MM/YY format";
const MONTH_HINT: &str = "have a month between 01 and 12";

/// A parsed `MM/YY` expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpiryDate {
    month: u8,
    year: u16,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Returns the month as typed. Only guaranteed to be 1-12 when the
    /// month range check was enabled during parsing.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Months since year 0, counting an out-of-range month as overflow
    /// into the neighbouring year (month 13 of 2030 is January 2031).
    const fn month_index(&self) -> i32 {
        self.year as i32 * 12 + self.month as i32 - 1
    }

    /// Returns true if the expiry month lies before the month of `today`.
    ///
    /// A card is usable through the whole of its expiry month, so the
    /// current month is not expired.
    pub fn is_expired_at(&self, today: NaiveDate) -> bool {
        self.month_index() < month_index_of(today)
    }

    /// Returns true if the card has expired according to the local clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(today())
    }

    /// Returns the number of months from `today` until the expiry month.
    ///
    /// Returns 0 if already expired.
    pub fn months_until_expiry_at(&self, today: NaiveDate) -> u32 {
        (self.month_index() - month_index_of(today)).max(0) as u32
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year % 100)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

fn month_index_of(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Returns the current local date, the reference point for expiry checks.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parses an `MM/YY` expiry and checks the month is 1-12.
///
/// # Example
///
/// ```
/// use storefront_cards::expiry::parse_expiry;
///
/// assert!(parse_expiry("01/99").is_ok());
/// assert!(parse_expiry("1/25").is_err());
/// assert!(parse_expiry("13/25").is_err());
/// ```
pub fn parse_expiry(input: &str) -> Result<ExpiryDate, ValidationError> {
    parse_expiry_with(input, true)
}

/// Parses an `MM/YY` expiry, optionally skipping the month range check.
///
/// With `check_month_range` off, any two digits are accepted as the month,
/// which matches forms that only ever checked the layout.
pub fn parse_expiry_with(
    input: &str,
    check_month_range: bool,
) -> Result<ExpiryDate, ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::MissingField {
            field: Field::Expiry,
        });
    }

    let bytes = input.as_bytes();
    let &[m1, m2, b'/', y1, y2] = bytes else {
        return Err(bad_format(FORMAT_HINT));
    };
    if ![m1, m2, y1, y2].iter().all(u8::is_ascii_digit) {
        return Err(bad_format(FORMAT_HINT));
    }

    let month = (m1 - b'0') * 10 + (m2 - b'0');
    let year = 2000 + ((y1 - b'0') * 10 + (y2 - b'0')) as u16;

    if check_month_range && !(1..=12).contains(&month) {
        return Err(bad_format(MONTH_HINT));
    }

    Ok(ExpiryDate { month, year })
}

/// Rejects an expiry whose month lies before the month of `today`.
pub fn check_not_expired(expiry: ExpiryDate, today: NaiveDate) -> Result<(), ValidationError> {
    if expiry.is_expired_at(today) {
        return Err(ValidationError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }
    Ok(())
}

/// Returns true if `input` has the `MM/YY` layout with a month of 1-12.
#[inline]
pub fn is_well_formed(input: &str) -> bool {
    parse_expiry(input).is_ok()
}

fn bad_format(expected: &'static str) -> ValidationError {
    ValidationError::BadFormat {
        field: Field::Expiry,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_mm_yy() {
        let expiry = parse_expiry("12/30").unwrap();
        assert_eq!(expiry.month(), 12);
        assert_eq!(expiry.year(), 2030);

        let expiry = parse_expiry("01/99").unwrap();
        assert_eq!(expiry.month(), 1);
        assert_eq!(expiry.year(), 2099);
    }

    #[test]
    fn test_rejects_other_layouts() {
        for input in ["1/25", "13/5", "ab/cd", "12-30", "1230", "12/2030", " 12/30", "12/30 "] {
            assert!(
                matches!(
                    parse_expiry(input),
                    Err(ValidationError::BadFormat {
                        field: Field::Expiry,
                        ..
                    })
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_is_missing() {
        assert_eq!(
            parse_expiry(""),
            Err(ValidationError::MissingField {
                field: Field::Expiry
            })
        );
    }

    #[test]
    fn test_month_range() {
        assert_eq!(
            parse_expiry("00/30"),
            Err(ValidationError::BadFormat {
                field: Field::Expiry,
                expected: MONTH_HINT
            })
        );
        assert!(parse_expiry("13/30").is_err());

        let expiry = parse_expiry_with("13/30", false).unwrap();
        assert_eq!(expiry.month(), 13);
    }

    #[test]
    fn test_expired_by_month() {
        let today = date(2026, 10, 19);
        assert!(ExpiryDate::new(9, 2026).unwrap().is_expired_at(today));
        assert!(ExpiryDate::new(12, 2025).unwrap().is_expired_at(today));
        assert!(!ExpiryDate::new(10, 2026).unwrap().is_expired_at(today));
        assert!(!ExpiryDate::new(11, 2026).unwrap().is_expired_at(today));
        assert!(!ExpiryDate::new(1, 2027).unwrap().is_expired_at(today));
    }

    #[test]
    fn test_current_month_on_last_day() {
        let expiry = ExpiryDate::new(10, 2026).unwrap();
        assert!(!expiry.is_expired_at(date(2026, 10, 31)));
        assert!(expiry.is_expired_at(date(2026, 11, 1)));
    }

    #[test]
    fn test_out_of_range_month_rolls_over() {
        let expiry = parse_expiry_with("13/25", false).unwrap();
        // Month 13 of 2025 compares as January 2026.
        assert!(!expiry.is_expired_at(date(2026, 1, 15)));
        assert!(expiry.is_expired_at(date(2026, 2, 1)));
    }

    #[test]
    fn test_check_not_expired() {
        let today = date(2026, 10, 19);
        let expiry = parse_expiry("01/20").unwrap();
        assert_eq!(
            check_not_expired(expiry, today),
            Err(ValidationError::Expired {
                month: 1,
                year: 2020
            })
        );
        assert!(check_not_expired(parse_expiry("12/30").unwrap(), today).is_ok());
    }

    #[test]
    fn test_months_until_expiry() {
        let today = date(2026, 10, 19);
        assert_eq!(ExpiryDate::new(12, 2026).unwrap().months_until_expiry_at(today), 2);
        assert_eq!(ExpiryDate::new(1, 2020).unwrap().months_until_expiry_at(today), 0);
    }

    #[test]
    fn test_format() {
        let expiry = ExpiryDate::new(3, 2025).unwrap();
        assert_eq!(expiry.format_short(), "03/25");
        assert_eq!(expiry.to_string(), "03/25");
    }

    #[test]
    fn test_expiry_date_new() {
        assert!(ExpiryDate::new(1, 2025).is_some());
        assert!(ExpiryDate::new(12, 2025).is_some());
        assert!(ExpiryDate::new(0, 2025).is_none());
        assert!(ExpiryDate::new(13, 2025).is_none());
    }
}
