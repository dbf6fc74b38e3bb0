//! Keystroke formatters for the card and address forms.
//!
//! Both card forms pass every keystroke through these functions before the
//! value is stored in the form. They only ever keep digits and cap the
//! length, so stripping whitespace from a formatted number gives back
//! exactly the digits the validator sees.
//!
//! # Example
//!
//! ```
//! use storefront_cards::format::{format_card_number, format_expiry_input, strip_whitespace};
//!
//! let shown = format_card_number("45320151128303661234");
//! assert_eq!(shown, "4532 0151 1283 0366");
//! assert_eq!(strip_whitespace(&shown), "4532015112830366");
//!
//! assert_eq!(format_expiry_input("1"), "1");
//! assert_eq!(format_expiry_input("123"), "12/3");
//! assert_eq!(format_expiry_input("12/30"), "12/30");
//! ```

use crate::card::CARD_DIGITS;
use crate::cvv::CVV_DIGITS;

/// Digits in an Indian postal pincode.
pub const PINCODE_DIGITS: usize = 6;

/// Keeps at most `max` ASCII digits from `input`.
fn digits_capped(input: &str, max: usize) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// Removes all whitespace, the cleaning step applied before validation.
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Formats card number input as groups of four digits separated by spaces.
///
/// Non-digits are dropped and input is capped at 16 digits.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats card number input as groups of four with a custom separator.
///
/// # Example
///
/// ```
/// use storefront_cards::format::format_with_separator;
///
/// assert_eq!(format_with_separator("4532015112830366", "-"), "4532-0151-1283-0366");
/// ```
pub fn format_with_separator(input: &str, separator: &str) -> String {
    split_into_groups(input).join(separator)
}

/// Splits card number input into groups of up to four digits.
///
/// # Example
///
/// ```
/// use storefront_cards::format::split_into_groups;
///
/// assert_eq!(split_into_groups("453201"), vec!["4532", "01"]);
/// ```
pub fn split_into_groups(input: &str) -> Vec<String> {
    let digits: Vec<char> = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CARD_DIGITS)
        .collect();

    digits.chunks(4).map(|group| group.iter().collect()).collect()
}

/// Formats expiry input as `MM/YY` while the user types.
///
/// Keeps at most four digits and inserts the slash once two digits exist.
pub fn format_expiry_input(input: &str) -> String {
    let digits = digits_capped(input, 4);
    if digits.len() >= 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Keeps at most three digits of CVV input.
pub fn format_cvv_input(input: &str) -> String {
    digits_capped(input, CVV_DIGITS)
}

/// Keeps at most six digits of pincode input.
pub fn format_pincode_input(input: &str) -> String {
    digits_capped(input, PINCODE_DIGITS)
}
