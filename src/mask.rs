//! Masking for display and logging.
//!
//! Only the last four digits of a card ever leave the validator, whether
//! on screen, in a log line or in a stored row.

use crate::ValidatedCard;

const MASKED_GROUPS: &str = "**** **** ****";

/// Masks a validated card as `**** **** **** 0366`.
///
/// # Example
///
/// ```
/// use storefront_cards::{validate_for_saving, CardBrand, CardInput};
///
/// let input = CardInput::new(CardBrand::Visa, "4532015112830366", "JOHN DOE", "12/30", "123");
/// let card = validate_for_saving(&input).unwrap();
/// assert_eq!(card.masked(), "**** **** **** 0366");
/// ```
#[inline]
pub fn mask_card(card: &ValidatedCard) -> String {
    mask_last4(&card.last_four())
}

/// Masks a stored last-4 value the same way as a full card.
#[inline]
pub fn mask_last4(last4: &str) -> String {
    format!("{MASKED_GROUPS} {last4}")
}

/// Masks unvalidated input, keeping only its last four digits.
///
/// Inputs with four digits or fewer are masked entirely.
pub fn mask_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return "*".repeat(digits.len());
    }
    let last4: String = digits[digits.len() - 4..].iter().collect();
    mask_last4(&last4)
}

/// Extracts the last four digits from a card number string.
///
/// Whitespace is ignored. Returns an empty string if there are fewer than
/// four digits.
pub fn last_four_from_string(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].iter().collect()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_last4() {
        assert_eq!(mask_last4("1234"), "**** **** **** 1234");
    }

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("4532015112830366"), "**** **** **** 0366");
        assert_eq!(mask_string("4532 0151 1283 0366"), "**** **** **** 0366");
        assert_eq!(mask_string("123"), "***");
        assert_eq!(mask_string(""), "");
    }

    #[test]
    fn test_last_four_from_string() {
        assert_eq!(last_four_from_string("4532015112830366"), "0366");
        assert_eq!(last_four_from_string("4532 0151 1283 1234"), "1234");
        assert_eq!(last_four_from_string("123"), "");
    }
}
