//! CVV checks.
//!
//! Every brand the storefront accepts uses a three-digit CVV printed on the
//! back of the card. The value is checked and never stored.

use crate::error::{Field, ValidationError};

/// Number of digits a CVV must have.
pub const CVV_DIGITS: usize = 3;

/// Checks that `input` is present and exactly three ASCII digits.
///
/// # Example
///
/// ```
/// use storefront_cards::cvv::validate_cvv;
///
/// assert!(validate_cvv("123").is_ok());
/// assert!(validate_cvv("007").is_ok());
/// assert!(validate_cvv("1234").is_err());
/// assert!(validate_cvv("12a").is_err());
/// ```
pub fn validate_cvv(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::MissingField { field: Field::Cvv });
    }

    if !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::BadFormat {
            field: Field::Cvv,
            expected: "contain digits only",
        });
    }

    if input.len() != CVV_DIGITS {
        return Err(ValidationError::WrongLength {
            field: Field::Cvv,
            expected: CVV_DIGITS,
            actual: input.len(),
        });
    }

    Ok(())
}

/// Checks if a string is a valid CVV.
#[inline]
pub fn is_valid_cvv(input: &str) -> bool {
    validate_cvv(input).is_ok()
}
