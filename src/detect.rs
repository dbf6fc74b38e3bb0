//! Card brand classification from leading digits.
//!
//! The storefront recognises three networks with deliberately simple
//! prefix rules: Visa starts with 4, Mastercard with 51 through 55 and
//! RuPay with 6. Checkout refuses a number whose prefix disagrees with the
//! brand the user picked; the live form uses [`detect_brand`] to suggest
//! a brand while the number is being typed.

use crate::card::{CardBrand, CardNumber};
use crate::error::ValidationError;

/// Infers the brand from a sequence of digits (values 0-9).
///
/// Works on partial numbers, so a single `4` already reads as Visa.
///
/// # Example
///
/// ```
/// use storefront_cards::detect::detect_brand;
/// use storefront_cards::CardBrand;
///
/// assert_eq!(detect_brand(&[4, 5, 3, 2]), Some(CardBrand::Visa));
/// assert_eq!(detect_brand(&[5, 3]), Some(CardBrand::Mastercard));
/// assert_eq!(detect_brand(&[5, 6]), None);
/// assert_eq!(detect_brand(&[6, 0, 7, 0]), Some(CardBrand::RuPay));
/// ```
#[inline]
pub fn detect_brand(digits: &[u8]) -> Option<CardBrand> {
    CardBrand::ALL
        .into_iter()
        .find(|brand| brand.matches_prefix(digits))
}

/// Infers the brand from user input, ignoring anything that isn't a digit.
pub fn detect_brand_str(input: &str) -> Option<CardBrand> {
    let digits: Vec<u8> = input
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .take(2)
        .collect();
    detect_brand(&digits)
}

/// Checks that `number` carries the prefix of the declared `brand`.
///
/// # Example
///
/// ```
/// use storefront_cards::card::CardNumber;
/// use storefront_cards::detect::check_prefix;
/// use storefront_cards::{CardBrand, ValidationError};
///
/// let number = CardNumber::parse("5105105105105100").unwrap();
/// assert!(check_prefix(CardBrand::Mastercard, &number).is_ok());
/// assert_eq!(
///     check_prefix(CardBrand::Visa, &number),
///     Err(ValidationError::PrefixMismatch { brand: CardBrand::Visa })
/// );
/// ```
pub fn check_prefix(brand: CardBrand, number: &CardNumber) -> Result<(), ValidationError> {
    if brand.matches_prefix(number.digits()) {
        Ok(())
    } else {
        Err(ValidationError::PrefixMismatch { brand })
    }
}
