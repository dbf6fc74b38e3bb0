//! Card form validation.
//!
//! One validator serves both places a card is entered. Checkout uses the
//! [`ValidationRules::strict`] rule set; the saved-card form uses
//! [`ValidationRules::lenient`], which skips the brand prefix check and
//! the expired-card check and only asks for a non-empty holder name.
//!
//! Rules run in a fixed order and the first failure is returned:
//!
//! 1. number present, 16 digits after removing whitespace
//! 2. number prefix matches the selected brand (strict)
//! 3. Luhn checksum
//! 4. holder name present and long enough
//! 5. expiry in `MM/YY` form, and not in the past (strict)
//! 6. CVV of exactly 3 digits
//!
//! Validation is pure and cheap, so it can run on every keystroke.

use crate::card::{CardInput, CardNumber, ValidatedCard};
use crate::error::{Field, ValidationError};
use crate::{cvv, detect, expiry, luhn};
use chrono::NaiveDate;

/// Which of the rules a validation pass applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Require the number prefix to match the selected brand.
    pub check_brand_prefix: bool,
    /// Reject an expiry month earlier than the current month.
    pub reject_expired: bool,
    /// Minimum holder name length in characters after trimming (at least 1).
    pub min_holder_len: usize,
    /// Reject expiry months outside 01-12.
    pub check_month_range: bool,
}

impl ValidationRules {
    /// Rules applied before an order is placed.
    pub const fn strict() -> Self {
        Self {
            check_brand_prefix: true,
            reject_expired: true,
            min_holder_len: 3,
            check_month_range: true,
        }
    }

    /// Rules applied before a card is saved to the user's profile.
    pub const fn lenient() -> Self {
        Self {
            check_brand_prefix: false,
            reject_expired: false,
            min_holder_len: 1,
            check_month_range: true,
        }
    }

    /// Returns these rules with the month range check switched on or off.
    pub const fn with_month_range(mut self, enabled: bool) -> Self {
        self.check_month_range = enabled;
        self
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::strict()
    }
}

/// Named rule sets, for surfaces that pick one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValidationMode {
    /// Checkout rules.
    #[default]
    Strict,
    /// Saved-card rules.
    Lenient,
}

impl ValidationMode {
    /// Returns the rule set for this mode.
    pub const fn rules(&self) -> ValidationRules {
        match self {
            Self::Strict => ValidationRules::strict(),
            Self::Lenient => ValidationRules::lenient(),
        }
    }
}

impl From<ValidationMode> for ValidationRules {
    fn from(mode: ValidationMode) -> Self {
        mode.rules()
    }
}

/// Validates a card form against `rules`, treating `today` as the current date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use storefront_cards::{validate_card_at, CardBrand, CardInput, ValidationRules};
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let input = CardInput::new(CardBrand::Visa, "4532 0151 1283 0366", "JOHN DOE", "12/30", "123");
///
/// let card = validate_card_at(&input, &ValidationRules::strict(), today).unwrap();
/// assert_eq!(card.last_four(), "0366");
/// assert_eq!(card.expiry().year(), 2030);
/// ```
pub fn validate_card_at(
    input: &CardInput,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<ValidatedCard, ValidationError> {
    let number = CardNumber::parse(&input.number)?;

    if rules.check_brand_prefix {
        detect::check_prefix(input.brand, &number)?;
    }

    if !luhn::validate_16(number.digits()) {
        return Err(ValidationError::ChecksumFailed);
    }

    let holder_name = check_holder_name(&input.holder_name, rules.min_holder_len)?;

    let expiry = expiry::parse_expiry_with(&input.expiry, rules.check_month_range)?;
    if rules.reject_expired {
        expiry::check_not_expired(expiry, today)?;
    }

    cvv::validate_cvv(&input.cvv)?;

    Ok(ValidatedCard::new(
        input.brand,
        number,
        holder_name.to_string(),
        expiry,
    ))
}

/// Validates a card form against `rules` using the local date.
pub fn validate_card(
    input: &CardInput,
    rules: &ValidationRules,
) -> Result<ValidatedCard, ValidationError> {
    validate_card_at(input, rules, expiry::today())
}

/// Validates a card with the checkout rules.
///
/// # Example
///
/// ```
/// use storefront_cards::{validate_checkout, CardBrand, CardInput, ValidationError};
///
/// let input = CardInput::new(CardBrand::Mastercard, "4532015112830366", "JOHN DOE", "12/30", "123");
/// assert_eq!(
///     validate_checkout(&input).unwrap_err(),
///     ValidationError::PrefixMismatch { brand: CardBrand::Mastercard }
/// );
/// ```
#[inline]
pub fn validate_checkout(input: &CardInput) -> Result<ValidatedCard, ValidationError> {
    validate_card(input, &ValidationRules::strict())
}

/// Validates a card with the saved-card rules.
#[inline]
pub fn validate_for_saving(input: &CardInput) -> Result<ValidatedCard, ValidationError> {
    validate_card(input, &ValidationRules::lenient())
}

/// Returns true if the form passes `rules` today.
#[inline]
pub fn is_valid(input: &CardInput, rules: &ValidationRules) -> bool {
    validate_card(input, rules).is_ok()
}

fn check_holder_name(name: &str, min_len: usize) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField {
            field: Field::HolderName,
        });
    }

    let len = trimmed.chars().count();
    if len < min_len {
        return Err(ValidationError::WrongLength {
            field: Field::HolderName,
            expected: min_len,
            actual: len,
        });
    }

    Ok(trimmed)
}
