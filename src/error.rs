//! Error types for card form validation.
//!
//! Every failure names the form field it concerns and renders a message
//! that can be shown inline next to that field. Validation stops at the
//! first violated rule, so a caller only ever sees one of these at a time.

use crate::CardBrand;
use std::fmt;
use thiserror::Error;

/// The card form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Field {
    /// The card number.
    Number,
    /// The card holder's name.
    HolderName,
    /// The MM/YY expiry date.
    Expiry,
    /// The card verification value.
    Cvv,
}

impl Field {
    /// Returns the label used in user-facing messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Number => "card number",
            Self::HolderName => "card holder name",
            Self::Expiry => "expiry date",
            Self::Cvv => "CVV",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a card form can be rejected.
///
/// All variants are recoverable input errors: the form is shown again
/// with the message and the user corrects the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty (after trimming whitespace).
    #[error("{field} is required")]
    MissingField {
        /// The empty field.
        field: Field,
    },

    /// A field had the wrong number of characters.
    #[error("{}", length_message(.field, .expected, .actual))]
    WrongLength {
        /// The offending field.
        field: Field,
        /// Required length (exact, or minimum for the holder name).
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// A field contained characters or a layout it may not have.
    #[error("{field} must {expected}")]
    BadFormat {
        /// The offending field.
        field: Field,
        /// What the field must look like, phrased to follow "must".
        expected: &'static str,
    },

    /// The number does not start with the prefix of the selected brand.
    #[error(
        "{} cards must start with {}. Please check your card number or select the correct card type",
        .brand.name(),
        .brand.expected_prefix()
    )]
    PrefixMismatch {
        /// The brand the user selected.
        brand: CardBrand,
    },

    /// The number failed the Luhn checksum.
    #[error("invalid card number, please check and try again")]
    ChecksumFailed,

    /// The expiry month lies before the current month.
    #[error("card has expired ({month:02}/{year})")]
    Expired {
        /// Parsed expiry month.
        month: u8,
        /// Parsed four-digit expiry year.
        year: u16,
    },
}

fn length_message(field: &Field, expected: &usize, actual: &usize) -> String {
    match field {
        Field::Number | Field::Cvv => format!("{field} must be {expected} digits, got {actual}"),
        Field::HolderName => {
            format!("{field} must be at least {expected} characters, got {actual}")
        }
        Field::Expiry => format!("{field} must be {expected} characters, got {actual}"),
    }
}

/// Coarse classification of a [`ValidationError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    /// See [`ValidationError::MissingField`].
    MissingField,
    /// See [`ValidationError::WrongLength`].
    WrongLength,
    /// See [`ValidationError::BadFormat`].
    BadFormat,
    /// See [`ValidationError::PrefixMismatch`].
    PrefixMismatch,
    /// See [`ValidationError::ChecksumFailed`].
    ChecksumFailed,
    /// See [`ValidationError::Expired`].
    Expired,
}

impl ErrorKind {
    /// Snake-case identifier, used in logs and API responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::WrongLength => "wrong_length",
            Self::BadFormat => "bad_format",
            Self::PrefixMismatch => "prefix_mismatch",
            Self::ChecksumFailed => "checksum_failed",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ValidationError {
    /// Returns the classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } => ErrorKind::MissingField,
            Self::WrongLength { .. } => ErrorKind::WrongLength,
            Self::BadFormat { .. } => ErrorKind::BadFormat,
            Self::PrefixMismatch { .. } => ErrorKind::PrefixMismatch,
            Self::ChecksumFailed => ErrorKind::ChecksumFailed,
            Self::Expired { .. } => ErrorKind::Expired,
        }
    }

    /// Returns the form field this error should be displayed against.
    pub const fn field(&self) -> Field {
        match self {
            Self::MissingField { field }
            | Self::WrongLength { field, .. }
            | Self::BadFormat { field, .. } => *field,
            Self::PrefixMismatch { .. } | Self::ChecksumFailed => Field::Number,
            Self::Expired { .. } => Field::Expiry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ValidationError::MissingField {
                field: Field::Number
            }
            .to_string(),
            "card number is required"
        );

        assert_eq!(
            ValidationError::WrongLength {
                field: Field::Number,
                expected: 16,
                actual: 15
            }
            .to_string(),
            "card number must be 16 digits, got 15"
        );

        assert_eq!(
            ValidationError::WrongLength {
                field: Field::HolderName,
                expected: 3,
                actual: 2
            }
            .to_string(),
            "card holder name must be at least 3 characters, got 2"
        );

        assert_eq!(
            ValidationError::BadFormat {
                field: Field::Expiry,
                expected: "be in MM/YY format"
            }
            .to_string(),
            "expiry date must be in MM/YY format"
        );

        assert_eq!(
            ValidationError::Expired {
                month: 3,
                year: 2020
            }
            .to_string(),
            "card has expired (03/2020)"
        );
    }

    #[test]
    fn test_prefix_mismatch_names_prefix() {
        let msg = ValidationError::PrefixMismatch {
            brand: CardBrand::Mastercard,
        }
        .to_string();
        assert!(msg.starts_with("Mastercard cards must start with 51-55"));

        let msg = ValidationError::PrefixMismatch {
            brand: CardBrand::RuPay,
        }
        .to_string();
        assert!(msg.starts_with("RuPay cards must start with 6"));
    }

    #[test]
    fn test_kind_and_field() {
        let err = ValidationError::ChecksumFailed;
        assert_eq!(err.kind(), ErrorKind::ChecksumFailed);
        assert_eq!(err.field(), Field::Number);
        assert_eq!(err.kind().as_str(), "checksum_failed");

        let err = ValidationError::Expired { month: 1, year: 2020 };
        assert_eq!(err.field(), Field::Expiry);

        let err = ValidationError::WrongLength {
            field: Field::Cvv,
            expected: 3,
            actual: 4,
        };
        assert_eq!(err.kind(), ErrorKind::WrongLength);
        assert_eq!(err.field(), Field::Cvv);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationError>();
    }
}
