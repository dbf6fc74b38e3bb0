//! Core card types: brands, the raw form input and the validated card.
//!
//! `CardInput` is the transient record built from the payment form. It is
//! the only type that ever holds a CVV, and its sensitive fields are wiped
//! when it is dropped. A passing input becomes a `ValidatedCard`, which
//! keeps the cleaned number in a fixed-size array that is zeroed on drop.

use crate::error::{Field, ValidationError};
use crate::expiry::ExpiryDate;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Number of digits every accepted card number has.
pub const CARD_DIGITS: usize = 16;

/// Card networks the storefront accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardBrand {
    /// Visa - first digit 4
    Visa,
    /// Mastercard - first two digits 51-55
    Mastercard,
    /// RuPay - first digit 6
    RuPay,
}

impl CardBrand {
    /// All accepted brands, in the order the payment form lists them.
    pub const ALL: [CardBrand; 3] = [Self::Visa, Self::Mastercard, Self::RuPay];

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::RuPay => "RuPay",
        }
    }

    /// Returns the lowercase identifier used in forms and stored rows.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::RuPay => "rupay",
        }
    }

    /// Returns the prefix rule in the form shown to users.
    #[inline]
    pub const fn expected_prefix(&self) -> &'static str {
        match self {
            Self::Visa => "4",
            Self::Mastercard => "51-55",
            Self::RuPay => "6",
        }
    }

    /// Returns true if `digits` start with this brand's prefix.
    ///
    /// The Mastercard range is the string comparison `"51" <= xy <= "55"`
    /// on the first two digits, which for two decimal digits is the same as
    /// the numeric range 51..=55.
    #[inline]
    pub const fn matches_prefix(&self, digits: &[u8]) -> bool {
        match (self, digits) {
            (Self::Visa, [4, ..]) => true,
            (Self::Mastercard, [5, 1..=5, ..]) => true,
            (Self::RuPay, [6, ..]) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when parsing an unknown brand name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown card brand '{0}' (expected visa, mastercard or rupay)")]
pub struct UnknownBrand(pub String);

impl FromStr for CardBrand {
    type Err = UnknownBrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visa" => Ok(Self::Visa),
            "mastercard" | "mc" => Ok(Self::Mastercard),
            "rupay" => Ok(Self::RuPay),
            _ => Err(UnknownBrand(s.to_string())),
        }
    }
}

/// The payment form as the user filled it in.
///
/// Field values are taken verbatim; cleaning happens during validation.
/// The number, holder name and CVV are zeroed on drop and never appear in
/// `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct CardInput {
    /// Brand selected in the form.
    #[zeroize(skip)]
    pub brand: CardBrand,
    /// Card number, possibly grouped with spaces.
    pub number: String,
    /// Name printed on the card.
    pub holder_name: String,
    /// Expiry as typed, expected `MM/YY`.
    pub expiry: String,
    /// Card verification value.
    pub cvv: String,
}

impl CardInput {
    /// Builds an input record from form values.
    pub fn new(
        brand: CardBrand,
        number: impl Into<String>,
        holder_name: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            brand,
            number: number.into(),
            holder_name: holder_name.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }
}

impl fmt::Debug for CardInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInput")
            .field("brand", &self.brand)
            .field("number", &crate::mask::mask_string(&self.number))
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish_non_exhaustive()
    }
}

/// A cleaned, exactly-16-digit card number.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CardNumber {
    digits: [u8; CARD_DIGITS],
}

impl CardNumber {
    /// Cleans `input` and checks that it is exactly 16 digits.
    ///
    /// Whitespace anywhere in the input is ignored. Any other non-digit is
    /// rejected before the length is looked at.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let mut digits = [0u8; CARD_DIGITS];
        let mut count = 0usize;

        for c in input.chars() {
            if c.is_whitespace() {
                continue;
            }
            let Some(d) = c.to_digit(10) else {
                digits.zeroize();
                return Err(ValidationError::BadFormat {
                    field: Field::Number,
                    expected: "contain digits only",
                });
            };
            if count < CARD_DIGITS {
                digits[count] = d as u8;
            }
            count += 1;
        }

        if count == 0 {
            return Err(ValidationError::MissingField {
                field: Field::Number,
            });
        }

        if count != CARD_DIGITS {
            digits.zeroize();
            return Err(ValidationError::WrongLength {
                field: Field::Number,
                expected: CARD_DIGITS,
                actual: count,
            });
        }

        Ok(Self { digits })
    }

    /// Returns the digits (0-9 values, not ASCII).
    #[inline]
    pub fn digits(&self) -> &[u8; CARD_DIGITS] {
        &self.digits
    }

    /// Returns the last four digits as a string.
    pub fn last_four(&self) -> String {
        digits_to_string(&self.digits[CARD_DIGITS - 4..])
    }

    /// Returns the full number as a digit string.
    ///
    /// # Security Warning
    ///
    /// Never log or persist the result. Use `last_four()` for display.
    pub fn expose(&self) -> String {
        digits_to_string(&self.digits)
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardNumber(**** {})", self.last_four())
    }
}

pub(crate) fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// A card that passed every rule of the rule set it was validated with.
///
/// Carries only what downstream flows need: the brand used for the order
/// payment method, and the number, holder and expiry that make up a saved
/// card projection. The CVV is checked and then discarded.
#[derive(Clone)]
pub struct ValidatedCard {
    brand: CardBrand,
    number: CardNumber,
    holder_name: String,
    expiry: ExpiryDate,
}

impl ValidatedCard {
    pub(crate) fn new(
        brand: CardBrand,
        number: CardNumber,
        holder_name: String,
        expiry: ExpiryDate,
    ) -> Self {
        Self {
            brand,
            number,
            holder_name,
            expiry,
        }
    }

    /// Returns the brand the user selected.
    #[inline]
    pub const fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Returns the last four digits of the number.
    #[inline]
    pub fn last_four(&self) -> String {
        self.number.last_four()
    }

    /// Returns the trimmed card holder name.
    #[inline]
    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Returns the parsed expiry.
    #[inline]
    pub const fn expiry(&self) -> ExpiryDate {
        self.expiry
    }

    /// Returns the cleaned number.
    #[inline]
    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    /// Returns the number masked for display, e.g. `**** **** **** 0366`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }
}

impl fmt::Debug for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCard")
            .field("brand", &self.brand)
            .field("number", &self.masked())
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ValidatedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.brand, self.masked())
    }
}

impl Drop for ValidatedCard {
    fn drop(&mut self) {
        self.holder_name.zeroize();
    }
}
