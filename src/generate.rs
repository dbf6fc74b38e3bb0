//! Test card numbers for the accepted brands.
//!
//! Every generated number is 16 digits, passes Luhn and carries the prefix
//! its brand is checked against at checkout. They are not connected to real
//! accounts and are meant for tests and demo forms only.
//!
//! # Example
//!
//! ```
//! use storefront_cards::generate::{generate_card_deterministic, CardGenerator};
//! use storefront_cards::{luhn, CardBrand};
//!
//! let number = generate_card_deterministic(CardBrand::Visa);
//! assert!(number.starts_with('4'));
//! assert!(luhn::validate_str(&number));
//!
//! let number = CardGenerator::new(CardBrand::Mastercard).generate_deterministic();
//! assert!(number.starts_with("51"));
//! ```

use crate::card::{digits_to_string, CardBrand, CARD_DIGITS};
use crate::luhn;

#[cfg(feature = "generate")]
use rand::Rng;

/// Returns the prefix generated numbers start with.
pub const fn prefix_for_brand(brand: CardBrand) -> &'static str {
    match brand {
        CardBrand::Visa => "4",
        CardBrand::Mastercard => "51",
        CardBrand::RuPay => "60",
    }
}

fn prefix_digits(prefix: &str) -> Option<Vec<u8>> {
    let digits: Vec<u8> = prefix
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();
    (digits.len() < CARD_DIGITS).then_some(digits)
}

fn finish(mut digits: Vec<u8>) -> String {
    let check_digit = luhn::generate_check_digit(&digits);
    digits.push(check_digit);
    digits_to_string(&digits)
}

/// Generates a number for `brand` with zero filler digits.
///
/// The same brand always produces the same number.
pub fn generate_card_deterministic(brand: CardBrand) -> String {
    // Brand prefixes are at most two digits.
    generate_card_deterministic_with_prefix(prefix_for_brand(brand)).unwrap_or_default()
}

/// Generates a number starting with `prefix`, filled with zeros.
///
/// Returns `None` if the prefix has 16 or more digits.
///
/// # Example
///
/// ```
/// use storefront_cards::generate::generate_card_deterministic_with_prefix;
///
/// let number = generate_card_deterministic_with_prefix("607012").unwrap();
/// assert!(number.starts_with("607012"));
/// assert_eq!(number.len(), 16);
/// ```
pub fn generate_card_deterministic_with_prefix(prefix: &str) -> Option<String> {
    let mut digits = prefix_digits(prefix)?;
    digits.resize(CARD_DIGITS - 1, 0);
    Some(finish(digits))
}

/// Generates a random number for `brand`.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_card(brand: CardBrand) -> String {
    generate_card_with_rng(prefix_for_brand(brand), &mut rand::thread_rng()).unwrap_or_default()
}

/// Generates a random number starting with `prefix` using `rng`.
///
/// Pass a seeded RNG for reproducible fixtures. Returns `None` if the
/// prefix has 16 or more digits.
#[cfg(feature = "generate")]
pub fn generate_card_with_rng<R: Rng>(prefix: &str, rng: &mut R) -> Option<String> {
    let mut digits = prefix_digits(prefix)?;
    while digits.len() < CARD_DIGITS - 1 {
        digits.push(rng.gen_range(0..10));
    }
    Some(finish(digits))
}

/// Generates `count` random numbers for `brand`.
#[cfg(feature = "generate")]
pub fn generate_cards(brand: CardBrand, count: usize) -> Vec<String> {
    (0..count).map(|_| generate_card(brand)).collect()
}

/// Builder for generated numbers.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    prefix: String,
}

impl CardGenerator {
    /// Generator for the given brand's prefix.
    pub fn new(brand: CardBrand) -> Self {
        Self {
            prefix: prefix_for_brand(brand).to_string(),
        }
    }

    /// Generator for a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the configured prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Zero-filled number, or an empty string if the prefix is too long.
    pub fn generate_deterministic(&self) -> String {
        generate_card_deterministic_with_prefix(&self.prefix).unwrap_or_default()
    }

    /// Random number, or an empty string if the prefix is too long.
    #[cfg(feature = "generate")]
    pub fn generate(&self) -> String {
        generate_card_with_rng(&self.prefix, &mut rand::thread_rng()).unwrap_or_default()
    }

    /// Several random numbers.
    #[cfg(feature = "generate")]
    pub fn generate_many(&self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.generate()).collect()
    }
}
