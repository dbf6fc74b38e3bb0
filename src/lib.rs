//! # storefront_cards
//!
//! Payment card validation for the storefront checkout and saved-card flows.
//!
//! ## Features
//!
//! - 16-digit card numbers with Luhn validation
//! - Visa, Mastercard and RuPay prefix rules
//! - `MM/YY` expiry and 3-digit CVV checks
//! - Strict (checkout) and lenient (saved cards) rule sets
//! - Carts that merge repeated products, shipping quotes and order payloads
//! - Redacted saved-card projections behind a store trait
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use storefront_cards::{validate_card_at, CardBrand, CardInput, ValidationRules};
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let input = CardInput::new(CardBrand::Visa, "4532 0151 1283 0366", "JOHN DOE", "12/30", "123");
//!
//! let card = validate_card_at(&input, &ValidationRules::strict(), today).unwrap();
//! assert_eq!(card.brand(), CardBrand::Visa);
//! assert_eq!(card.last_four(), "0366");
//!
//! // Safe for logging - never exposes full card number
//! println!("Card: {}", card.masked()); // "**** **** **** 0366"
//! ```
//!
//! ## Strict and Lenient Rules
//!
//! ```rust
//! use storefront_cards::{validate_card_at, CardBrand, CardInput, ErrorKind, ValidationRules};
//!
//! let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//!
//! // Expired card with a two-letter name: refused at checkout, fine to save.
//! let input = CardInput::new(CardBrand::Visa, "4532015112830366", "JD", "01/20", "123");
//! let err = validate_card_at(&input, &ValidationRules::strict(), today).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::WrongLength);
//! assert!(validate_card_at(&input, &ValidationRules::lenient(), today).is_ok());
//! ```
//!
//! ## Checkout
//!
//! ```rust
//! use storefront_cards::checkout::shipping_cost;
//!
//! assert_eq!(shipping_cost("110001"), 50);
//! assert_eq!(shipping_cost("560001"), 80);
//! assert_eq!(shipping_cost("700001"), 120);
//! ```
//!
//! ## Input Formatting
//!
//! ```rust
//! use storefront_cards::format;
//!
//! assert_eq!(format::format_card_number("4532015112830366"), "4532 0151 1283 0366");
//! assert_eq!(format::format_expiry_input("1230"), "12/30");
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | CVV |
//! |-------|--------|--------|-----|
//! | Visa | 4 | 16 | 3 |
//! | Mastercard | 51-55 | 16 | 3 |
//! | RuPay | 6 | 16 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/deserialize public types |
//! | `generate` | Random test card generation |
//! | `cli` | `cardcheck` command-line tool |
//! | `server` | `cardcheck-server` REST API with Swagger UI |
//! | `wasm` | WebAssembly bindings for live form checks |
//!
//! ## Security
//!
//! - Card numbers held in fixed-size arrays that are zeroed on drop
//! - The CVV is checked and never stored
//! - Saved cards keep only brand, last four digits, holder and expiry
//! - `Debug` and `Display` show masked numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod checkout;
pub mod cvv;
pub mod detect;
pub mod error;
pub mod expiry;
pub mod format;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod saved;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::{CardBrand, CardInput, CardNumber, ValidatedCard, CARD_DIGITS};
pub use checkout::{
    place_order, prepare_order, shipping_cost, Cart, CartError, CheckoutError, OrderSink,
};
pub use error::{ErrorKind, Field, ValidationError};
pub use expiry::ExpiryDate;
pub use saved::{delete_card, save_card, CardStore, SavedCard, SavedCardError};
pub use validate::{
    is_valid, validate_card, validate_card_at, validate_checkout, validate_for_saving,
    ValidationMode, ValidationRules,
};
