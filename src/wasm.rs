//! WebAssembly bindings for the payment and saved-card forms.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { validate_card, format_card_number, shipping_cost } from 'storefront_cards';
//!
//! await init();
//!
//! // On every keystroke
//! input.value = format_card_number(input.value);
//!
//! // On submit
//! const result = validate_card("visa", "4532 0151 1283 0366", "JOHN DOE", "12/30", "123", true);
//! if (!result.valid) {
//!     showError(result.field, result.error);
//! }
//!
//! console.log(shipping_cost("560001"));  // 80
//! ```

#![cfg(feature = "wasm")]

use crate::{CardBrand, CardInput, ValidationRules};
use wasm_bindgen::prelude::*;

/// Result of card validation, returned to JavaScript.
#[wasm_bindgen]
pub struct ValidationResult {
    valid: bool,
    brand: Option<String>,
    last_four: Option<String>,
    masked: Option<String>,
    error: Option<String>,
    kind: Option<String>,
    field: Option<String>,
}

#[wasm_bindgen]
impl ValidationResult {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.valid
    }

    #[wasm_bindgen(getter)]
    pub fn brand(&self) -> Option<String> {
        self.brand.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn last_four(&self) -> Option<String> {
        self.last_four.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn masked(&self) -> Option<String> {
        self.masked.clone()
    }

    /// User-facing message.
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }

    /// Error kind, e.g. `prefix_mismatch`.
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> Option<String> {
        self.kind.clone()
    }

    /// Form field the error belongs to.
    #[wasm_bindgen(getter)]
    pub fn field(&self) -> Option<String> {
        self.field.clone()
    }
}

/// Validates a card form. `strict` selects the checkout rules; otherwise
/// the saved-card rules apply.
#[wasm_bindgen]
pub fn validate_card(
    brand: &str,
    number: &str,
    holder_name: &str,
    expiry: &str,
    cvv: &str,
    strict: bool,
) -> Result<ValidationResult, JsValue> {
    let brand: CardBrand = brand
        .parse()
        .map_err(|e: crate::card::UnknownBrand| JsValue::from_str(&e.to_string()))?;
    let input = CardInput::new(brand, number, holder_name, expiry, cvv);
    let rules = if strict {
        ValidationRules::strict()
    } else {
        ValidationRules::lenient()
    };

    Ok(match crate::validate_card(&input, &rules) {
        Ok(card) => ValidationResult {
            valid: true,
            brand: Some(card.brand().as_str().to_string()),
            last_four: Some(card.last_four()),
            masked: Some(card.masked()),
            error: None,
            kind: None,
            field: None,
        },
        Err(e) => ValidationResult {
            valid: false,
            brand: None,
            last_four: None,
            masked: None,
            error: Some(e.to_string()),
            kind: Some(e.kind().as_str().to_string()),
            field: Some(e.field().label().to_string()),
        },
    })
}

/// Checks if 16 digits pass the Luhn algorithm.
#[wasm_bindgen]
pub fn luhn_check(card_number: &str) -> bool {
    crate::luhn::validate_str(&crate::format::strip_whitespace(card_number))
}

/// Suggests a brand from a (partial) card number.
///
/// # Example
/// ```javascript
/// detect_brand("52");  // "mastercard"
/// ```
#[wasm_bindgen]
pub fn detect_brand(card_number: &str) -> Option<String> {
    crate::detect::detect_brand_str(card_number).map(|b| b.as_str().to_string())
}

/// Formats card number input as groups of four.
#[wasm_bindgen]
pub fn format_card_number(input: &str) -> String {
    crate::format::format_card_number(input)
}

/// Returns the groups of four as a JavaScript array.
#[wasm_bindgen]
pub fn card_number_groups(input: &str) -> js_sys::Array {
    crate::format::split_into_groups(input)
        .into_iter()
        .map(|group| JsValue::from_str(&group))
        .collect()
}

/// Formats expiry input as `MM/YY`.
#[wasm_bindgen]
pub fn format_expiry(input: &str) -> String {
    crate::format::format_expiry_input(input)
}

/// Keeps at most three CVV digits.
#[wasm_bindgen]
pub fn format_cvv(input: &str) -> String {
    crate::format::format_cvv_input(input)
}

/// Keeps at most six pincode digits.
#[wasm_bindgen]
pub fn format_pincode(input: &str) -> String {
    crate::format::format_pincode_input(input)
}

/// Shipping in rupees for a pincode, 0 until it is complete.
#[wasm_bindgen]
pub fn shipping_cost(pincode: &str) -> u32 {
    crate::checkout::shipping_cost(pincode)
}

/// Masks a stored last-4 value for display.
#[wasm_bindgen]
pub fn mask_last4(last4: &str) -> String {
    crate::mask::mask_last4(last4)
}

/// Generates a valid test card number for the given brand.
///
/// # Example
/// ```javascript
/// const card = generate_test_card("rupay");  // "6000000000000007"
/// ```
#[wasm_bindgen]
pub fn generate_test_card(brand: &str) -> Result<String, JsValue> {
    let brand: CardBrand = brand
        .parse()
        .map_err(|e: crate::card::UnknownBrand| JsValue::from_str(&e.to_string()))?;
    Ok(crate::generate::generate_card_deterministic(brand))
}
