//! Fuzz target for card form validation.
//!
//! Tests that validation never panics and that the lenient rules never
//! reject a card the strict rules accept.

#![no_main]

use arbitrary::Arbitrary;
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use storefront_cards::{validate_card_at, CardBrand, CardInput, ValidationRules};

#[derive(Arbitrary, Debug)]
struct Form<'a> {
    brand: u8,
    number: &'a str,
    holder_name: &'a str,
    expiry: &'a str,
    cvv: &'a str,
}

fuzz_target!(|form: Form| {
    let brand = CardBrand::ALL[form.brand as usize % CardBrand::ALL.len()];
    let input = CardInput::new(brand, form.number, form.holder_name, form.expiry, form.cvv);
    let Some(today) = NaiveDate::from_ymd_opt(2026, 10, 19) else {
        return;
    };

    let strict = validate_card_at(&input, &ValidationRules::strict(), today);
    let lenient = validate_card_at(&input, &ValidationRules::lenient(), today);

    if let Ok(card) = &strict {
        assert!(lenient.is_ok(), "lenient rejected a strict-valid card");
        assert_eq!(card.last_four().len(), 4);
        assert!(!card.masked().contains(card.number().expose().as_str()));
    }
});
