//! Fuzz target for form input formatting.
//!
//! Tests that formatting functions never panic on arbitrary input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use storefront_cards::{checkout, format};

fuzz_target!(|data: &str| {
    let _ = format::format_with_separator(data, "-");
    let _ = format::split_into_groups(data);
    let _ = checkout::shipping_cost(data);

    let formatted = format::format_card_number(data);
    assert!(formatted.len() <= 19);

    // Cleaning a formatted number leaves only its digits.
    let stripped = format::strip_whitespace(&formatted);
    assert!(stripped.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(format::format_card_number(&stripped), formatted);

    let expiry = format::format_expiry_input(data);
    assert!(expiry.len() <= 5);
    assert_eq!(format::format_expiry_input(&expiry), expiry);

    assert!(format::format_cvv_input(data).len() <= 3);
    assert!(format::format_pincode_input(data).len() <= 6);
});
