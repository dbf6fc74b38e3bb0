//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use storefront_cards::expiry;

fuzz_target!(|data: &str| {
    let strict = expiry::parse_expiry(data);
    let loose = expiry::parse_expiry_with(data, false);

    // The month range check can only reject more.
    if strict.is_ok() {
        assert_eq!(strict, loose);
    }

    if let Ok(exp) = loose {
        assert_eq!(data.len(), 5);
        assert!(exp.year() >= 2000 && exp.year() <= 2099);

        if let Some(today) = NaiveDate::from_ymd_opt(2026, 10, 19) {
            let _ = exp.is_expired_at(today);
            let _ = exp.months_until_expiry_at(today);
            let _ = expiry::check_not_expired(exp, today);
        }
        let _ = exp.format_short();
        let _ = exp.to_string();
    }
});
