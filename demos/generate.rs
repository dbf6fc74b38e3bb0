//! Test card generation example.
//!
//! Run with: `cargo run --example generate --features generate`

use storefront_cards::{format, generate, validate_checkout, CardBrand, CardInput};

fn main() {
    println!("=== Test Card Generation ===\n");

    // -------------------------------------------------------------------------
    // Random cards for each brand
    // -------------------------------------------------------------------------
    println!("--- Generate Cards by Brand ---\n");

    for brand in CardBrand::ALL {
        let number = generate::generate_card(brand);
        let input = CardInput::new(brand, number.as_str(), "TEST USER", "12/35", "123");
        println!(
            "  {:12}: {} (passes checkout: {})",
            brand.name(),
            format::format_card_number(&number),
            validate_checkout(&input).is_ok()
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Deterministic fixtures
    // -------------------------------------------------------------------------
    println!("--- Deterministic (no randomness) ---\n");

    for brand in CardBrand::ALL {
        println!(
            "  {:12}: {}",
            brand.name(),
            generate::generate_card_deterministic(brand)
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Custom prefix
    // -------------------------------------------------------------------------
    println!("--- Custom Prefix ---\n");

    let generator = generate::CardGenerator::with_prefix("607012");
    for number in generator.generate_many(3) {
        println!("  {}", number);
    }
}
