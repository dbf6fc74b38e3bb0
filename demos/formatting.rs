//! Form input formatting example.
//!
//! Run with: `cargo run --example formatting`

use storefront_cards::{detect, format};

fn main() {
    println!("=== Form Input Formatting ===\n");

    // -------------------------------------------------------------------------
    // Card number, keystroke by keystroke
    // -------------------------------------------------------------------------
    println!("--- Card number as typed ---\n");

    let typed = "4532015112830366";
    for i in 1..=typed.len() {
        let partial = &typed[..i];
        let shown = format::format_card_number(partial);
        let brand = detect::detect_brand_str(partial)
            .map(|b| b.name())
            .unwrap_or("?");
        println!("  {:<20} {:<20} {}", partial, shown, brand);
    }
    println!();

    // -------------------------------------------------------------------------
    // Over-long and noisy input
    // -------------------------------------------------------------------------
    println!("--- Capping and cleaning ---\n");

    for input in ["4532 0151 1283 0366 9999", "4532-0151-1283-0366", "45a32"] {
        let shown = format::format_card_number(input);
        println!("  {:<28} -> {:<20} cleaned: {}", input, shown, format::strip_whitespace(&shown));
    }
    println!();

    // -------------------------------------------------------------------------
    // Custom separators
    // -------------------------------------------------------------------------
    println!("--- Custom Separators ---\n");

    for sep in [" ", "-", "."] {
        println!("  Separator '{}': {}", sep, format::format_with_separator(typed, sep));
    }
    println!();

    // -------------------------------------------------------------------------
    // Expiry, CVV and pincode
    // -------------------------------------------------------------------------
    println!("--- Other fields ---\n");

    for input in ["1", "12", "123", "1230", "12/30", "123099"] {
        println!("  expiry  {:<8} -> {}", input, format::format_expiry_input(input));
    }
    for input in ["12", "1234", "1a2b3"] {
        println!("  cvv     {:<8} -> {}", input, format::format_cvv_input(input));
    }
    for input in ["5600", "560 001", "5600019"] {
        println!("  pincode {:<8} -> {}", input, format::format_pincode_input(input));
    }
}
