//! Saved cards example: save, list and delete redacted cards.
//!
//! Run with: `cargo run --example saved_cards`

use storefront_cards::saved::{delete_card, save_card, CardStore, MemoryCardStore};
use storefront_cards::{expiry, CardBrand, CardInput};
use uuid::Uuid;

fn main() {
    println!("=== Saved Cards ===\n");

    let store = MemoryCardStore::new();
    let user = Uuid::new_v4();

    let forms = [
        CardInput::new(CardBrand::Visa, "4532 0151 1283 0366", "JOHN DOE", "12/30", "123"),
        // Saved-card rules do not check brand prefix or expiry.
        CardInput::new(CardBrand::RuPay, "5555 5555 5555 4444", "J", "01/20", "456"),
        CardInput::new(CardBrand::Visa, "4532 0151 1283 0367", "JOHN DOE", "12/30", "123"),
    ];

    for form in &forms {
        match save_card(&store, user, form, expiry::today()) {
            Ok(saved) => println!("  saved   {} {}", saved.brand.name(), saved.masked()),
            Err(e) => println!("  refused {:?}: {}", form, e),
        }
    }
    println!();

    println!("--- Profile (newest first) ---\n");
    let Ok(cards) = store.list_for_user(user) else {
        return;
    };
    for card in &cards {
        println!(
            "  {:<10} {}  {}  expires {}",
            card.brand.name(),
            card.masked(),
            card.holder_name,
            card.expiry_label()
        );
    }
    println!();

    if let Some(oldest) = cards.last() {
        match delete_card(&store, user, oldest.id) {
            Ok(()) => println!("  deleted {}", oldest.masked()),
            Err(e) => println!("  delete failed: {}", e),
        }
    }
    println!("  {} card(s) left", store.len());
}
