//! Checkout example: quote shipping, validate the card and place an order.
//!
//! Run with: `cargo run --example checkout`

use rust_decimal::Decimal;
use storefront_cards::checkout::{
    order_total, place_order, shipping_cost, Cart, MemoryOrderSink, ShippingAddress,
};
use storefront_cards::{expiry, CardBrand, CardInput};
use uuid::Uuid;

fn main() {
    println!("=== Checkout ===\n");

    let user = Uuid::new_v4();
    let kurta = Uuid::new_v4();
    let mut cart = Cart::new();
    let address = ShippingAddress::new("12 MG Road", "Bengaluru", "560001");
    let adds = [
        (kurta, "Cotton Kurta", Decimal::new(79900, 2), Some(1)),
        (Uuid::new_v4(), "Silk Dupatta", Decimal::new(1250, 0), None),
        (kurta, "Cotton Kurta", Decimal::new(79900, 2), Some(1)),
    ];

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------
    println!("--- Cart ---\n");
    for (id, name, price, quantity) in adds {
        match cart.add_line(id, name, price, quantity) {
            Ok(line) => println!("  added {:<14} now x{}", line.product_name, line.quantity),
            Err(e) => println!("  refused {}: {}", name, e),
        }
    }
    println!();

    // -------------------------------------------------------------------------
    // Quote
    // -------------------------------------------------------------------------
    println!("--- Quote ---\n");
    let shipping = shipping_cost(&address.pincode);
    match (cart.subtotal(), order_total(cart.lines(), &address.pincode)) {
        (Some(subtotal), Some(total)) => {
            println!("  Subtotal: {}", subtotal);
            println!("  Shipping: {}", shipping);
            println!("  Total:    {}", total);
        }
        _ => println!("  Order amount too large"),
    }
    println!();

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------
    println!("--- Orders ---\n");
    let sink = MemoryOrderSink::new();
    let attempts = [
        ("matching Visa", CardInput::new(CardBrand::Visa, "4532 0151 1283 0366", "JOHN DOE", "12/30", "123")),
        ("Visa number as Mastercard", CardInput::new(CardBrand::Mastercard, "4532 0151 1283 0366", "JOHN DOE", "12/30", "123")),
        ("expired RuPay", CardInput::new(CardBrand::RuPay, "6070 0000 0000 0002", "JOHN DOE", "01/20", "123")),
    ];

    for (label, card) in &attempts {
        match place_order(&sink, user, cart.lines(), &address, card, expiry::today()) {
            Ok(placed) => println!(
                "  {:<26} placed {} ({} via {})",
                label, placed.id, placed.order.total_amount, placed.order.payment_method
            ),
            Err(e) => println!("  {:<26} refused: {}", label, e),
        }
    }
}
