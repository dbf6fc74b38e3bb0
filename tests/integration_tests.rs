//! Integration tests for storefront_cards.
//!
//! These tests walk the checkout and saved-card flows end to end and cover
//! edge cases and security considerations of the validator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use storefront_cards::checkout::{
    place_order, prepare_order, Cart, CartLine, MemoryOrderSink, ShippingAddress,
};
use storefront_cards::saved::{delete_card, save_card, CardStore, MemoryCardStore, StoreError};
use storefront_cards::{
    format, luhn, mask, validate_card_at, CardBrand, CardInput, CheckoutError, ErrorKind, Field,
    SavedCardError, ValidationError, ValidationRules,
};
use uuid::Uuid;

// =============================================================================
// TEST CARD NUMBERS
// =============================================================================
// Published test numbers. They pass Luhn but are not real cards.

mod test_cards {
    pub const VISA_1: &str = "4532015112830366";
    pub const VISA_2: &str = "4111111111111111";
    pub const VISA_3: &str = "4242424242424242";
    pub const VISA_4: &str = "4012888888881881";

    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const MC_3: &str = "5200828282828210";

    pub const RUPAY_1: &str = "6070000000000002";
    pub const RUPAY_2: &str = "6011111111111117";
}

use test_cards::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn form(brand: CardBrand, number: &str) -> CardInput {
    CardInput::new(brand, number, "JOHN DOE", "12/30", "123")
}

fn strict(input: &CardInput) -> Result<storefront_cards::ValidatedCard, ValidationError> {
    validate_card_at(input, &ValidationRules::strict(), today())
}

fn lenient(input: &CardInput) -> Result<storefront_cards::ValidatedCard, ValidationError> {
    validate_card_at(input, &ValidationRules::lenient(), today())
}

// =============================================================================
// VALIDATION - VALID CARDS
// =============================================================================

#[test]
fn test_all_test_cards_pass_strict() {
    let cases = [
        (CardBrand::Visa, VISA_1),
        (CardBrand::Visa, VISA_2),
        (CardBrand::Visa, VISA_3),
        (CardBrand::Visa, VISA_4),
        (CardBrand::Mastercard, MC_1),
        (CardBrand::Mastercard, MC_2),
        (CardBrand::Mastercard, MC_3),
        (CardBrand::RuPay, RUPAY_1),
        (CardBrand::RuPay, RUPAY_2),
    ];

    for (brand, number) in cases {
        let card = strict(&form(brand, number)).unwrap_or_else(|e| panic!("{number}: {e}"));
        assert_eq!(card.brand(), brand);
        assert_eq!(card.last_four(), &number[12..]);
    }
}

#[test]
fn test_grouped_input_passes() {
    let shown = format::format_card_number(VISA_1);
    assert_eq!(shown, "4532 0151 1283 0366");
    assert!(strict(&form(CardBrand::Visa, &shown)).is_ok());
}

#[test]
fn test_cvv_may_start_with_zero() {
    let input = CardInput::new(CardBrand::Visa, VISA_1, "JOHN DOE", "12/30", "007");
    assert!(strict(&input).is_ok());
}

// =============================================================================
// VALIDATION - REJECTIONS
// =============================================================================

#[test]
fn test_declared_brand_must_match_prefix() {
    let err = strict(&form(CardBrand::Mastercard, VISA_1)).unwrap_err();
    assert_eq!(err, ValidationError::PrefixMismatch { brand: CardBrand::Mastercard });
    assert_eq!(
        err.to_string(),
        "Mastercard cards must start with 51-55. Please check your card number or select the correct card type"
    );

    assert_eq!(
        strict(&form(CardBrand::RuPay, MC_1)).unwrap_err().kind(),
        ErrorKind::PrefixMismatch
    );
    assert_eq!(
        strict(&form(CardBrand::Visa, RUPAY_1)).unwrap_err().kind(),
        ErrorKind::PrefixMismatch
    );
}

#[test]
fn test_mastercard_range_edges() {
    // 50 and 56 are outside the range even with a good checksum.
    for number in ["5000000000000009", "5600000000000003"] {
        assert!(luhn::validate_str(number), "{number}");
        assert_eq!(
            strict(&form(CardBrand::Mastercard, number)).unwrap_err().kind(),
            ErrorKind::PrefixMismatch
        );
    }
}

#[test]
fn test_checksum_failure() {
    let err = strict(&form(CardBrand::Visa, "4532015112830367")).unwrap_err();
    assert_eq!(err, ValidationError::ChecksumFailed);
    assert_eq!(err.field(), Field::Number);
}

#[test]
fn test_number_length() {
    for (number, actual) in [("453201511283036", 15), ("45320151128303660", 17)] {
        assert_eq!(
            strict(&form(CardBrand::Visa, number)).unwrap_err(),
            ValidationError::WrongLength { field: Field::Number, expected: 16, actual }
        );
    }
}

#[test]
fn test_number_with_letters() {
    let err = strict(&form(CardBrand::Visa, "4532 0151 1283 036X")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadFormat);
    assert_eq!(err.field(), Field::Number);
}

#[test]
fn test_expiry_layouts() {
    for bad in ["1/30", "12/3", "12-30", "1230", "12/2030", " 12/30", "12/30 ", "ab/cd"] {
        let input = CardInput::new(CardBrand::Visa, VISA_1, "JOHN DOE", bad, "123");
        let err = strict(&input).unwrap_err();
        assert_eq!(err.field(), Field::Expiry, "{bad}");
        assert_eq!(err.kind(), ErrorKind::BadFormat, "{bad}");
    }
}

#[test]
fn test_expiry_month_boundaries() {
    for (expiry, ok) in [("00/30", false), ("01/30", true), ("12/30", true), ("13/30", false)] {
        let input = CardInput::new(CardBrand::Visa, VISA_1, "JOHN DOE", expiry, "123");
        assert_eq!(strict(&input).is_ok(), ok, "{expiry}");
    }
}

#[test]
fn test_expired_at_checkout_only() {
    let input = CardInput::new(CardBrand::Visa, VISA_1, "JOHN DOE", "01/20", "123");
    let err = strict(&input).unwrap_err();
    assert_eq!(err, ValidationError::Expired { month: 1, year: 2020 });
    assert_eq!(err.to_string(), "card has expired (01/2020)");
    assert!(lenient(&input).is_ok());
}

#[test]
fn test_holder_name_rules() {
    let blank = CardInput::new(CardBrand::Visa, VISA_1, "   ", "12/30", "123");
    assert_eq!(
        strict(&blank).unwrap_err(),
        ValidationError::MissingField { field: Field::HolderName }
    );
    assert_eq!(
        lenient(&blank).unwrap_err(),
        ValidationError::MissingField { field: Field::HolderName }
    );

    let short = CardInput::new(CardBrand::Visa, VISA_1, "Al", "12/30", "123");
    assert_eq!(strict(&short).unwrap_err().kind(), ErrorKind::WrongLength);
    assert!(lenient(&short).is_ok());

    let three = CardInput::new(CardBrand::Visa, VISA_1, "Ana", "12/30", "123");
    assert!(strict(&three).is_ok());
}

#[test]
fn test_lenient_still_checks_checksum_and_cvv() {
    assert_eq!(
        lenient(&form(CardBrand::Visa, "1234567890123456")).unwrap_err(),
        ValidationError::ChecksumFailed
    );
    let bad_cvv = CardInput::new(CardBrand::Visa, VISA_1, "JOHN DOE", "12/30", "12a");
    assert_eq!(lenient(&bad_cvv).unwrap_err().field(), Field::Cvv);
}

#[test]
fn test_first_failure_only() {
    let all_bad = CardInput::new(CardBrand::Mastercard, "4532015112830367", "", "99/99", "");
    // The prefix is reported, nothing after it.
    assert_eq!(strict(&all_bad).unwrap_err().kind(), ErrorKind::PrefixMismatch);
    assert_eq!(lenient(&all_bad).unwrap_err(), ValidationError::ChecksumFailed);
}

// =============================================================================
// CHECKOUT FLOW
// =============================================================================

fn cart() -> Vec<CartLine> {
    vec![CartLine {
        product_id: Uuid::new_v4(),
        product_name: "Handloom Saree".into(),
        quantity: 1,
        unit_price: Decimal::new(2499, 0),
    }]
}

#[test]
fn test_checkout_order_payload() {
    let user = Uuid::new_v4();
    let address = ShippingAddress::new("4 Park Street", "Kolkata", "700016");
    let order = prepare_order(
        user,
        &cart(),
        &address,
        &form(CardBrand::RuPay, RUPAY_1),
        &ValidationRules::strict(),
        today(),
    )
    .unwrap();

    assert_eq!(order.user_id, user);
    assert_eq!(order.payment_method, CardBrand::RuPay);
    assert_eq!(order.total_amount, Decimal::new(2499 + 120, 0));
    assert_eq!(order.shipping_address, "4 Park Street, Kolkata, 700016");
    assert_eq!(order.items[0].total, Decimal::new(2499, 0));
}

#[test]
fn test_checkout_refuses_prefix_mismatch() {
    let sink = MemoryOrderSink::new();
    let user = Uuid::new_v4();
    let address = ShippingAddress::new("4 Park Street", "Kolkata", "700016");

    let err = place_order(&sink, user, &cart(), &address, &form(CardBrand::Mastercard, VISA_1), today())
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Card(ValidationError::PrefixMismatch { .. })));
    assert!(sink.orders_for_user(user).unwrap().is_empty());

    place_order(&sink, user, &cart(), &address, &form(CardBrand::Visa, VISA_1), today()).unwrap();
    assert_eq!(sink.orders_for_user(user).unwrap().len(), 1);
}

#[test]
fn test_checkout_address_checks_come_first() {
    let err = prepare_order(
        Uuid::new_v4(),
        &cart(),
        &ShippingAddress::new("4 Park Street", "Kolkata", "70001"),
        &form(CardBrand::Mastercard, VISA_1),
        &ValidationRules::strict(),
        today(),
    )
    .unwrap_err();
    assert_eq!(err, CheckoutError::InvalidPincode);
}

#[test]
fn test_merged_cart_checkout() {
    let saree = Uuid::new_v4();
    let mut cart = Cart::new();
    cart.add_line(saree, "Handloom Saree", Decimal::new(2499, 0), None).unwrap();
    cart.add_line(Uuid::new_v4(), "Blouse Piece", Decimal::new(350, 0), Some(2)).unwrap();
    cart.add_line(saree, "Handloom Saree", Decimal::new(2499, 0), Some(1)).unwrap();
    cart.set_quantity(saree, 3).unwrap();

    let order = prepare_order(
        Uuid::new_v4(),
        cart.lines(),
        &ShippingAddress::new("4 Park Street", "Kolkata", "700016"),
        &form(CardBrand::Visa, VISA_1),
        &ValidationRules::strict(),
        today(),
    )
    .unwrap();

    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(order.total_amount, Decimal::new(3 * 2499 + 2 * 350 + 120, 0));
}

#[test]
fn test_checkout_huge_amount_is_an_error() {
    let huge = vec![CartLine {
        product_id: Uuid::new_v4(),
        product_name: "Gold Bar".into(),
        quantity: u32::MAX,
        unit_price: Decimal::MAX,
    }];
    let err = prepare_order(
        Uuid::new_v4(),
        &huge,
        &ShippingAddress::new("4 Park Street", "Kolkata", "700016"),
        &form(CardBrand::Visa, VISA_1),
        &ValidationRules::strict(),
        today(),
    )
    .unwrap_err();
    assert_eq!(err, CheckoutError::AmountOverflow);
}

// =============================================================================
// SAVED CARDS FLOW
// =============================================================================

#[test]
fn test_saved_card_is_redacted() {
    let store = MemoryCardStore::new();
    let user = Uuid::new_v4();
    let saved = save_card(&store, user, &form(CardBrand::Visa, VISA_1), today()).unwrap();

    assert_eq!(saved.last4, "0366");
    assert_eq!(saved.masked(), "**** **** **** 0366");

    let debug = format!("{:?}", store.list_for_user(user).unwrap());
    assert!(!debug.contains(VISA_1));
    assert!(!debug.contains("123\""));
}

#[test]
fn test_saved_cards_lifecycle() {
    let store = MemoryCardStore::new();
    let user = Uuid::new_v4();

    let a = save_card(&store, user, &form(CardBrand::Visa, VISA_1), today()).unwrap();
    let b = save_card(&store, user, &form(CardBrand::Mastercard, MC_1), today()).unwrap();

    let listed: Vec<Uuid> = store.list_for_user(user).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(listed, vec![b.id, a.id]);

    delete_card(&store, user, a.id).unwrap();
    let listed = store.list_for_user(user).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].last4, "4444");

    assert_eq!(
        delete_card(&store, Uuid::new_v4(), b.id),
        Err(SavedCardError::Store(StoreError::NotFound(b.id)))
    );
}

#[test]
fn test_expired_card_can_be_saved() {
    let store = MemoryCardStore::new();
    let input = CardInput::new(CardBrand::Visa, VISA_1, "J", "01/20", "123");
    let saved = save_card(&store, Uuid::new_v4(), &input, today()).unwrap();
    assert_eq!(saved.expiry_label(), "01/20");
}

// =============================================================================
// SECURITY
// =============================================================================

#[test]
fn test_no_full_number_in_output() {
    let card = strict(&form(CardBrand::Visa, VISA_1)).unwrap();
    for rendered in [card.to_string(), format!("{:?}", card), card.masked()] {
        assert!(!rendered.contains(VISA_1), "{rendered}");
    }

    let input = form(CardBrand::Visa, VISA_1);
    let debug = format!("{:?}", input);
    assert!(!debug.contains(VISA_1));
    assert_eq!(mask::mask_string(VISA_1), "**** **** **** 0366");
}

#[test]
fn test_parity_month_mode() {
    let input = CardInput::new(CardBrand::Visa, VISA_1, "JOHN DOE", "13/30", "123");
    assert!(strict(&input).is_err());
    let rules = ValidationRules::strict().with_month_range(false);
    assert!(validate_card_at(&input, &rules, today()).is_ok());
}
