//! Checkout: shipping quotes and order preparation.
//!
//! [`prepare_order`] is the last gate before an order leaves the
//! storefront. It checks the cart and shipping details, runs the card
//! through the validator and builds the payload the order service
//! expects. The card itself never travels with the order; only its brand
//! does, as the payment method.

use crate::card::{CardBrand, CardInput};
use crate::format::PINCODE_DIGITS;
use crate::validate::{validate_card_at, ValidationRules};
use crate::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Shipping charged to pincodes starting with 0-3.
pub const SHIPPING_NEAR: u32 = 50;
/// Shipping charged to pincodes starting with 4-6.
pub const SHIPPING_MID: u32 = 80;
/// Shipping charged to every other complete pincode.
pub const SHIPPING_FAR: u32 = 120;

/// Quotes shipping in rupees for a pincode.
///
/// Returns 0 until the pincode is exactly six digits, so a half-typed
/// pincode never shows a charge.
///
/// # Example
///
/// ```
/// use storefront_cards::checkout::shipping_cost;
///
/// assert_eq!(shipping_cost("110001"), 50);
/// assert_eq!(shipping_cost("560001"), 80);
/// assert_eq!(shipping_cost("700001"), 120);
/// assert_eq!(shipping_cost("5600"), 0);
/// ```
pub fn shipping_cost(pincode: &str) -> u32 {
    if !is_complete_pincode(pincode) {
        return 0;
    }
    match pincode.as_bytes()[0] - b'0' {
        0..=3 => SHIPPING_NEAR,
        4..=6 => SHIPPING_MID,
        _ => SHIPPING_FAR,
    }
}

fn is_complete_pincode(pincode: &str) -> bool {
    pincode.len() == PINCODE_DIGITS && pincode.bytes().all(|b| b.is_ascii_digit())
}

/// Quantity used when an add-to-cart request does not name one.
pub const DEFAULT_QUANTITY: u32 = 1;

/// One product line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartLine {
    /// Product identifier.
    pub product_id: Uuid,
    /// Product name at the time it was added.
    pub product_name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Price of one unit in rupees.
    pub unit_price: Decimal,
}

impl CartLine {
    /// Returns `unit_price * quantity`, or `None` if it does not fit a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// Rejects lines that would put a zero or negative amount on an order.
    pub fn check(&self) -> Result<(), CheckoutError> {
        if self.quantity == 0 || self.unit_price.is_sign_negative() {
            return Err(CheckoutError::InvalidLine(self.product_id));
        }
        Ok(())
    }
}

/// Sums the line totals of a cart. `None` on overflow.
pub fn subtotal(cart: &[CartLine]) -> Option<Decimal> {
    cart.iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total()?))
}

/// Subtotal plus shipping for `pincode`. `None` on overflow.
pub fn order_total(cart: &[CartLine], pincode: &str) -> Option<Decimal> {
    subtotal(cart)?.checked_add(Decimal::from(shipping_cost(pincode)))
}

/// Reasons a cart edit is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// No line for this product.
    #[error("product {0} is not in the cart")]
    LineNotFound(Uuid),

    /// Merging would overflow the line quantity.
    #[error("quantity too large")]
    QuantityOverflow,
}

/// One user's cart, keeping a single line per product.
///
/// Adding a product that is already in the cart merges into its line.
///
/// ```
/// use rust_decimal::Decimal;
/// use storefront_cards::checkout::Cart;
/// use uuid::Uuid;
///
/// let kurta = Uuid::new_v4();
/// let mut cart = Cart::new();
/// cart.add_line(kurta, "Kurta", Decimal::new(500, 0), None).unwrap();
/// cart.add_line(kurta, "Kurta", Decimal::new(500, 0), Some(2)).unwrap();
///
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart.lines()[0].quantity, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` units of a product, defaulting to [`DEFAULT_QUANTITY`]
    /// when it is missing or zero.
    ///
    /// An existing line for the same product keeps its name and price and
    /// gets the quantities summed.
    pub fn add_line(
        &mut self,
        product_id: Uuid,
        product_name: impl Into<String>,
        unit_price: Decimal,
        quantity: Option<u32>,
    ) -> Result<&CartLine, CartError> {
        let quantity = match quantity {
            Some(q) if q > 0 => q,
            _ => DEFAULT_QUANTITY,
        };

        let index = match self.position(product_id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::QuantityOverflow)?;
                index
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    product_name: product_name.into(),
                    quantity,
                    unit_price,
                });
                self.lines.len() - 1
            }
        };
        Ok(&self.lines[index])
    }

    /// Sets the quantity of a product's line. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: u32) -> Result<(), CartError> {
        let index = self
            .position(product_id)
            .ok_or(CartError::LineNotFound(product_id))?;
        if quantity == 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = quantity;
        }
        Ok(())
    }

    /// Removes a product's line and returns it.
    pub fn remove_line(&mut self, product_id: Uuid) -> Result<CartLine, CartError> {
        let index = self
            .position(product_id)
            .ok_or(CartError::LineNotFound(product_id))?;
        Ok(self.lines.remove(index))
    }

    /// Sum of the line totals. `None` on overflow.
    pub fn subtotal(&self) -> Option<Decimal> {
        subtotal(&self.lines)
    }

    fn position(&self, product_id: Uuid) -> Option<usize> {
        self.lines.iter().position(|line| line.product_id == product_id)
    }
}

/// Where the order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShippingAddress {
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Six-digit pincode.
    pub pincode: String,
}

impl ShippingAddress {
    /// Builds an address from form values.
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            pincode: pincode.into(),
        }
    }

    fn is_complete(&self) -> bool {
        [&self.address, &self.city, &self.pincode]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

impl fmt::Display for ShippingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.address, self.city, self.pincode)
    }
}

/// One item of an order payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderItem {
    /// Product identifier.
    pub product_id: Uuid,
    /// Product name.
    pub product_name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price.
    pub price: Decimal,
    /// `price * quantity`.
    pub total: Decimal,
}

impl TryFrom<&CartLine> for OrderItem {
    type Error = CheckoutError;

    fn try_from(line: &CartLine) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            price: line.unit_price,
            total: line.line_total().ok_or(CheckoutError::AmountOverflow)?,
        })
    }
}

/// The payload handed to the order service.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderRequest {
    /// Buyer.
    pub user_id: Uuid,
    /// One item per cart line.
    pub items: Vec<OrderItem>,
    /// Subtotal plus shipping.
    pub total_amount: Decimal,
    /// Brand of the validated card.
    pub payment_method: CardBrand,
    /// The address rendered as `"address, city, pincode"`.
    pub shipping_address: String,
}

/// An order accepted by an [`OrderSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedOrder {
    /// Identifier assigned by the sink.
    pub id: Uuid,
    /// The submitted payload.
    pub order: OrderRequest,
    /// When the sink accepted the order.
    pub created_at: DateTime<Utc>,
}

/// Reasons an order is not placed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// Address, city or pincode is blank.
    #[error("please fill in all shipping details")]
    IncompleteAddress,

    /// Pincode is not six digits.
    #[error("please enter a valid 6-digit pincode")]
    InvalidPincode,

    /// A line has a zero quantity or a negative price.
    #[error("cart line for product {0} has a zero quantity or negative price")]
    InvalidLine(Uuid),

    /// Line totals or the order total do not fit a `Decimal`.
    #[error("order amount is too large")]
    AmountOverflow,

    /// The card failed validation.
    #[error(transparent)]
    Card(#[from] ValidationError),

    /// The order service refused or failed.
    #[error("failed to place order: {0}")]
    Submission(String),
}

/// Checks everything the checkout page checks and builds the order payload.
///
/// Checks run in order: the cart is not empty, every line has a positive
/// quantity and a non-negative price, every address field is filled, the
/// pincode is six digits, the card passes `rules`, and the totals fit a
/// `Decimal`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use storefront_cards::checkout::{prepare_order, CartLine, ShippingAddress};
/// use storefront_cards::{CardBrand, CardInput, ValidationRules};
/// use uuid::Uuid;
///
/// let cart = vec![CartLine {
///     product_id: Uuid::new_v4(),
///     product_name: "Kurta".into(),
///     quantity: 2,
///     unit_price: Decimal::new(500, 0),
/// }];
/// let address = ShippingAddress::new("12 MG Road", "Bengaluru", "560001");
/// let card = CardInput::new(CardBrand::Visa, "4532 0151 1283 0366", "JOHN DOE", "12/30", "123");
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
///
/// let order = prepare_order(Uuid::new_v4(), &cart, &address, &card, &ValidationRules::strict(), today).unwrap();
/// assert_eq!(order.total_amount, Decimal::new(1080, 0));
/// assert_eq!(order.shipping_address, "12 MG Road, Bengaluru, 560001");
/// ```
pub fn prepare_order(
    user_id: Uuid,
    cart: &[CartLine],
    address: &ShippingAddress,
    card: &CardInput,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<OrderRequest, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    cart.iter().try_for_each(CartLine::check)?;
    if !address.is_complete() {
        return Err(CheckoutError::IncompleteAddress);
    }
    if !is_complete_pincode(&address.pincode) {
        return Err(CheckoutError::InvalidPincode);
    }

    let card = validate_card_at(card, rules, today).map_err(|err| {
        debug!(kind = %err.kind(), field = %err.field(), "checkout card rejected");
        err
    })?;

    let items = cart
        .iter()
        .map(OrderItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let total_amount = order_total(cart, &address.pincode).ok_or(CheckoutError::AmountOverflow)?;

    Ok(OrderRequest {
        user_id,
        items,
        total_amount,
        payment_method: card.brand(),
        shipping_address: address.to_string(),
    })
}

/// The order-creation collaborator.
pub trait OrderSink: Send + Sync {
    /// Accepts an order and returns it with its assigned id.
    fn submit(&self, order: OrderRequest) -> Result<PlacedOrder, CheckoutError>;
}

/// Keeps submitted orders in memory.
#[derive(Debug, Default)]
pub struct MemoryOrderSink {
    orders: RwLock<Vec<PlacedOrder>>,
}

impl MemoryOrderSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the orders placed by `user_id`, newest first.
    pub fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<PlacedOrder>, CheckoutError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| CheckoutError::Submission("order log lock poisoned".into()))?;
        Ok(orders
            .iter()
            .rev()
            .filter(|placed| placed.order.user_id == user_id)
            .cloned()
            .collect())
    }
}

impl OrderSink for MemoryOrderSink {
    fn submit(&self, order: OrderRequest) -> Result<PlacedOrder, CheckoutError> {
        let placed = PlacedOrder {
            id: Uuid::new_v4(),
            order,
            created_at: Utc::now(),
        };
        self.orders
            .write()
            .map_err(|_| CheckoutError::Submission("order log lock poisoned".into()))?
            .push(placed.clone());
        Ok(placed)
    }
}

/// Prepares an order with the checkout rules and submits it to `sink`.
pub fn place_order<S: OrderSink + ?Sized>(
    sink: &S,
    user_id: Uuid,
    cart: &[CartLine],
    address: &ShippingAddress,
    card: &CardInput,
    today: NaiveDate,
) -> Result<PlacedOrder, CheckoutError> {
    place_order_with(sink, user_id, cart, address, card, &ValidationRules::strict(), today)
}

/// Prepares an order with custom `rules` and submits it to `sink`.
pub fn place_order_with<S: OrderSink + ?Sized>(
    sink: &S,
    user_id: Uuid,
    cart: &[CartLine],
    address: &ShippingAddress,
    card: &CardInput,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<PlacedOrder, CheckoutError> {
    let order = prepare_order(user_id, cart, address, card, rules, today)?;
    let placed = sink.submit(order)?;
    info!(
        order_id = %placed.id,
        payment_method = placed.order.payment_method.as_str(),
        total = %placed.order.total_amount,
        "order placed"
    );
    Ok(placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn cart() -> Vec<CartLine> {
        vec![
            CartLine {
                product_id: Uuid::new_v4(),
                product_name: "Cotton Kurta".into(),
                quantity: 2,
                unit_price: Decimal::new(49950, 2),
            },
            CartLine {
                product_id: Uuid::new_v4(),
                product_name: "Dupatta".into(),
                quantity: 1,
                unit_price: Decimal::new(250, 0),
            },
        ]
    }

    fn address() -> ShippingAddress {
        ShippingAddress::new("12 MG Road", "Bengaluru", "560001")
    }

    fn visa() -> CardInput {
        CardInput::new(CardBrand::Visa, "4532015112830366", "JOHN DOE", "12/30", "123")
    }

    fn prepare(cart: &[CartLine], address: &ShippingAddress, card: &CardInput) -> Result<OrderRequest, CheckoutError> {
        prepare_order(Uuid::nil(), cart, address, card, &ValidationRules::strict(), today())
    }

    #[test]
    fn test_shipping_cost_bands() {
        assert_eq!(shipping_cost("000000"), 50);
        assert_eq!(shipping_cost("399999"), 50);
        assert_eq!(shipping_cost("400001"), 80);
        assert_eq!(shipping_cost("699999"), 80);
        assert_eq!(shipping_cost("700001"), 120);
        assert_eq!(shipping_cost("999999"), 120);
    }

    #[test]
    fn test_shipping_cost_incomplete() {
        assert_eq!(shipping_cost(""), 0);
        assert_eq!(shipping_cost("56000"), 0);
        assert_eq!(shipping_cost("5600011"), 0);
        assert_eq!(shipping_cost("56a001"), 0);
    }

    #[test]
    fn test_prepare_order_totals() {
        let order = prepare(&cart(), &address(), &visa()).unwrap();
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].total, Decimal::new(999, 0));
        // 999 + 250 + 80 shipping
        assert_eq!(order.total_amount, Decimal::new(1329, 0));
        assert_eq!(order.payment_method, CardBrand::Visa);
        assert_eq!(order.shipping_address, "12 MG Road, Bengaluru, 560001");
    }

    #[test]
    fn test_prepare_order_amount_overflow() {
        let huge = vec![CartLine {
            product_id: Uuid::new_v4(),
            product_name: "Gold Bar".into(),
            quantity: u32::MAX,
            unit_price: Decimal::MAX,
        }];
        assert_eq!(prepare(&huge, &address(), &visa()), Err(CheckoutError::AmountOverflow));

        // Each line fits, the sum does not.
        let mut pair = huge.clone();
        pair[0].quantity = 1;
        pair.push(pair[0].clone());
        assert_eq!(subtotal(&pair), None);
        assert_eq!(prepare(&pair, &address(), &visa()), Err(CheckoutError::AmountOverflow));

        // Subtotal fits, shipping pushes it over.
        let single = vec![pair[0].clone()];
        assert_eq!(subtotal(&single), Some(Decimal::MAX));
        assert_eq!(order_total(&single, "560001"), None);
        assert_eq!(prepare(&single, &address(), &visa()), Err(CheckoutError::AmountOverflow));
    }

    #[test]
    fn test_invalid_lines_rejected() {
        let mut zero_qty = cart();
        zero_qty[1].quantity = 0;
        let id = zero_qty[1].product_id;
        assert_eq!(prepare(&zero_qty, &address(), &visa()), Err(CheckoutError::InvalidLine(id)));

        let mut negative = cart();
        negative[0].unit_price = Decimal::new(-1, 0);
        let id = negative[0].product_id;
        assert_eq!(prepare(&negative, &address(), &visa()), Err(CheckoutError::InvalidLine(id)));

        let mut free = cart();
        free[0].unit_price = Decimal::ZERO;
        assert!(prepare(&free, &address(), &visa()).is_ok());
    }

    #[test]
    fn test_cart_add_merges_by_product() {
        let kurta = Uuid::new_v4();
        let dupatta = Uuid::new_v4();
        let mut cart = Cart::new();

        cart.add_line(kurta, "Cotton Kurta", Decimal::new(49950, 2), Some(2)).unwrap();
        cart.add_line(dupatta, "Dupatta", Decimal::new(250, 0), None).unwrap();
        let merged = cart.add_line(kurta, "Renamed", Decimal::new(1, 0), Some(3)).unwrap();

        assert_eq!(merged.quantity, 5);
        assert_eq!(merged.product_name, "Cotton Kurta");
        assert_eq!(merged.unit_price, Decimal::new(49950, 2));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.lines()[1].quantity, DEFAULT_QUANTITY);
        // 5 * 499.50 + 250
        assert_eq!(cart.subtotal(), Some(Decimal::new(274750, 2)));
    }

    #[test]
    fn test_cart_add_defaults_quantity() {
        let id = Uuid::new_v4();
        let mut cart = Cart::new();
        assert_eq!(cart.add_line(id, "Kurta", Decimal::ONE, Some(0)).unwrap().quantity, 1);
        assert_eq!(cart.add_line(id, "Kurta", Decimal::ONE, None).unwrap().quantity, 2);
    }

    #[test]
    fn test_cart_add_quantity_overflow() {
        let id = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_line(id, "Kurta", Decimal::ONE, Some(u32::MAX)).unwrap();
        assert_eq!(
            cart.add_line(id, "Kurta", Decimal::ONE, Some(1)),
            Err(CartError::QuantityOverflow)
        );
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_cart_set_quantity_and_remove() {
        let kurta = Uuid::new_v4();
        let dupatta = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_line(kurta, "Kurta", Decimal::ONE, Some(4)).unwrap();
        cart.add_line(dupatta, "Dupatta", Decimal::ONE, None).unwrap();

        cart.set_quantity(kurta, 1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.set_quantity(kurta, 0).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].product_id, dupatta);

        let missing = Uuid::new_v4();
        assert_eq!(cart.set_quantity(missing, 2), Err(CartError::LineNotFound(missing)));
        assert_eq!(cart.remove_line(missing), Err(CartError::LineNotFound(missing)));

        let removed = cart.remove_line(dupatta).unwrap();
        assert_eq!(removed.product_name, "Dupatta");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_feeds_prepare_order() {
        let mut cart = Cart::new();
        cart.add_line(Uuid::new_v4(), "Cotton Kurta", Decimal::new(500, 0), Some(2)).unwrap();
        let order = prepare(cart.lines(), &address(), &visa()).unwrap();
        assert_eq!(order.total_amount, Decimal::new(1080, 0));
    }

    #[test]
    fn test_check_order() {
        let empty: Vec<CartLine> = Vec::new();
        let blank = ShippingAddress::default();
        let bad_card = CardInput::new(CardBrand::Visa, "", "", "", "");

        assert_eq!(prepare(&empty, &blank, &bad_card), Err(CheckoutError::EmptyCart));
        assert_eq!(prepare(&cart(), &blank, &bad_card), Err(CheckoutError::IncompleteAddress));

        let short_pin = ShippingAddress::new("12 MG Road", "Bengaluru", "5600");
        assert_eq!(prepare(&cart(), &short_pin, &bad_card), Err(CheckoutError::InvalidPincode));

        let err = prepare(&cart(), &address(), &bad_card).unwrap_err();
        assert!(matches!(err, CheckoutError::Card(ValidationError::MissingField { .. })));
    }

    #[test]
    fn test_expired_card_blocks_order() {
        let card = CardInput::new(CardBrand::Visa, "4532015112830366", "JOHN DOE", "01/20", "123");
        let err = prepare(&cart(), &address(), &card).unwrap_err();
        match err {
            CheckoutError::Card(inner) => assert_eq!(inner.kind(), ErrorKind::Expired),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_place_order_records() {
        let sink = MemoryOrderSink::new();
        let user = Uuid::new_v4();
        let first = place_order(&sink, user, &cart(), &address(), &visa(), today()).unwrap();
        let second = place_order(&sink, user, &cart(), &address(), &visa(), today()).unwrap();
        assert_ne!(first.id, second.id);

        let orders = sink.orders_for_user(user).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second.id);
        assert!(sink.orders_for_user(Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn test_rejected_order_not_submitted() {
        let sink = MemoryOrderSink::new();
        let user = Uuid::new_v4();
        let card = CardInput::new(CardBrand::Mastercard, "4532015112830366", "JOHN DOE", "12/30", "123");
        assert!(place_order(&sink, user, &cart(), &address(), &card, today()).is_err());
        assert!(sink.orders_for_user(user).unwrap().is_empty());
    }
}
