//! REST API server for the storefront card flows.
//!
//! # Usage
//!
//! ```bash
//! # Start server
//! cardcheck-server
//!
//! # With custom address, or CARDCHECK_BIND / CARDCHECK_PORT
//! cardcheck-server --bind 127.0.0.1 --port 8080
//! ```
//!
//! # Swagger UI
//!
//! Visit http://localhost:3000/swagger-ui/ for interactive API documentation.

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use storefront_cards::checkout::{
    self, CartLine, CheckoutError, MemoryOrderSink, PlacedOrder, ShippingAddress,
};
use storefront_cards::saved::{self, CardStore, MemoryCardStore, SavedCard, SavedCardError, StoreError};
use storefront_cards::{
    expiry, validate_card_at, CardBrand, CardInput, ValidationError, ValidationRules,
};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "cardcheck-server")]
#[command(author, version, about = "Storefront card validation API")]
struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "CARDCHECK_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "CARDCHECK_PORT", default_value_t = 3000)]
    port: u16,

    /// Accept any two digits as the expiry month
    #[arg(long)]
    parity_month: bool,
}

#[derive(Clone)]
struct AppState {
    cards: Arc<MemoryCardStore>,
    orders: Arc<MemoryOrderSink>,
    checkout_rules: ValidationRules,
    saved_rules: ValidationRules,
}

impl AppState {
    fn new(config: &ServerConfig) -> Self {
        let month_range = !config.parity_month;
        Self {
            cards: Arc::new(MemoryCardStore::new()),
            orders: Arc::new(MemoryOrderSink::new()),
            checkout_rules: ValidationRules::strict().with_month_range(month_range),
            saved_rules: ValidationRules::lenient().with_month_range(month_range),
        }
    }
}

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront Card API",
        version = "0.1.0",
        description = "Card validation, checkout and saved-card endpoints for the storefront. Orders and saved cards are kept in memory.",
        license(name = "MIT OR Apache-2.0")
    ),
    tags(
        (name = "Validation", description = "Card form validation"),
        (name = "Checkout", description = "Shipping quotes and orders"),
        (name = "Saved Cards", description = "Redacted cards on a user's profile"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(
        validate_card,
        quote,
        create_order,
        list_saved_cards,
        create_saved_card,
        delete_saved_card,
        health,
    ),
    components(schemas(
        CardRequest,
        ValidateResponse,
        CartLineRequest,
        QuoteRequest,
        QuoteResponse,
        OrderCreateRequest,
        OrderResponse,
        SaveCardRequest,
        SavedCardResponse,
        SavedCardList,
        DeleteResponse,
        ErrorBody,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize, ToSchema)]
#[schema(example = json!({
    "brand": "visa",
    "number": "4532 0151 1283 0366",
    "holder_name": "JOHN DOE",
    "expiry": "12/30",
    "cvv": "123"
}))]
struct CardRequest {
    /// Brand selected in the form: visa, mastercard or rupay
    brand: String,
    /// Card number, spaces allowed
    number: String,
    /// Name on the card
    holder_name: String,
    /// Expiry as MM/YY
    expiry: String,
    /// Three-digit CVV
    cvv: String,
    /// Rule set: "strict" (checkout, default) or "lenient" (saved cards)
    #[serde(default)]
    mode: Option<String>,
}

impl CardRequest {
    fn into_input(self) -> Result<CardInput, ApiError> {
        let brand: CardBrand = self
            .brand
            .parse()
            .map_err(|e: storefront_cards::card::UnknownBrand| ApiError::BadRequest(e.to_string()))?;
        Ok(CardInput::new(brand, self.number, self.holder_name, self.expiry, self.cvv))
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "valid": true,
    "brand": "visa",
    "last_four": "0366",
    "masked": "**** **** **** 0366"
}))]
struct ValidateResponse {
    /// Whether the card passed every rule of the selected rule set
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_four: Option<String>,
    /// Masked number, safe for display
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<String>,
    /// Error kind, e.g. prefix_mismatch
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    /// Form field the error belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    /// Message to show next to the field
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ValidateResponse {
    fn rejected(e: &ValidationError) -> Self {
        Self {
            valid: false,
            brand: None,
            last_four: None,
            masked: None,
            kind: Some(e.kind().as_str().to_string()),
            field: Some(e.field().label().to_string()),
            error: Some(e.to_string()),
        }
    }
}

#[derive(Deserialize, ToSchema)]
struct CartLineRequest {
    product_id: Uuid,
    product_name: String,
    quantity: u32,
    /// Unit price in rupees
    #[schema(value_type = String, example = "499.50")]
    price: Decimal,
}

impl TryFrom<CartLineRequest> for CartLine {
    type Error = ApiError;

    fn try_from(line: CartLineRequest) -> Result<Self, Self::Error> {
        let line = CartLine {
            product_id: line.product_id,
            product_name: line.product_name,
            quantity: line.quantity,
            unit_price: line.price,
        };
        line.check().map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(line)
    }
}

fn cart_from_request(items: Vec<CartLineRequest>) -> Result<Vec<CartLine>, ApiError> {
    items.into_iter().map(CartLine::try_from).collect()
}

#[derive(Deserialize, ToSchema)]
struct QuoteRequest {
    /// Six-digit pincode
    pincode: String,
    #[serde(default)]
    items: Vec<CartLineRequest>,
}

#[derive(Serialize, ToSchema)]
struct QuoteResponse {
    #[schema(value_type = String)]
    subtotal: Decimal,
    /// Shipping in rupees, 0 until the pincode is complete
    shipping: u32,
    #[schema(value_type = String)]
    total: Decimal,
}

#[derive(Deserialize, ToSchema)]
struct OrderCreateRequest {
    user_id: Uuid,
    items: Vec<CartLineRequest>,
    address: String,
    city: String,
    pincode: String,
    card: CardRequest,
}

#[derive(Serialize, ToSchema)]
struct OrderResponse {
    id: Uuid,
    user_id: Uuid,
    #[schema(value_type = String)]
    total_amount: Decimal,
    /// Brand of the card used
    payment_method: String,
    shipping_address: String,
    item_count: usize,
    created_at: DateTime<Utc>,
}

impl From<PlacedOrder> for OrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        OrderResponse {
            id: placed.id,
            user_id: placed.order.user_id,
            total_amount: placed.order.total_amount,
            payment_method: placed.order.payment_method.as_str().to_string(),
            shipping_address: placed.order.shipping_address,
            item_count: placed.order.items.len(),
            created_at: placed.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
struct SaveCardRequest {
    user_id: Uuid,
    card: CardRequest,
}

#[derive(Serialize, ToSchema)]
struct SavedCardResponse {
    id: Uuid,
    user_id: Uuid,
    brand: String,
    last4: String,
    holder_name: String,
    expiry_month: u8,
    expiry_year: u16,
    /// Expiry as MM/YY
    expiry: String,
    /// Masked number, safe for display
    masked: String,
    is_default: bool,
    created_at: DateTime<Utc>,
}

impl From<SavedCard> for SavedCardResponse {
    fn from(card: SavedCard) -> Self {
        SavedCardResponse {
            expiry: card.expiry_label(),
            masked: card.masked(),
            id: card.id,
            user_id: card.user_id,
            brand: card.brand.as_str().to_string(),
            last4: card.last4,
            holder_name: card.holder_name,
            expiry_month: card.expiry_month,
            expiry_year: card.expiry_year,
            is_default: card.is_default,
            created_at: card.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
struct SavedCardList {
    data: Vec<SavedCardResponse>,
}

#[derive(Deserialize, IntoParams)]
struct ListQuery {
    /// Owner of the cards
    user_id: Uuid,
}

#[derive(Deserialize, IntoParams)]
struct DeleteQuery {
    /// Card to delete
    id: Uuid,
    /// Owner of the card
    user_id: Uuid,
}

#[derive(Serialize, ToSchema)]
struct DeleteResponse {
    success: bool,
}

#[derive(Serialize, ToSchema)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Saved(#[from] SavedCardError),
}

fn card_rejected(e: &ValidationError) -> (StatusCode, ErrorBody) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        ErrorBody {
            error: e.to_string(),
            kind: Some(e.kind().as_str().to_string()),
            field: Some(e.field().label().to_string()),
        },
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let plain = |status: StatusCode, error: String| {
            (
                status,
                ErrorBody {
                    error,
                    kind: None,
                    field: None,
                },
            )
        };

        let (status, body) = match &self {
            ApiError::BadRequest(msg) => plain(StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Checkout(CheckoutError::Card(e)) | ApiError::Saved(SavedCardError::Card(e)) => {
                card_rejected(e)
            }
            ApiError::Checkout(CheckoutError::Submission(_))
            | ApiError::Saved(SavedCardError::Store(StoreError::Backend(_))) => {
                tracing::error!(error = %self, "request failed");
                plain(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Checkout(_) => plain(StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Saved(SavedCardError::Store(StoreError::NotFound(_))) => {
                plain(StatusCode::NOT_FOUND, self.to_string())
            }
        };

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Validate a card form
#[utoipa::path(
    post,
    path = "/cards/validate",
    request_body = CardRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateResponse),
        (status = 400, description = "Unknown brand or mode", body = ErrorBody)
    ),
    tag = "Validation"
)]
async fn validate_card(
    State(state): State<AppState>,
    Json(req): Json<CardRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let rules = match req.mode.as_deref().unwrap_or("strict") {
        "strict" => state.checkout_rules,
        "lenient" => state.saved_rules,
        other => return Err(ApiError::BadRequest(format!("unknown mode '{other}'"))),
    };
    let input = req.into_input()?;

    let response = match validate_card_at(&input, &rules, expiry::today()) {
        Ok(card) => ValidateResponse {
            valid: true,
            brand: Some(card.brand().as_str().to_string()),
            last_four: Some(card.last_four()),
            masked: Some(card.masked()),
            kind: None,
            field: None,
            error: None,
        },
        Err(e) => {
            tracing::debug!(kind = %e.kind(), field = %e.field(), "card rejected");
            ValidateResponse::rejected(&e)
        }
    };
    Ok(Json(response))
}

/// Quote shipping and totals for a cart
#[utoipa::path(
    post,
    path = "/checkout/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Quote", body = QuoteResponse),
        (status = 400, description = "Invalid line or amount too large", body = ErrorBody)
    ),
    tag = "Checkout"
)]
async fn quote(Json(req): Json<QuoteRequest>) -> Result<Json<QuoteResponse>, ApiError> {
    let cart = cart_from_request(req.items)?;
    let subtotal = checkout::subtotal(&cart).ok_or(CheckoutError::AmountOverflow)?;
    let total = checkout::order_total(&cart, &req.pincode).ok_or(CheckoutError::AmountOverflow)?;

    Ok(Json(QuoteResponse {
        subtotal,
        shipping: checkout::shipping_cost(&req.pincode),
        total,
    }))
}

/// Validate the card and place an order
#[utoipa::path(
    post,
    path = "/checkout/orders",
    request_body = OrderCreateRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Empty cart, invalid line, incomplete address or amount too large", body = ErrorBody),
        (status = 422, description = "Card rejected", body = ErrorBody)
    ),
    tag = "Checkout"
)]
async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<OrderCreateRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let cart = cart_from_request(req.items)?;
    let address = ShippingAddress::new(req.address, req.city, req.pincode);
    let card = req.card.into_input()?;

    let placed = checkout::place_order_with(
        state.orders.as_ref(),
        req.user_id,
        &cart,
        &address,
        &card,
        &state.checkout_rules,
        expiry::today(),
    )?;
    Ok((StatusCode::CREATED, Json(placed.into())))
}

/// List a user's saved cards, newest first
#[utoipa::path(
    get,
    path = "/saved-cards",
    params(ListQuery),
    responses(
        (status = 200, description = "Saved cards", body = SavedCardList)
    ),
    tag = "Saved Cards"
)]
async fn list_saved_cards(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SavedCardList>, ApiError> {
    let cards = state
        .cards
        .list_for_user(query.user_id)
        .map_err(SavedCardError::from)?;
    Ok(Json(SavedCardList {
        data: cards.into_iter().map(SavedCardResponse::from).collect(),
    }))
}

/// Validate a card with the saved-card rules and store it
#[utoipa::path(
    post,
    path = "/saved-cards",
    request_body = SaveCardRequest,
    responses(
        (status = 201, description = "Card saved", body = SavedCardResponse),
        (status = 422, description = "Card rejected", body = ErrorBody)
    ),
    tag = "Saved Cards"
)]
async fn create_saved_card(
    State(state): State<AppState>,
    Json(req): Json<SaveCardRequest>,
) -> Result<(StatusCode, Json<SavedCardResponse>), ApiError> {
    let input = req.card.into_input()?;
    let saved = saved::save_card_with(
        state.cards.as_ref(),
        req.user_id,
        &input,
        &state.saved_rules,
        expiry::today(),
    )?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

/// Delete one of the user's saved cards
#[utoipa::path(
    delete,
    path = "/saved-cards",
    params(DeleteQuery),
    responses(
        (status = 200, description = "Card deleted", body = DeleteResponse),
        (status = 404, description = "No such card for this user", body = ErrorBody)
    ),
    tag = "Saved Cards"
)]
async fn delete_saved_card(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    saved::delete_card(state.cards.as_ref(), query.user_id, query.id)?;
    Ok(Json(DeleteResponse { success: true }))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Main
// ============================================================================

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/cards/validate", post(validate_card))
        .route("/checkout/quote", post(quote))
        .route("/checkout/orders", post(create_order))
        .route(
            "/saved-cards",
            get(list_saved_cards)
                .post(create_saved_card)
                .delete(delete_saved_card),
        )
        .route("/health", get(health))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    if config.parity_month {
        tracing::warn!("expiry month range check disabled");
    }

    let app = router(AppState::new(&config));

    let addr = SocketAddr::new(config.bind, config.port);
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}
