//! Saved cards: the redacted projection kept on a user's profile.
//!
//! A saved card is never more than brand, last four digits, holder name
//! and expiry. The full number and the CVV stop at the validator.

use crate::card::{CardBrand, CardInput, ValidatedCard};
use crate::mask::mask_last4;
use crate::validate::{validate_card_at, ValidationRules};
use crate::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// What gets written to the card store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedCardRequest {
    /// Owner of the card.
    pub user_id: Uuid,
    /// Brand the user selected.
    pub brand: CardBrand,
    /// Last four digits.
    pub last4: String,
    /// Trimmed holder name.
    pub holder_name: String,
    /// Expiry month as entered (01-12 unless the month check is off).
    pub expiry_month: u8,
    /// Four-digit expiry year.
    pub expiry_year: u16,
}

impl SavedCardRequest {
    /// Projects a validated card down to what may be stored.
    pub fn from_validated(user_id: Uuid, card: &ValidatedCard) -> Self {
        let expiry = card.expiry();
        Self {
            user_id,
            brand: card.brand(),
            last4: card.last_four(),
            holder_name: card.holder_name().to_string(),
            expiry_month: expiry.month(),
            expiry_year: expiry.year(),
        }
    }
}

/// A stored card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedCard {
    /// Row identifier.
    pub id: Uuid,
    /// Owner of the card.
    pub user_id: Uuid,
    /// Card brand.
    pub brand: CardBrand,
    /// Last four digits.
    pub last4: String,
    /// Holder name.
    pub holder_name: String,
    /// Expiry month.
    pub expiry_month: u8,
    /// Four-digit expiry year.
    pub expiry_year: u16,
    /// Always false when a card is first saved.
    pub is_default: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl SavedCard {
    /// Returns the number as the profile page shows it.
    pub fn masked(&self) -> String {
        mask_last4(&self.last4)
    }

    /// Returns the expiry as `MM/YY`.
    pub fn expiry_label(&self) -> String {
        format!("{:02}/{:02}", self.expiry_month, self.expiry_year % 100)
    }
}

/// Errors from a card store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No card with that id belongs to the user.
    #[error("saved card {0} not found")]
    NotFound(Uuid),

    /// The backing store failed.
    #[error("card store unavailable: {0}")]
    Backend(String),
}

/// Errors from the saved-card flows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SavedCardError {
    /// The card failed the saved-card rules.
    #[error(transparent)]
    Card(#[from] ValidationError),

    /// The store refused the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Persistence for saved cards.
pub trait CardStore: Send + Sync {
    /// Stores a card and returns the created row.
    fn insert(&self, request: SavedCardRequest) -> Result<SavedCard, StoreError>;

    /// Returns the user's cards, newest first.
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedCard>, StoreError>;

    /// Deletes a card owned by `user_id`.
    ///
    /// A card owned by someone else is reported as not found.
    fn delete(&self, user_id: Uuid, card_id: Uuid) -> Result<(), StoreError>;
}

/// In-memory card store.
#[derive(Debug, Default)]
pub struct MemoryCardStore {
    cards: RwLock<Vec<SavedCard>>,
}

impl MemoryCardStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored cards across all users.
    pub fn len(&self) -> usize {
        self.cards.read().map(|cards| cards.len()).unwrap_or(0)
    }

    /// Returns true if no cards are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("card store lock poisoned".into())
}

impl CardStore for MemoryCardStore {
    fn insert(&self, request: SavedCardRequest) -> Result<SavedCard, StoreError> {
        let card = SavedCard {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            brand: request.brand,
            last4: request.last4,
            holder_name: request.holder_name,
            expiry_month: request.expiry_month,
            expiry_year: request.expiry_year,
            is_default: false,
            created_at: Utc::now(),
        };
        self.cards.write().map_err(poisoned)?.push(card.clone());
        Ok(card)
    }

    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<SavedCard>, StoreError> {
        let cards = self.cards.read().map_err(poisoned)?;
        // Insertion order is creation order.
        Ok(cards
            .iter()
            .rev()
            .filter(|card| card.user_id == user_id)
            .cloned()
            .collect())
    }

    fn delete(&self, user_id: Uuid, card_id: Uuid) -> Result<(), StoreError> {
        let mut cards = self.cards.write().map_err(poisoned)?;
        let position = cards
            .iter()
            .position(|card| card.id == card_id && card.user_id == user_id)
            .ok_or(StoreError::NotFound(card_id))?;
        cards.remove(position);
        Ok(())
    }
}

/// Validates `input` with the saved-card rules and stores the projection.
///
/// # Example
///
/// ```
/// use storefront_cards::saved::{save_card, CardStore, MemoryCardStore};
/// use storefront_cards::{CardBrand, CardInput};
/// use uuid::Uuid;
///
/// let store = MemoryCardStore::new();
/// let user = Uuid::new_v4();
/// let input = CardInput::new(CardBrand::Visa, "4532 0151 1283 0366", "JOHN DOE", "12/30", "123");
///
/// let saved = save_card(&store, user, &input, chrono::Local::now().date_naive()).unwrap();
/// assert_eq!(saved.masked(), "**** **** **** 0366");
/// assert_eq!(store.list_for_user(user).unwrap().len(), 1);
/// ```
pub fn save_card<S: CardStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    input: &CardInput,
    today: NaiveDate,
) -> Result<SavedCard, SavedCardError> {
    save_card_with(store, user_id, input, &ValidationRules::lenient(), today)
}

/// Validates `input` with custom `rules` and stores the projection.
pub fn save_card_with<S: CardStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    input: &CardInput,
    rules: &ValidationRules,
    today: NaiveDate,
) -> Result<SavedCard, SavedCardError> {
    let card = validate_card_at(input, rules, today).map_err(|err| {
        debug!(kind = %err.kind(), field = %err.field(), "saved card rejected");
        err
    })?;

    let saved = store.insert(SavedCardRequest::from_validated(user_id, &card))?;
    info!(
        card_id = %saved.id,
        brand = saved.brand.as_str(),
        last4 = %saved.last4,
        "card saved"
    );
    Ok(saved)
}

/// Removes one of the user's saved cards.
pub fn delete_card<S: CardStore + ?Sized>(
    store: &S,
    user_id: Uuid,
    card_id: Uuid,
) -> Result<(), SavedCardError> {
    store.delete(user_id, card_id)?;
    info!(card_id = %card_id, "card deleted");
    Ok(())
}
