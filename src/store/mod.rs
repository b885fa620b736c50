pub mod ids;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::io::recovery::{RecoveryCategory, RecoveryEntry};
use crate::io::slots::{CARDS_SLOT, CATEGORIES_SLOT, Slots};
use crate::model::card::{Card, CardDraft, CardPatch, Category, Template};
use crate::store::ids::IdGenerator;

/// Id of the category every fresh store starts with.
pub const DEFAULT_CATEGORY_ID: &str = "1";

/// Name of the category every fresh store starts with.
pub const DEFAULT_CATEGORY_NAME: &str = "بطاقات مخصصة";

/// Error type for store mutations. Lookup misses are never errors — CRUD is
/// idempotent on absent ids — so only persistence failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not serialize slot {slot}: {source}")]
    Serialize {
        slot: &'static str,
        source: serde_json::Error,
    },
    #[error("could not write slot {slot}: {source}")]
    Write {
        slot: &'static str,
        source: std::io::Error,
    },
}

/// Sole owner of the card and category collections.
///
/// All mutations go through here; every mutation rewrites the affected
/// collection to its durable slot. Single logical writer, last write wins.
pub struct CardStore {
    cards: Vec<Card>,
    categories: Vec<Category>,
    templates: Vec<Template>,
    ids: IdGenerator,
    slots: Box<dyn Slots>,
}

impl CardStore {
    /// Open a store over the given persistence port, loading both slots.
    /// Missing or unparseable slots fall back to the fixed defaults (empty
    /// cards, one default category); parse failures land in the recovery
    /// log, never at the caller.
    pub fn open(slots: Box<dyn Slots>) -> CardStore {
        let cards = load_slot(&*slots, CARDS_SLOT).unwrap_or_default();
        let categories = load_slot(&*slots, CATEGORIES_SLOT).unwrap_or_else(|| {
            vec![Category {
                id: DEFAULT_CATEGORY_ID.to_string(),
                name: DEFAULT_CATEGORY_NAME.to_string(),
            }]
        });
        CardStore {
            cards,
            categories,
            templates: Vec::new(),
            ids: IdGenerator::new(),
            slots,
        }
    }

    /// Inject a template catalog. The catalog is fixed for the store's
    /// lifetime and never persisted.
    pub fn with_templates(mut self, templates: Vec<Template>) -> CardStore {
        self.templates = templates;
        self
    }

    // -----------------------------------------------------------------------
    // Cards
    // -----------------------------------------------------------------------

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get_card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Assign a fresh id to the draft, append it, persist the collection.
    pub fn add_card(&mut self, draft: CardDraft) -> Result<Card, StoreError> {
        let mut id = self.ids.next_id();
        while self.contains_id(&id) {
            id = self.ids.next_id();
        }
        let card = draft.into_card(id);
        self.cards.push(card.clone());
        self.save_cards()?;
        Ok(card)
    }

    /// Merge a partial update over the card with `id`. Silent no-op when the
    /// id is absent.
    pub fn update_card(&mut self, id: &str, patch: CardPatch) -> Result<(), StoreError> {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == id) else {
            return Ok(());
        };
        card.apply(patch);
        self.save_cards()
    }

    /// Remove the card with `id`. No-op when absent.
    pub fn delete_card(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        if self.cards.len() == before {
            return Ok(());
        }
        self.save_cards()
    }

    /// Append a card whose id was assigned out-of-band (the guided flow).
    pub(crate) fn commit_card(&mut self, card: Card) -> Result<(), StoreError> {
        self.cards.push(card);
        self.save_cards()
    }

    /// Fresh guided-flow id, guaranteed absent from the store.
    pub(crate) fn next_guided_id(&mut self) -> String {
        let mut id = self.ids.next_guided_id();
        while self.contains_id(&id) {
            id = self.ids.next_guided_id();
        }
        id
    }

    fn contains_id(&self, id: &str) -> bool {
        self.cards.iter().any(|card| card.id == id)
    }

    // -----------------------------------------------------------------------
    // Categories
    // -----------------------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn add_category(&mut self, name: String) -> Result<Category, StoreError> {
        let mut id = self.ids.next_id();
        while self.categories.iter().any(|c| c.id == id) {
            id = self.ids.next_id();
        }
        let category = Category { id, name };
        self.categories.push(category.clone());
        self.save_categories()?;
        Ok(category)
    }

    /// Rename the category with `id`. No-op when absent.
    pub fn update_category(&mut self, id: &str, name: String) -> Result<(), StoreError> {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(());
        };
        category.name = name;
        self.save_categories()
    }

    /// Remove the category with `id`. No-op when absent. Cards referencing
    /// it are left alone; their references dangle and resolve to an empty
    /// label from then on.
    pub fn delete_category(&mut self, id: &str) -> Result<(), StoreError> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Ok(());
        }
        self.save_categories()
    }

    /// Display label for a card's category; empty on a dangling reference.
    pub fn category_label(&self, card: &Card) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == card.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("")
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn templates_by_category(&self, category_id: &str) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| t.category_id == category_id)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    fn save_cards(&mut self) -> Result<(), StoreError> {
        save_slot(&mut *self.slots, CARDS_SLOT, &self.cards)
    }

    fn save_categories(&mut self) -> Result<(), StoreError> {
        save_slot(&mut *self.slots, CATEGORIES_SLOT, &self.categories)
    }

    /// Record a card the guided flow had to drop, so its content is
    /// recoverable even though it never reached the store.
    pub(crate) fn log_dropped_card(&self, card: &Card, reason: &str) {
        self.slots.log_recovery(RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::ImageLoad,
            description: "card dropped: background failed to load".to_string(),
            fields: vec![
                ("Card".to_string(), card.id.clone()),
                ("Background".to_string(), card.background_image.clone()),
                ("Error".to_string(), reason.to_string()),
            ],
            body: serde_json::to_string_pretty(card).unwrap_or_default(),
        });
    }
}

/// Parse one slot's collection. Absent slot → `None`; a slot that fails to
/// parse is preserved in the recovery log and also yields `None`.
fn load_slot<T: DeserializeOwned>(slots: &dyn Slots, slot: &'static str) -> Option<Vec<T>> {
    let raw = slots.read(slot)?;
    match serde_json::from_str(&raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            slots.log_recovery(RecoveryEntry {
                timestamp: Utc::now(),
                category: RecoveryCategory::Parse,
                description: format!("slot {slot} failed to parse"),
                fields: vec![("Error".to_string(), e.to_string())],
                body: raw,
            });
            None
        }
    }
}

/// Serialize and write one slot. A failed write preserves the payload in
/// the recovery log before surfacing the error.
fn save_slot<T: Serialize>(
    slots: &mut dyn Slots,
    slot: &'static str,
    collection: &[T],
) -> Result<(), StoreError> {
    let payload =
        serde_json::to_string_pretty(collection).map_err(|source| StoreError::Serialize {
            slot,
            source,
        })?;
    if let Err(source) = slots.write(slot, &payload) {
        slots.log_recovery(RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Write,
            description: format!("slot {slot} write failed"),
            fields: vec![("Error".to_string(), source.to_string())],
            body: payload,
        });
        return Err(StoreError::Write { slot, source });
    }
    Ok(())
}
