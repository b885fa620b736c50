use serde::{Deserialize, Serialize};

use crate::io::probe::BackgroundProbe;
use crate::model::card::{Card, CardDraft, Message};
use crate::model::config::AppConfig;
use crate::model::style::{EffectiveStyle, StylePatch};
use crate::store::{CardStore, StoreError};

/// Template ids carrying this prefix take the custom (guided-flow) branch.
pub const CUSTOM_TEMPLATE_PREFIX: &str = "custom-";

/// Fixed category assigned to guided-flow cards.
pub const CUSTOM_CATEGORY_ID: &str = "5";

/// Fixed title of guided-flow cards.
pub const CUSTOM_CARD_TITLE: &str = "بطاقة مخصصة";

/// Fixed text color of guided-flow cards.
pub const CUSTOM_TEXT_COLOR: &str = "#ffffff";

/// Error type for template operations
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),
}

/// Request produced by the guided creation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    /// Either `custom-*` or a catalog template id.
    pub template_id: String,
    pub font_family: String,
    /// The role/greeting line.
    pub greeting_text: String,
    /// The sender-name line.
    pub sender_name: String,
    pub background_image: String,
    #[serde(default)]
    pub styles: StylePatch,
}

// ---------------------------------------------------------------------------
// Catalog instantiation
// ---------------------------------------------------------------------------

/// Copy a catalog template into an unpersisted draft with a marked title.
/// The one lookup that fails hard: a caller expecting a populated card
/// shape has no sensible empty fallback.
pub fn use_template(store: &CardStore, template_id: &str) -> Result<CardDraft, TemplateError> {
    store
        .template(template_id)
        .map(|template| template.instantiate())
        .ok_or_else(|| TemplateError::NotFound(template_id.to_string()))
}

// ---------------------------------------------------------------------------
// Guided creation
// ---------------------------------------------------------------------------

/// Resolve a background URI for storage. Root-relative and `src/`-relative
/// paths are made absolute against the configured origin; object URIs and
/// already-absolute URLs pass through unchanged.
pub fn normalize_background(origin: &str, uri: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if let Some(rest) = uri.strip_prefix('/') {
        format!("{origin}/{rest}")
    } else if uri.starts_with("src/") {
        format!("{origin}/{uri}")
    } else {
        uri.to_string()
    }
}

/// A custom card with its id assigned but nothing persisted yet.
///
/// The two-phase split lets a caller take the id and navigate before the
/// background probe resolves, at the cost of possibly pointing at a card
/// that [`commit_staged`] later drops.
#[derive(Debug, Clone)]
pub struct StagedCard {
    card: Card,
}

impl StagedCard {
    pub fn id(&self) -> &str {
        &self.card.id
    }

    pub fn card(&self) -> &Card {
        &self.card
    }
}

/// Build and stage a custom card from a guided-flow request.
pub fn stage_custom_card(
    store: &mut CardStore,
    config: &AppConfig,
    request: &CardRequest,
) -> StagedCard {
    let defaults = EffectiveStyle::default();
    let card = Card {
        id: store.next_guided_id(),
        title: CUSTOM_CARD_TITLE.to_string(),
        category_id: CUSTOM_CATEGORY_ID.to_string(),
        background_image: normalize_background(&config.origin, &request.background_image),
        text: Message::name_and_role(&request.greeting_text, &request.sender_name),
        text_color: CUSTOM_TEXT_COLOR.to_string(),
        font_size: request.styles.font_size.unwrap_or(defaults.role_size),
        font_family: request.font_family.clone(),
        styles: Some(request.styles.clone()),
    };
    StagedCard { card }
}

/// Probe the staged card's background, then commit it. A failed probe drops
/// the card and preserves it in the recovery log instead of persisting a
/// card that cannot render.
pub fn commit_staged(
    store: &mut CardStore,
    probe: &dyn BackgroundProbe,
    staged: StagedCard,
) -> Result<Option<String>, StoreError> {
    match probe.probe(&staged.card.background_image) {
        Ok(()) => {
            let id = staged.card.id.clone();
            store.commit_card(staged.card)?;
            Ok(Some(id))
        }
        Err(reason) => {
            store.log_dropped_card(&staged.card, &reason.to_string());
            Ok(None)
        }
    }
}

/// Materialize a card from a guided-flow request.
///
/// The custom branch probes the background before committing, so a returned
/// id always refers to a card that actually landed in the store. The
/// catalog branch commits synchronously; an unknown catalog id yields
/// `Ok(None)` with no store mutation.
pub fn create_card_from_template(
    store: &mut CardStore,
    probe: &dyn BackgroundProbe,
    config: &AppConfig,
    request: &CardRequest,
) -> Result<Option<String>, StoreError> {
    if request.template_id.starts_with(CUSTOM_TEMPLATE_PREFIX) {
        let staged = stage_custom_card(store, config, request);
        return commit_staged(store, probe, staged);
    }

    let Some(template) = store.template(&request.template_id).cloned() else {
        return Ok(None);
    };
    let card = Card {
        id: store.next_guided_id(),
        title: template.title,
        category_id: template.category_id,
        background_image: template.background_image,
        text: Message::name_and_role(&request.greeting_text, &request.sender_name),
        text_color: template.text_color,
        font_size: template.font_size,
        font_family: request.font_family.clone(),
        styles: None,
    };
    let id = card.id.clone();
    store.commit_card(card)?;
    Ok(Some(id))
}
