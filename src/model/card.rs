use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::model::style::StylePatch;

/// Separator between the role line and the name line in the stored text form.
pub const MESSAGE_SEPARATOR: &str = "\n\n";

/// Placeholder shown in the name slot when no name is present.
pub const NAME_PLACEHOLDER: &str = "الاسم";

/// Placeholder shown in the role slot when no role is present.
pub const ROLE_PLACEHOLDER: &str = "المهنة";

/// The message carried by a card.
///
/// The guided flow always produces two logical lines (role/greeting and
/// sender name); free-form editing produces plain text. On disk both are a
/// single string — `NameAndRole` joins its halves with a double line-break,
/// and any stored string containing that separator reads back as
/// `NameAndRole`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Plain(String),
    NameAndRole { role: String, name: String },
}

impl Message {
    /// Build the guided-flow message from its two logical lines.
    pub fn name_and_role(role: impl Into<String>, name: impl Into<String>) -> Message {
        Message::NameAndRole {
            role: role.into(),
            name: name.into(),
        }
    }

    /// Parse the stored text form. The first double line-break splits role
    /// from name; text without one is plain.
    pub fn from_text(text: &str) -> Message {
        match text.split_once(MESSAGE_SEPARATOR) {
            Some((role, name)) => Message::NameAndRole {
                role: role.to_string(),
                name: name.to_string(),
            },
            None => Message::Plain(text.to_string()),
        }
    }

    /// The stored text form.
    pub fn to_text(&self) -> String {
        match self {
            Message::Plain(text) => text.clone(),
            Message::NameAndRole { role, name } => {
                format!("{role}{MESSAGE_SEPARATOR}{name}")
            }
        }
    }

    /// Content for the rendered name slot, placeholder when empty.
    pub fn name_slot(&self) -> &str {
        match self {
            Message::NameAndRole { name, .. } if !name.is_empty() => name,
            _ => NAME_PLACEHOLDER,
        }
    }

    /// Content for the rendered role slot. Plain text renders here,
    /// placeholder when empty.
    pub fn role_slot(&self) -> &str {
        match self {
            Message::NameAndRole { role, .. } if !role.is_empty() => role,
            Message::Plain(text) if !text.is_empty() => text,
            _ => ROLE_PLACEHOLDER,
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Message {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Message::from_text(&text))
    }
}

/// A display category for cards and templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A fully specified greeting card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Assigned by the store at creation, stable for the card's lifetime.
    pub id: String,
    pub title: String,
    /// Reference to a [`Category`] id; never validated, may dangle.
    pub category_id: String,
    /// Background asset URI: remote URL, object reference, or local path.
    pub background_image: String,
    pub text: Message,
    /// Color value, e.g. a hex string.
    pub text_color: String,
    /// Point size; the editor offers [12, 72] but nothing is enforced.
    pub font_size: u32,
    pub font_family: String,
    /// Sparse layout overrides from the guided flow. Absent fields fall back
    /// to fixed defaults at render time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StylePatch>,
}

impl Card {
    /// Merge a partial update over this card. Only provided fields change;
    /// `styles` is replaced wholly when provided, not deep-merged.
    pub fn apply(&mut self, patch: CardPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(background_image) = patch.background_image {
            self.background_image = background_image;
        }
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(text_color) = patch.text_color {
            self.text_color = text_color;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(font_family) = patch.font_family {
            self.font_family = font_family;
        }
        if let Some(styles) = patch.styles {
            self.styles = Some(styles);
        }
    }
}

/// A card without its identity, as submitted to the store for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub title: String,
    pub category_id: String,
    pub background_image: String,
    pub text: Message,
    pub text_color: String,
    pub font_size: u32,
    pub font_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StylePatch>,
}

impl CardDraft {
    /// Attach a store-assigned id.
    pub fn into_card(self, id: String) -> Card {
        Card {
            id,
            title: self.title,
            category_id: self.category_id,
            background_image: self.background_image,
            text: self.text,
            text_color: self.text_color,
            font_size: self.font_size,
            font_family: self.font_family,
            styles: self.styles,
        }
    }
}

/// A partial card update. Absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub category_id: Option<String>,
    pub background_image: Option<String>,
    pub text: Option<Message>,
    pub text_color: Option<String>,
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub styles: Option<StylePatch>,
}

/// Marker appended to a template's title when it is instantiated.
pub const COPY_SUFFIX: &str = " - نسخة";

/// A reusable starting card, instantiated by copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub background_image: String,
    pub text: Message,
    pub text_color: String,
    pub font_size: u32,
    pub font_family: String,
}

impl Template {
    /// Copy this template into an unpersisted draft, marking the title.
    pub fn instantiate(&self) -> CardDraft {
        CardDraft {
            title: format!("{}{}", self.title, COPY_SUFFIX),
            category_id: self.category_id.clone(),
            background_image: self.background_image.clone(),
            text: self.text.clone(),
            text_color: self.text_color.clone(),
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            styles: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::style::StylePatch;

    fn sample_card() -> Card {
        Card {
            id: "1700000000000".to_string(),
            title: "تهنئة".to_string(),
            category_id: "1".to_string(),
            background_image: "https://example.com/bg.png".to_string(),
            text: Message::name_and_role("مهندس", "أحمد"),
            text_color: "#ffffff".to_string(),
            font_size: 32,
            font_family: "Cairo".to_string(),
            styles: None,
        }
    }

    #[test]
    fn message_round_trips_through_text() {
        let msg = Message::name_and_role("مهندس", "أحمد");
        assert_eq!(msg.to_text(), "مهندس\n\nأحمد");
        assert_eq!(Message::from_text(&msg.to_text()), msg);

        let plain = Message::Plain("كل عام وأنتم بخير".to_string());
        assert_eq!(Message::from_text(&plain.to_text()), plain);
    }

    #[test]
    fn message_splits_on_first_separator_only() {
        let msg = Message::from_text("a\n\nb\n\nc");
        assert_eq!(
            msg,
            Message::NameAndRole {
                role: "a".to_string(),
                name: "b\n\nc".to_string(),
            }
        );
        // Nothing is lost on the way back.
        assert_eq!(msg.to_text(), "a\n\nb\n\nc");
    }

    #[test]
    fn message_slots_fall_back_to_placeholders() {
        let plain = Message::Plain("مبروك".to_string());
        assert_eq!(plain.role_slot(), "مبروك");
        assert_eq!(plain.name_slot(), NAME_PLACEHOLDER);

        let empty = Message::Plain(String::new());
        assert_eq!(empty.role_slot(), ROLE_PLACEHOLDER);
        assert_eq!(empty.name_slot(), NAME_PLACEHOLDER);

        let half = Message::name_and_role("", "أحمد");
        assert_eq!(half.role_slot(), ROLE_PLACEHOLDER);
        assert_eq!(half.name_slot(), "أحمد");
    }

    #[test]
    fn message_serializes_as_the_joined_string() {
        let json = serde_json::to_string(&Message::name_and_role("مهندس", "أحمد")).unwrap();
        assert_eq!(json, "\"مهندس\\n\\nأحمد\"");
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Message::name_and_role("مهندس", "أحمد"));
    }

    #[test]
    fn card_uses_camel_case_keys_on_disk() {
        let json = serde_json::to_value(sample_card()).unwrap();
        assert!(json.get("categoryId").is_some());
        assert!(json.get("backgroundImage").is_some());
        assert!(json.get("textColor").is_some());
        assert!(json.get("fontSize").is_some());
        assert!(json.get("fontFamily").is_some());
        // Absent styles are omitted entirely.
        assert!(json.get("styles").is_none());
    }

    #[test]
    fn apply_touches_only_provided_fields() {
        let mut card = sample_card();
        let before = card.clone();
        card.apply(CardPatch {
            title: Some("عيد سعيد".to_string()),
            ..CardPatch::default()
        });
        assert_eq!(card.title, "عيد سعيد");
        assert_eq!(card.category_id, before.category_id);
        assert_eq!(card.background_image, before.background_image);
        assert_eq!(card.text, before.text);
        assert_eq!(card.text_color, before.text_color);
        assert_eq!(card.font_size, before.font_size);
        assert_eq!(card.font_family, before.font_family);
        assert_eq!(card.styles, before.styles);
    }

    #[test]
    fn apply_replaces_styles_wholly() {
        let mut card = sample_card();
        card.styles = Some(StylePatch {
            name_size: Some(40),
            ..StylePatch::default()
        });
        card.apply(CardPatch {
            styles: Some(StylePatch {
                font_size: Some(48),
                ..StylePatch::default()
            }),
            ..CardPatch::default()
        });
        let styles = card.styles.unwrap();
        assert_eq!(styles.font_size, Some(48));
        // Not a deep merge: the old nameSize is gone.
        assert_eq!(styles.name_size, None);
    }

    #[test]
    fn template_instantiation_copies_fields_and_marks_title() {
        let template = Template {
            id: "t-1".to_string(),
            title: "تهنئة نجاح".to_string(),
            category_id: "2".to_string(),
            background_image: "/images/success.png".to_string(),
            text: Message::Plain("مبروك النجاح".to_string()),
            text_color: "#222222".to_string(),
            font_size: 28,
            font_family: "Amiri".to_string(),
        };
        let draft = template.instantiate();
        assert_eq!(draft.title, "تهنئة نجاح - نسخة");
        assert_eq!(draft.category_id, template.category_id);
        assert_eq!(draft.background_image, template.background_image);
        assert_eq!(draft.text, template.text);
        assert_eq!(draft.text_color, template.text_color);
        assert_eq!(draft.font_size, template.font_size);
        assert_eq!(draft.font_family, template.font_family);
        assert_eq!(draft.styles, None);
    }
}
