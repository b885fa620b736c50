use crate::model::style::EffectiveStyle;
use crate::store::CardStore;

/// Largest font size used in gallery thumbnails.
const PREVIEW_FONT_SIZE_MAX: u32 = 24;

/// One text box on the rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub content: String,
    /// Resolved size (px).
    pub font_size: u32,
    /// Background opacity of the box, 0.0–1.0.
    pub box_opacity: f32,
}

/// Everything the rendering/export layer needs to paint a card. The core
/// hands this over and takes no part in the painting itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub background_image: String,
    pub title: String,
    /// Empty when the card's category reference dangles.
    pub category_label: String,
    pub font_family: String,
    pub text_color: String,
    /// The sender-name slot (placeholder applied when absent).
    pub name_box: TextBox,
    /// The role/greeting slot (placeholder applied when absent).
    pub role_box: TextBox,
    pub style: EffectiveStyle,
}

/// Build the render plan for a card, resolving its style overrides and
/// splitting its message into the two display slots. `None` when the id is
/// unknown.
pub fn render_plan(store: &CardStore, card_id: &str) -> Option<RenderPlan> {
    let card = store.get_card(card_id)?;
    let style = EffectiveStyle::resolve(card.styles.as_ref());
    Some(RenderPlan {
        background_image: card.background_image.clone(),
        title: card.title.clone(),
        category_label: store.category_label(card).to_string(),
        font_family: card.font_family.clone(),
        text_color: card.text_color.clone(),
        name_box: TextBox {
            content: card.text.name_slot().to_string(),
            font_size: style.name_size,
            box_opacity: style.name_box_opacity,
        },
        role_box: TextBox {
            content: card.text.role_slot().to_string(),
            font_size: style.role_size,
            box_opacity: style.job_box_opacity,
        },
        style,
    })
}

/// Deterministic download name for an exported card image: whitespace runs
/// in the title collapse to dashes.
pub fn export_file_name(title: &str) -> String {
    let dashed = title.split_whitespace().collect::<Vec<_>>().join("-");
    format!("بطاقة-{dashed}.png")
}

/// Clamp a card's font size for gallery thumbnails.
pub fn preview_font_size(font_size: u32) -> u32 {
    font_size.min(PREVIEW_FONT_SIZE_MAX)
}
