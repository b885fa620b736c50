use serde::{Deserialize, Serialize};

/// Horizontal alignment of the card text boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Sparse layout overrides attached to a card by the guided flow.
///
/// Any subset of fields may be present; resolution against the fixed
/// defaults happens field by field at render time, never all-or-nothing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    /// Size of the role/greeting line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Size of the sender-name line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_box_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_box_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_spacing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_padding: Option<PaddingPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<TextAlignment>,
}

/// Pixel padding around a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<u32>,
}

/// Placement of the text block, in percent of canvas height/width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal: Option<f32>,
}

/// Fully resolved rendering parameters for a card. Computed at render time
/// from an optional [`StylePatch`]; never persisted back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveStyle {
    /// Size of the role/greeting line (px).
    pub role_size: u32,
    /// Size of the sender-name line (px).
    pub name_size: u32,
    pub name_box_opacity: f32,
    pub job_box_opacity: f32,
    /// Gap between the two text boxes (px).
    pub vertical_spacing: u32,
    pub padding_horizontal: u32,
    pub padding_vertical: u32,
    /// Percent of canvas height.
    pub position_vertical: f32,
    /// Percent of canvas width.
    pub position_horizontal: f32,
    pub text_alignment: TextAlignment,
}

impl Default for EffectiveStyle {
    fn default() -> Self {
        EffectiveStyle {
            role_size: 32,
            name_size: 24,
            name_box_opacity: 0.3,
            job_box_opacity: 0.3,
            vertical_spacing: 20,
            padding_horizontal: 24,
            padding_vertical: 8,
            position_vertical: 80.0,
            position_horizontal: 50.0,
            text_alignment: TextAlignment::Center,
        }
    }
}

impl EffectiveStyle {
    /// Resolve a possibly-absent patch against the fixed defaults,
    /// field by field.
    pub fn resolve(patch: Option<&StylePatch>) -> EffectiveStyle {
        let defaults = EffectiveStyle::default();
        let Some(patch) = patch else {
            return defaults;
        };
        let padding = patch.text_padding.unwrap_or_default();
        let position = patch.position.unwrap_or_default();
        EffectiveStyle {
            role_size: patch.font_size.unwrap_or(defaults.role_size),
            name_size: patch.name_size.unwrap_or(defaults.name_size),
            name_box_opacity: patch.name_box_opacity.unwrap_or(defaults.name_box_opacity),
            job_box_opacity: patch.job_box_opacity.unwrap_or(defaults.job_box_opacity),
            vertical_spacing: patch.vertical_spacing.unwrap_or(defaults.vertical_spacing),
            padding_horizontal: padding.horizontal.unwrap_or(defaults.padding_horizontal),
            padding_vertical: padding.vertical.unwrap_or(defaults.padding_vertical),
            position_vertical: position.vertical.unwrap_or(defaults.position_vertical),
            position_horizontal: position.horizontal.unwrap_or(defaults.position_horizontal),
            text_alignment: patch.text_alignment.unwrap_or(defaults.text_alignment),
        }
    }
}
