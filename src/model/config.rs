use serde::{Deserialize, Serialize};

/// Smallest font size offered by the editor. Advisory only; stored cards
/// are never validated against it.
pub const FONT_SIZE_MIN: u32 = 12;

/// Largest font size offered by the editor. Advisory only.
pub const FONT_SIZE_MAX: u32 = 72;

/// Configuration from bitaqa.toml. Every field has a default, so an empty
/// or missing file yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Origin that root-relative background paths are resolved against.
    pub origin: String,
    /// Supported type families with their display labels.
    pub fonts: Vec<FontChoice>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            origin: default_origin(),
            fonts: default_fonts(),
        }
    }
}

impl AppConfig {
    /// Display label for a font family, falling back to the raw name for
    /// families outside the catalog.
    pub fn font_label<'a>(&'a self, family: &'a str) -> &'a str {
        self.fonts
            .iter()
            .find(|f| f.value == family)
            .map(|f| f.label.as_str())
            .unwrap_or(family)
    }
}

/// One entry in the supported font catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontChoice {
    /// CSS family name, stored on cards.
    pub value: String,
    /// Arabic display label.
    pub label: String,
}

fn default_origin() -> String {
    "http://localhost:5173".to_string()
}

/// The fixed set of supported Arabic type families.
pub fn default_fonts() -> Vec<FontChoice> {
    [
        ("Amiri", "أميري"),
        ("Cairo", "القاهرة"),
        ("Tajawal", "تجوال"),
        ("Almarai", "المراعي"),
        ("Reem Kufi", "ريم كوفي"),
        ("Aref Ruqaa", "عارف رقعة"),
        ("Lateef", "لطيف"),
        ("Changa", "شنغا"),
        ("IBM Plex Sans Arabic", "IBM بلكس"),
    ]
    .into_iter()
    .map(|(value, label)| FontChoice {
        value: value.to_string(),
        label: label.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.origin, "http://localhost:5173");
        assert_eq!(config.fonts.len(), 9);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(r#"origin = "https://cards.example""#).unwrap();
        assert_eq!(config.origin, "https://cards.example");
        assert_eq!(config.fonts, default_fonts());
    }

    #[test]
    fn font_label_falls_back_to_family_name() {
        let config = AppConfig::default();
        assert_eq!(config.font_label("Cairo"), "القاهرة");
        assert_eq!(config.font_label("Comic Sans"), "Comic Sans");
    }
}
