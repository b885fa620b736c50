use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "bitaqa.toml";

/// Error type for configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse bitaqa.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize bitaqa.toml: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read the app config from the data directory. A missing file yields the
/// defaults; a present-but-broken file is an error, not silently replaced.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Write the app config back to the data directory.
pub fn write_config(data_dir: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = toml::to_string_pretty(config)?;
    fs::write(&path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::default_fonts;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = read_config(dir.path()).unwrap();
        assert_eq!(config.origin, "http://localhost:5173");
        assert_eq!(config.fonts, default_fonts());
    }

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.origin = "https://cards.example".to_string();

        write_config(dir.path(), &config).unwrap();
        let loaded = read_config(dir.path()).unwrap();
        assert_eq!(loaded.origin, "https://cards.example");
        assert_eq!(loaded.fonts, config.fonts);
    }

    #[test]
    fn broken_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "origin = [not toml").unwrap();
        assert!(read_config(dir.path()).is_err());
    }
}
