//! Configuration file support for acknowlist
//!
//! Reads configuration from `~/.config/acknowlist/config.json`:
//!
//! ```json
//! {
//!   "plist_prefix": "Pods",
//!   "locale": "fr",
//!   "cocoapods_footer": "Généré par CocoaPods",
//!   "header_text": "Merci à :",
//!   "footer_text": null
//! }
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix CocoaPods uses for generated support files
pub const DEFAULT_PLIST_PREFIX: &str = "Pods";

/// Shown in place of the stock "Generated by CocoaPods - …" footer
pub const DEFAULT_COCOAPODS_FOOTER: &str = "Generated by CocoaPods";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine config directory. HOME environment variable not set.")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Settings-bundle file prefix (default: "Pods")
    #[serde(default = "default_plist_prefix")]
    pub plist_prefix: String,

    /// BCP-47 locale used to collate titles; root collation when unset
    #[serde(default)]
    pub locale: Option<String>,

    /// Localized replacement for the default CocoaPods footer
    #[serde(default = "default_cocoapods_footer")]
    pub cocoapods_footer: String,

    /// Header shown instead of whatever the sources provide
    #[serde(default)]
    pub header_text: Option<String>,

    /// Footer shown instead of whatever the sources provide
    #[serde(default)]
    pub footer_text: Option<String>,
}

fn default_plist_prefix() -> String {
    DEFAULT_PLIST_PREFIX.to_string()
}

fn default_cocoapods_footer() -> String {
    DEFAULT_COCOAPODS_FOOTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plist_prefix: default_plist_prefix(),
            locale: None,
            cocoapods_footer: default_cocoapods_footer(),
            header_text: None,
            footer_text: None,
        }
    }
}

impl Config {
    /// Load configuration from the default path or return defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::ParseError { path, source })
    }
}

/// Returns the config file path: `~/.config/acknowlist/config.json`
pub fn config_path() -> Result<PathBuf, ConfigError> {
    // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".config"))
                .unwrap_or_default()
        });

    if config_base.as_os_str().is_empty() {
        return Err(ConfigError::NoConfigDir);
    }

    Ok(config_base.join("acknowlist").join("config.json"))
}
