//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Localization engine configuration.
    pub i18n: I18nConfig,
    /// Logging configuration for hosts.
    pub logging: LoggingConfig,
}

/// On-disk catalog format. Exactly one is active per registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// One `<code>.csv` file per locale.
    Csv,
    /// `<code>/LC_MESSAGES/<domain>.mo` compiled catalogs.
    Gettext,
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("csv"),
            Self::Gettext => f.write_str("gettext"),
        }
    }
}

impl FromStr for CatalogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "gettext" | "mo" => Ok(Self::Gettext),
            other => Err(other.to_string()),
        }
    }
}

/// Localization engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Directory holding translation catalogs. `None` disables catalogs.
    pub translations_dir: Option<PathBuf>,
    /// Which catalog loader to use.
    pub catalog_format: CatalogFormat,
    /// Compiled catalog domain (file stem of the `.mo` files).
    pub domain: String,
    /// Locale used when nothing else matches.
    pub default_locale: String,
    /// Optional allow-list narrowing the supported locales.
    pub supported_locales: Option<Vec<String>>,
    /// Treat a missing catalog for a supported locale as an error.
    pub require_catalogs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}
