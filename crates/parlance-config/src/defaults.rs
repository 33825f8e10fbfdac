//! Default values.

use crate::schema::{CatalogFormat, Config, I18nConfig, LoggingConfig};

/// Default compiled catalog domain.
pub const DEFAULT_DOMAIN: &str = "messages";

/// Default locale code.
pub const DEFAULT_LOCALE: &str = "en_US";

impl Default for Config {
    fn default() -> Self {
        Self {
            i18n: I18nConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CatalogFormat {
    fn default() -> Self {
        Self::Csv
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            translations_dir: None,
            catalog_format: CatalogFormat::default(),
            domain: DEFAULT_DOMAIN.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            supported_locales: None,
            require_catalogs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "parlance=info".to_string(),
            json: false,
        }
    }
}
