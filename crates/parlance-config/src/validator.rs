//! Runtime validation of loaded configuration.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{CatalogFormat, Config, I18nConfig};
use parlance_common::LocaleCode;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> ConfigResult<()> {
        config.i18n.validate()
    }
}

impl I18nConfig {
    /// Validates the localization settings.
    pub fn validate(&self) -> ConfigResult<()> {
        if LocaleCode::normalize(&self.default_locale).is_none() {
            return Err(ConfigError::Invalid(format!(
                "default_locale {:?} is not a locale code",
                self.default_locale
            )));
        }

        if self.domain.trim().is_empty() {
            return Err(ConfigError::Invalid("domain cannot be empty".to_string()));
        }

        if self.catalog_format == CatalogFormat::Gettext && self.translations_dir.is_none() {
            return Err(ConfigError::Invalid(
                "gettext catalogs require translations_dir".to_string(),
            ));
        }

        if let Some(codes) = &self.supported_locales {
            if let Some(bad) = codes.iter().find(|code| LocaleCode::normalize(code).is_none()) {
                return Err(ConfigError::Invalid(format!(
                    "supported_locales entry {bad:?} is not a locale code"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_default_locale() {
        let mut config = Config::default();
        config.i18n.default_locale = "en_US_POSIX".to_string();
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_empty_domain() {
        let mut config = Config::default();
        config.i18n.domain = "  ".to_string();
        assert!(config.i18n.validate().is_err());
    }

    #[test]
    fn test_gettext_requires_directory() {
        let mut config = Config::default();
        config.i18n.catalog_format = CatalogFormat::Gettext;
        assert!(config.i18n.validate().is_err());

        config.i18n.translations_dir = Some(PathBuf::from("locale"));
        assert!(config.i18n.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_supported_entry() {
        let mut config = Config::default();
        config.i18n.supported_locales = Some(vec!["fr_FR".to_string(), "".to_string()]);
        assert!(config.i18n.validate().is_err());
    }
}
