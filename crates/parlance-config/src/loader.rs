//! Configuration loading from TOML with environment overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{CatalogFormat, Config};
use crate::validator::ConfigValidator;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Overrides `i18n.translations_dir`.
pub const ENV_TRANSLATIONS_DIR: &str = "PARLANCE_TRANSLATIONS_DIR";
/// Overrides `i18n.default_locale`.
pub const ENV_DEFAULT_LOCALE: &str = "PARLANCE_DEFAULT_LOCALE";
/// Overrides `i18n.catalog_format`.
pub const ENV_CATALOG_FORMAT: &str = "PARLANCE_CATALOG_FORMAT";
/// Overrides `i18n.domain`.
pub const ENV_DOMAIN: &str = "PARLANCE_DOMAIN";

/// Configuration loader.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, applies process environment overrides
    /// and validates the result.
    pub fn load(&self) -> ConfigResult<Config> {
        debug!("Loading configuration from {:?}", self.path);

        let contents = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut config = Self::parse(&contents)?;
        apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
        ConfigValidator::validate(&config)?;

        info!("Loaded configuration from {:?}", self.path);
        Ok(config)
    }

    /// Parses TOML text. Missing sections and keys take their defaults.
    pub fn parse(contents: &str) -> ConfigResult<Config> {
        Ok(toml::from_str(contents)?)
    }
}

/// Applies `PARLANCE_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_TRANSLATIONS_DIR) {
        debug!("{} override: {}", ENV_TRANSLATIONS_DIR, dir);
        config.i18n.translations_dir = Some(PathBuf::from(dir));
    }

    if let Some(code) = lookup(ENV_DEFAULT_LOCALE) {
        debug!("{} override: {}", ENV_DEFAULT_LOCALE, code);
        config.i18n.default_locale = code;
    }

    if let Some(format) = lookup(ENV_CATALOG_FORMAT) {
        config.i18n.catalog_format = format
            .parse::<CatalogFormat>()
            .map_err(|value| ConfigError::InvalidOverride {
                var: ENV_CATALOG_FORMAT,
                value,
            })?;
    }

    if let Some(domain) = lookup(ENV_DOMAIN) {
        config.i18n.domain = domain;
    }

    Ok(())
}
