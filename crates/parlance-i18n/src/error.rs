//! Error types for internationalization operations

use parlance_common::InvalidLocaleCode;
use parlance_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading catalogs or resolving locales.
///
/// Translation lookups never produce these: a missing translation degrades
/// to the source text.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to read a file or directory
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File or directory being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file could not be decoded under any supported encoding
    #[error("Failed to decode {path}: {reason}")]
    Decode {
        /// Catalog file.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// A compiled catalog is truncated or otherwise corrupt
    #[error("Invalid compiled catalog {path}: {reason}")]
    InvalidCatalog {
        /// Catalog file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// No catalog exists for a locale that was required to have one
    #[error("No catalog for domain '{domain}' and locale {locale}")]
    CatalogNotFound {
        /// Gettext domain, or the catalog format when there is none.
        domain: String,
        /// Requested locale.
        locale: String,
    },

    /// A `Plural-Forms` expression failed to parse
    #[error("Invalid plural expression {expr:?}: {reason}")]
    PluralForms {
        /// The expression as read from the header.
        expr: String,
        /// Parser message.
        reason: String,
    },

    /// A locale code could not be normalized
    #[error(transparent)]
    InvalidLocaleCode(#[from] InvalidLocaleCode),

    /// The registry was handed an invalid configuration
    #[error("Invalid i18n configuration: {0}")]
    Config(#[from] ConfigError),
}

impl I18nError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
