//! Localization engine for Parlance
//!
//! This crate loads translation catalogs and resolves locales. It includes:
//!
//! - Delimited-text (`.csv`) and compiled gettext (`.mo`) catalog loaders
//! - A concurrent locale registry with same-language fallback
//! - Context-qualified and plural-aware translation lookup
//! - Locale-aware relative dates, grouped numbers and lists
//!
//! # Example
//!
//! ```rust
//! use parlance_config::I18nConfig;
//! use parlance_i18n::Registry;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::new(&I18nConfig::default())?;
//! let locale = registry.get("en-us")?;
//!
//! assert_eq!(locale.list(&["A", "B", "C"]), "A, B and C");
//! assert_eq!(locale.friendly_number(1_000_000), "1,000,000");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod negotiate;
pub mod plural;
pub mod registry;

pub use catalog::{Catalog, MessageKey, Renderings, Resolution};
pub use descriptor::{descriptor, LocaleDescriptor, LOCALE_NAMES};
pub use error::{I18nError, I18nResult};
pub use format::{interpolate, FormatDateOptions};
pub use loader::{load_csv_translations, load_gettext_translations, CatalogSource};
pub use locale::Locale;
pub use negotiate::{parse_accept_language, LanguagePreference};
pub use plural::PluralRule;
pub use registry::Registry;

// Re-export the code type so hosts need only this crate
pub use parlance_common::LocaleCode;
