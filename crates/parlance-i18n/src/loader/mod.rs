//! Catalog loading
//!
//! A [`CatalogSource`] names one translations directory and the format its
//! catalogs are stored in. Adding a format means adding a variant and a
//! submodule with `available_codes` / `load_locale` functions; call sites
//! only ever see the enum.

pub mod csv;
pub mod gettext;

use crate::catalog::Catalog;
use crate::error::I18nResult;
use parlance_common::LocaleCode;
use parlance_config::{CatalogFormat, I18nConfig};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where and how catalogs are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// `<dir>/<code>.csv`
    Csv {
        /// Translations directory.
        dir: PathBuf,
    },
    /// `<dir>/<code>/LC_MESSAGES/<domain>.mo`
    Gettext {
        /// Translations directory.
        dir: PathBuf,
        /// Catalog file stem.
        domain: String,
    },
}

impl CatalogSource {
    /// The source described by `config`, or `None` when no directory is set.
    pub fn from_config(config: &I18nConfig) -> Option<Self> {
        let dir = config.translations_dir.clone()?;
        Some(match config.catalog_format {
            CatalogFormat::Csv => Self::Csv { dir },
            CatalogFormat::Gettext => Self::Gettext {
                dir,
                domain: config.domain.clone(),
            },
        })
    }

    /// The on-disk format this source reads.
    pub fn format(&self) -> CatalogFormat {
        match self {
            Self::Csv { .. } => CatalogFormat::Csv,
            Self::Gettext { .. } => CatalogFormat::Gettext,
        }
    }

    /// The translations directory.
    pub fn dir(&self) -> &Path {
        match self {
            Self::Csv { dir } | Self::Gettext { dir, .. } => dir,
        }
    }

    /// The domain name used in error reports.
    pub fn domain(&self) -> &str {
        match self {
            Self::Csv { .. } => "csv",
            Self::Gettext { domain, .. } => domain,
        }
    }

    /// Codes that have a catalog on disk. Listing only; nothing is parsed.
    pub fn available_codes(&self) -> I18nResult<BTreeSet<LocaleCode>> {
        match self {
            Self::Csv { dir } => csv::available_codes(dir),
            Self::Gettext { dir, domain } => gettext::available_codes(dir, domain),
        }
    }

    /// Loads the catalog for one code. `Ok(None)` means no catalog exists.
    pub fn load_locale(&self, code: &LocaleCode) -> I18nResult<Option<Catalog>> {
        match self {
            Self::Csv { dir } => csv::load_locale(dir, code),
            Self::Gettext { dir, domain } => gettext::load_locale(dir, domain, code),
        }
    }

    /// Loads every catalog in the directory.
    ///
    /// A catalog that cannot be decoded fails the whole call.
    pub fn load_all(&self) -> I18nResult<BTreeMap<LocaleCode, Catalog>> {
        let mut catalogs = BTreeMap::new();
        for code in self.available_codes()? {
            match self.load_locale(&code)? {
                Some(catalog) => {
                    catalogs.insert(code, catalog);
                }
                None => warn!("Catalog for {} disappeared during load", code),
            }
        }

        info!(
            "Loaded {} {} catalogs from {:?}",
            catalogs.len(),
            self.format(),
            self.dir()
        );
        Ok(catalogs)
    }
}

/// Loads all delimited-text catalogs in `dir`.
pub fn load_csv_translations(dir: impl Into<PathBuf>) -> I18nResult<BTreeMap<LocaleCode, Catalog>> {
    CatalogSource::Csv { dir: dir.into() }.load_all()
}

/// Loads all compiled catalogs for `domain` in `dir`.
pub fn load_gettext_translations(
    dir: impl Into<PathBuf>,
    domain: impl Into<String>,
) -> I18nResult<BTreeMap<LocaleCode, Catalog>> {
    CatalogSource::Gettext {
        dir: dir.into(),
        domain: domain.into(),
    }
    .load_all()
}
