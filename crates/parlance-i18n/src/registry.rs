//! Locale registry
//!
//! The registry owns the locale cache and the supported-code list. Hosts
//! create one per configuration and share it; there is no global instance.
//!
//! Concurrency: a cache hit takes only a shard read lock. A miss installs a
//! per-code [`OnceCell`] and initializes it outside the map lock, so
//! concurrent misses for one code collapse into a single load while misses
//! for different codes load in parallel. [`Registry::invalidate`] clears the
//! map; a load already running against a cleared cell still completes and
//! is returned to its caller, but its result is discarded rather than
//! cached, and the next `get` loads again.

use crate::catalog::Catalog;
use crate::descriptor::{descriptor, LOCALE_NAMES};
use crate::error::{I18nError, I18nResult};
use crate::loader::CatalogSource;
use crate::locale::Locale;
use crate::negotiate::parse_accept_language;
use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use parlance_common::LocaleCode;
use parlance_config::I18nConfig;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

type LocaleSlot = Arc<OnceCell<Arc<Locale>>>;

/// Result of scanning the translations directory.
#[derive(Debug)]
struct Scan {
    /// Codes with a catalog on disk.
    available: BTreeSet<LocaleCode>,
    /// Codes `get` resolves to without falling back.
    supported: Arc<BTreeSet<LocaleCode>>,
}

/// Resolves locale codes to shared [`Locale`] instances.
#[derive(Debug)]
pub struct Registry {
    source: Option<CatalogSource>,
    default_locale: LocaleCode,
    allowed: Option<BTreeSet<LocaleCode>>,
    require_catalogs: bool,
    cache: DashMap<LocaleCode, LocaleSlot>,
    scan: RwLock<Option<Arc<Scan>>>,
    supported_override: ArcSwapOption<BTreeSet<LocaleCode>>,
}

impl Registry {
    /// Creates a registry for `config`. Nothing is read from disk yet.
    pub fn new(config: &I18nConfig) -> I18nResult<Self> {
        config.validate()?;

        let default_locale: LocaleCode = config.default_locale.parse()?;
        let allowed = config
            .supported_locales
            .as_ref()
            .map(|codes| {
                codes
                    .iter()
                    .map(|code| code.parse::<LocaleCode>())
                    .collect::<Result<BTreeSet<_>, _>>()
            })
            .transpose()?;
        let source = CatalogSource::from_config(config);

        match &source {
            Some(source) => info!(
                "Registry using {} catalogs in {:?} (default locale {})",
                source.format(),
                source.dir(),
                default_locale
            ),
            None => info!(
                "Registry has no translations directory; default locale {}",
                default_locale
            ),
        }

        Ok(Self {
            source,
            default_locale,
            allowed,
            require_catalogs: config.require_catalogs,
            cache: DashMap::new(),
            scan: RwLock::new(None),
            supported_override: ArcSwapOption::empty(),
        })
    }

    /// The locale used when nothing else matches.
    pub fn default_locale(&self) -> &LocaleCode {
        &self.default_locale
    }

    /// The catalog source, if a translations directory is configured.
    pub fn source(&self) -> Option<&CatalogSource> {
        self.source.as_ref()
    }

    /// Returns the locale for `code`.
    ///
    /// Unknown or malformed codes never fail: they resolve through the
    /// same-language fallbacks to the default locale. Errors come only from
    /// loading a catalog that exists but cannot be read, or from a missing
    /// catalog when catalogs are required.
    pub fn get(&self, code: &str) -> I18nResult<Arc<Locale>> {
        self.get_closest(&[code])
    }

    /// Returns the locale for the first of `codes` that resolves.
    ///
    /// For each code in order: the exact code, its bare language, then a
    /// supported code for the same language in another region. If none
    /// match, the default locale.
    pub fn get_closest<S: AsRef<str>>(&self, codes: &[S]) -> I18nResult<Arc<Locale>> {
        let code = self.closest(codes)?;
        self.load(code)
    }

    /// Returns the best locale for an `Accept-Language` header value.
    pub fn get_for_accept_language(&self, header: &str) -> I18nResult<Arc<Locale>> {
        let tags: Vec<String> = parse_accept_language(header)
            .into_iter()
            .map(|preference| preference.tag)
            .collect();
        self.get_closest(&tags)
    }

    /// Whether `code` is in the supported list after normalization.
    pub fn is_supported(&self, code: &str) -> I18nResult<bool> {
        let Some(code) = LocaleCode::normalize(code) else {
            return Ok(false);
        };
        Ok(self.supported()?.contains(&code))
    }

    /// Supported codes with their native display names, ordered by code.
    pub fn supported_locales(&self) -> I18nResult<Vec<(LocaleCode, String)>> {
        Ok(self
            .supported()?
            .iter()
            .map(|code| {
                let name = descriptor(code.as_str()).map_or("Unknown", |d| d.name);
                (code.clone(), name.to_string())
            })
            .collect())
    }

    /// Replaces the supported list until the next [`Registry::invalidate`].
    /// The default locale is always supported.
    pub fn set_supported<S: AsRef<str>>(&self, codes: &[S]) -> I18nResult<()> {
        let mut supported = codes
            .iter()
            .map(|code| code.as_ref().parse::<LocaleCode>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        supported.insert(self.default_locale.clone());

        info!("Supported locales overridden: {} codes", supported.len());
        self.supported_override.store(Some(Arc::new(supported)));
        Ok(())
    }

    /// Drops every cached locale, the directory scan and any supported-list
    /// override. The next `get` reloads from disk.
    pub fn invalidate(&self) {
        self.cache.clear();
        *self.scan.write() = None;
        self.supported_override.store(None);
        info!("Locale cache invalidated");
    }

    /// Loads every catalog in the translations directory, bypassing the
    /// cache. Empty when no directory is configured.
    pub fn load_all(&self) -> I18nResult<BTreeMap<LocaleCode, Catalog>> {
        match &self.source {
            Some(source) => source.load_all(),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Number of locales currently cached.
    pub fn cached_len(&self) -> usize {
        self.cache.iter().filter(|slot| slot.value().get().is_some()).count()
    }

    fn supported(&self) -> I18nResult<Arc<BTreeSet<LocaleCode>>> {
        if let Some(supported) = self.supported_override.load_full() {
            return Ok(supported);
        }
        Ok(Arc::clone(&self.scan()?.supported))
    }

    fn scan(&self) -> I18nResult<Arc<Scan>> {
        if let Some(scan) = self.scan.read().as_ref() {
            return Ok(Arc::clone(scan));
        }

        let mut slot = self.scan.write();
        if let Some(scan) = slot.as_ref() {
            return Ok(Arc::clone(scan));
        }

        let available = match &self.source {
            Some(source) => match source.available_codes() {
                Ok(codes) => codes,
                Err(e) if !self.require_catalogs => {
                    warn!("Cannot list catalogs, continuing without them: {}", e);
                    BTreeSet::new()
                }
                Err(e) => return Err(e),
            },
            None => BTreeSet::new(),
        };

        let mut supported: BTreeSet<LocaleCode> = match &self.allowed {
            Some(allowed) => allowed.clone(),
            None => LOCALE_NAMES
                .iter()
                .filter_map(|d| LocaleCode::normalize(d.code))
                .chain(available.iter().cloned())
                .collect(),
        };
        supported.insert(self.default_locale.clone());

        debug!(
            "Scanned translations: {} catalogs, {} supported codes",
            available.len(),
            supported.len()
        );
        let scan = Arc::new(Scan {
            available,
            supported: Arc::new(supported),
        });
        *slot = Some(Arc::clone(&scan));
        Ok(scan)
    }

    fn closest<S: AsRef<str>>(&self, codes: &[S]) -> I18nResult<LocaleCode> {
        let supported = self.supported()?;
        let scan = self.scan()?;

        for raw in codes {
            let raw = raw.as_ref();
            let Some(code) = LocaleCode::normalize(raw) else {
                debug!("Ignoring malformed locale code {:?}", raw);
                continue;
            };

            if supported.contains(&code) {
                return Ok(code);
            }
            let language = code.language_only();
            if supported.contains(&language) {
                return Ok(language);
            }
            if let Some(sibling) = self.sibling(&supported, &scan.available, &code) {
                debug!("Resolved {} to same-language {}", code, sibling);
                return Ok(sibling);
            }
        }

        if !codes.is_empty() {
            warn!(
                "No supported locale among {:?}, using default {}",
                codes.iter().map(AsRef::as_ref).collect::<Vec<_>>(),
                self.default_locale
            );
        }
        Ok(self.default_locale.clone())
    }

    /// A supported code sharing `code`'s language. Preference: has a
    /// catalog, is the default, has the language's own region (`fr_FR`),
    /// then the first in code order.
    fn sibling(
        &self,
        supported: &BTreeSet<LocaleCode>,
        available: &BTreeSet<LocaleCode>,
        code: &LocaleCode,
    ) -> Option<LocaleCode> {
        let language = code.language();
        let native_region = language.to_ascii_uppercase();
        let candidates: Vec<&LocaleCode> = supported
            .iter()
            .filter(|candidate| candidate.language() == language)
            .collect();

        candidates
            .iter()
            .find(|c| available.contains(**c))
            .or_else(|| candidates.iter().find(|c| ***c == self.default_locale))
            .or_else(|| {
                candidates
                    .iter()
                    .find(|c| c.region() == Some(native_region.as_str()))
            })
            .or_else(|| candidates.first())
            .map(|c| (*c).clone())
    }

    fn load(&self, code: LocaleCode) -> I18nResult<Arc<Locale>> {
        self.load_with(code, |code| self.build(code))
    }

    fn load_with<F>(&self, code: LocaleCode, build: F) -> I18nResult<Arc<Locale>>
    where
        F: FnOnce(&LocaleCode) -> I18nResult<Arc<Locale>>,
    {
        // the read guard must be gone before `entry` takes the write lock
        let existing = self.cache.get(&code).map(|slot| Arc::clone(slot.value()));
        let slot = match existing {
            Some(slot) => slot,
            None => Arc::clone(self.cache.entry(code.clone()).or_default().value()),
        };

        let locale = slot.get_or_try_init(|| build(&code))?;
        Ok(Arc::clone(locale))
    }

    fn build(&self, code: &LocaleCode) -> I18nResult<Arc<Locale>> {
        debug!("Loading locale {}", code);

        let catalog = match &self.source {
            Some(source) => source.load_locale(code)?,
            None => None,
        };

        if catalog.is_none() {
            if self.require_catalogs && *code != self.default_locale {
                return Err(I18nError::CatalogNotFound {
                    domain: self
                        .source
                        .as_ref()
                        .map_or_else(|| "none".to_string(), |s| s.domain().to_string()),
                    locale: code.to_string(),
                });
            }
            debug!("No catalog for {}; messages pass through untranslated", code);
        }

        Ok(Arc::new(Locale::new(code.clone(), catalog)))
    }
}
