//! Compiled (`.mo`) message catalogs
//!
//! Layout: a 28-byte header (magic, revision, entry count, offsets of the
//! original and translation string tables), then two tables of
//! `(length, offset)` pairs. Originals encode context as
//! `context \x04 msgid` and plurals as `msgid \0 msgid_plural`; plural
//! translations are NUL-separated forms. The entry with an empty msgid is the
//! metadata header carrying `Plural-Forms`.

use crate::catalog::{Catalog, MessageKey, Renderings, CONTEXT_SEPARATOR};
use crate::error::{I18nError, I18nResult};
use crate::plural::PluralRule;
use parlance_common::LocaleCode;
use parlance_config::CatalogFormat;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

const MAGIC: u32 = 0x9504_12de;
const HEADER_LEN: usize = 28;

/// `<dir>/<code>/LC_MESSAGES/<domain>.mo`
pub fn catalog_path(dir: &Path, code: &str, domain: &str) -> PathBuf {
    dir.join(code).join("LC_MESSAGES").join(format!("{domain}.mo"))
}

/// Codes whose directory holds a catalog for `domain`.
pub fn available_codes(dir: &Path, domain: &str) -> I18nResult<BTreeSet<LocaleCode>> {
    let mut codes = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| I18nError::io(dir, e))? {
        let entry = entry.map_err(|e| I18nError::io(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        // skip .svn, .git and friends
        if name.starts_with('.') || !entry.path().is_dir() {
            continue;
        }

        if !catalog_path(dir, name, domain).is_file() {
            error!("Cannot load translation for '{}': no {}.mo", name, domain);
            continue;
        }
        match LocaleCode::normalize(name) {
            Some(code) => {
                codes.insert(code);
            }
            None => error!("Unrecognized locale directory {:?}", name),
        }
    }
    Ok(codes)
}

/// Loads the catalog for `code`, or `Ok(None)` if it has none.
///
/// The directory may be named with any casing or separator that normalizes
/// to `code` (`fr_FR`, `fr-fr`, ...).
pub fn load_locale(dir: &Path, domain: &str, code: &LocaleCode) -> I18nResult<Option<Catalog>> {
    let Some(path) = locate(dir, domain, code) else {
        debug!("No {} catalog for {} in {:?}", domain, code, dir);
        return Ok(None);
    };

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(I18nError::io(path, e)),
    };

    let catalog = parse(code.clone(), &bytes, &path)?;
    info!("Loaded {} translations for {} from {:?}", catalog.len(), code, path);
    Ok(Some(catalog))
}

fn locate(dir: &Path, domain: &str, code: &LocaleCode) -> Option<PathBuf> {
    let exact = catalog_path(dir, code.as_str(), domain);
    if exact.is_file() {
        return Some(exact);
    }

    fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| LocaleCode::normalize(name).as_ref() == Some(code))
        .map(|name| catalog_path(dir, &name, domain))
        .find(|path| path.is_file())
}

/// Parses compiled catalog bytes. `path` labels errors.
pub fn parse(code: LocaleCode, bytes: &[u8], path: &Path) -> I18nResult<Catalog> {
    let invalid = |reason: String| I18nError::InvalidCatalog {
        path: path.to_path_buf(),
        reason,
    };

    let reader = Reader::new(bytes).ok_or_else(|| invalid("bad magic number".to_string()))?;
    let revision = reader.word(4).ok_or_else(|| invalid("truncated header".to_string()))?;
    if revision >> 16 > 1 {
        return Err(invalid(format!("unsupported revision {revision:#x}")));
    }

    let count = reader.word(8).ok_or_else(|| invalid("truncated header".to_string()))?;
    let originals = reader.word(12).ok_or_else(|| invalid("truncated header".to_string()))?;
    let translations = reader.word(16).ok_or_else(|| invalid("truncated header".to_string()))?;

    let mut catalog = Catalog::new(
        code.clone(),
        CatalogFormat::Gettext,
        PluralRule::for_language(code.language()),
    );

    for index in 0..count {
        let original = reader
            .string(originals, index)
            .ok_or_else(|| invalid(format!("original string {index} out of bounds")))?;
        let translation = reader
            .string(translations, index)
            .ok_or_else(|| invalid(format!("translation {index} out of bounds")))?;

        let original = std::str::from_utf8(original)
            .map_err(|e| invalid(format!("original string {index} is not UTF-8: {e}")))?;
        let translation = std::str::from_utf8(translation)
            .map_err(|e| invalid(format!("translation {index} is not UTF-8: {e}")))?;

        if original.is_empty() {
            apply_metadata(&mut catalog, translation, path);
            continue;
        }

        let (context, msgid) = match original.split_once(CONTEXT_SEPARATOR) {
            Some((context, msgid)) => (Some(context), msgid),
            None => (None, original),
        };
        let (singular, plural_source) = match msgid.split_once('\0') {
            Some((singular, plural_source)) => (singular, Some(plural_source)),
            None => (msgid, None),
        };
        let key = match context {
            Some(context) => MessageKey::with_context(context, singular),
            None => MessageKey::new(singular),
        };

        let renderings = match plural_source {
            Some(plural_source) => {
                let forms: Vec<String> = translation.split('\0').map(str::to_string).collect();
                if forms.iter().all(String::is_empty) {
                    continue;
                }
                match Renderings::plural(plural_source, forms) {
                    Some(renderings) => renderings,
                    None => continue,
                }
            }
            None if translation.is_empty() => continue,
            None => Renderings::singular(translation),
        };

        catalog.insert(&key, renderings);
    }

    Ok(catalog)
}

/// Reads `Plural-Forms` from the metadata entry. A malformed header keeps
/// the language default rule.
fn apply_metadata(catalog: &mut Catalog, metadata: &str, path: &Path) {
    let Some(header) = metadata
        .lines()
        .find_map(|line| line.strip_prefix("Plural-Forms:"))
    else {
        return;
    };

    match PluralRule::parse_header(header.trim()) {
        Ok(rule) => {
            debug!("Plural rule for {}: {:?}", catalog.code(), rule);
            catalog.set_plural_rule(rule);
        }
        Err(e) => warn!("Ignoring Plural-Forms in {:?}: {}", path, e),
    }
}

/// Bounds-checked word and string access in either byte order.
struct Reader<'a> {
    bytes: &'a [u8],
    big_endian: bool,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Option<Self> {
        let magic: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        let big_endian = if u32::from_le_bytes(magic) == MAGIC {
            false
        } else if u32::from_be_bytes(magic) == MAGIC {
            true
        } else {
            return None;
        };
        if bytes.len() < HEADER_LEN {
            return None;
        }
        Some(Self { bytes, big_endian })
    }

    fn word(&self, offset: usize) -> Option<usize> {
        let end = offset.checked_add(4)?;
        let raw: [u8; 4] = self.bytes.get(offset..end)?.try_into().ok()?;
        let value = if self.big_endian {
            u32::from_be_bytes(raw)
        } else {
            u32::from_le_bytes(raw)
        };
        usize::try_from(value).ok()
    }

    /// String `index` of the table starting at `table`.
    fn string(&self, table: usize, index: usize) -> Option<&'a [u8]> {
        let row = table.checked_add(index.checked_mul(8)?)?;
        let len = self.word(row)?;
        let offset = self.word(row.checked_add(4)?)?;
        self.bytes.get(offset..offset.checked_add(len)?)
    }
}
