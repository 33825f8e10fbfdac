//! Delimited-text catalogs
//!
//! One `<code>.csv` file per locale, rows of `source, translation[, third]`.
//! The third column is either a plural indicator
//! (`singular|plural|unknown`, blank meaning unknown) or the translation
//! used when the count is not one. Files may be UTF-8
//! with or without a byte-order mark, or UTF-16 (either byte order) with a
//! byte-order mark.

use crate::catalog::{Catalog, MessageKey, Renderings};
use crate::error::{I18nError, I18nResult};
use crate::plural::PluralRule;
use parlance_common::LocaleCode;
use parlance_config::CatalogFormat;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// The optional third column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralIndicator {
    /// Used when the count is exactly one.
    Singular,
    /// Used when the count is anything but one.
    Plural,
    /// Not count-dependent.
    Unknown,
}

impl FromStr for PluralIndicator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "singular" => Ok(Self::Singular),
            "plural" => Ok(Self::Plural),
            "" | "unknown" => Ok(Self::Unknown),
            _ => Err(()),
        }
    }
}

/// Codes with a `<code>.csv` file in `dir`.
pub fn available_codes(dir: &Path) -> I18nResult<BTreeSet<LocaleCode>> {
    let mut codes = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| I18nError::io(dir, e))? {
        let path = entry.map_err(|e| I18nError::io(dir, e))?.path();
        if path.extension() != Some(OsStr::new("csv")) {
            continue;
        }

        let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
        match LocaleCode::normalize(stem).filter(|_| is_catalog_stem(stem)) {
            Some(code) => {
                codes.insert(code);
            }
            None => error!("Unrecognized locale {:?} (path: {:?})", stem, path),
        }
    }
    Ok(codes)
}

/// `[a-z]+(_[A-Z]+)?`
fn is_catalog_stem(stem: &str) -> bool {
    let (language, region) = match stem.split_once('_') {
        Some((language, region)) => (language, Some(region)),
        None => (stem, None),
    };
    let language_ok = !language.is_empty() && language.chars().all(|c| c.is_ascii_lowercase());
    let region_ok = region.map_or(true, |region| {
        !region.is_empty() && region.chars().all(|c| c.is_ascii_uppercase())
    });
    language_ok && region_ok
}

/// Loads `<dir>/<code>.csv`, or `Ok(None)` if there is no such file.
pub fn load_locale(dir: &Path, code: &LocaleCode) -> I18nResult<Option<Catalog>> {
    let path = dir.join(format!("{code}.csv"));
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(I18nError::io(path, e)),
    };

    let text = decode(&bytes).map_err(|reason| I18nError::Decode {
        path: path.clone(),
        reason,
    })?;

    let catalog = parse_catalog(code.clone(), &text, &path);
    info!("Loaded {} translations for {} from {:?}", catalog.len(), code, path);
    Ok(Some(catalog))
}

/// Decodes catalog bytes into text, honoring a leading byte-order mark.
pub fn decode(bytes: &[u8]) -> Result<String, String> {
    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        return decode_utf16(rest, u16::from_be_bytes);
    }
    let rest = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(rest.to_vec()).map_err(|e| format!("invalid UTF-8: {e}"))
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err("UTF-16 requires an even number of bytes".to_string());
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| format!("invalid UTF-16: {e}"))
}

/// Builds a catalog from decoded text. Malformed rows are logged and
/// skipped; `path` only labels the log lines.
pub fn parse_catalog(code: LocaleCode, text: &str, path: &Path) -> Catalog {
    let mut catalog = Catalog::new(code, CatalogFormat::Csv, PluralRule::germanic());

    for (line, row) in records(text) {
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if row.len() < 2 {
            warn!("Skipping row with fewer than 2 columns in {:?} line {}", path, line);
            continue;
        }

        let source = row[0].trim();
        let translation = row[1].trim();
        if source.is_empty() {
            warn!("Skipping row with blank source text in {:?} line {}", path, line);
            continue;
        }

        let third = row.get(2).map_or("", |field| field.trim());
        let renderings = match third.parse::<PluralIndicator>() {
            Ok(_) => Renderings::singular(translation),
            Err(()) => Renderings::counted(translation, third),
        };

        if catalog.insert(&MessageKey::new(source), renderings).is_some() {
            debug!("Duplicate source text {:?} in {:?} line {}", source, path, line);
        }
    }

    catalog
}

/// Splits text into records of fields, tagging each record with the line it
/// starts on. Quoted fields may contain commas, newlines and `""` escapes.
fn records(text: &str) -> Vec<(usize, Vec<String>)> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push((record_line, std::mem::take(&mut fields)));
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Resolution;

    fn fr() -> LocaleCode {
        "fr_FR".parse().unwrap()
    }

    #[test]
    fn test_decode_variants_agree() {
        let text = "\"school\",\"\u{e9}cole\"\n";
        let mut utf8_bom = UTF8_BOM.to_vec();
        utf8_bom.extend_from_slice(text.as_bytes());
        let mut utf16_le = UTF16_LE_BOM.to_vec();
        utf16_le.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        let mut utf16_be = UTF16_BE_BOM.to_vec();
        utf16_be.extend(text.encode_utf16().flat_map(u16::to_be_bytes));

        for bytes in [text.as_bytes().to_vec(), utf8_bom, utf16_le, utf16_be] {
            assert_eq!(decode(&bytes).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_failures() {
        assert!(decode(&[0xC3, 0x28]).is_err());
        assert!(decode(&[0xFF, 0xFE, 0x41]).is_err());
        // unpaired surrogate
        assert!(decode(&[0xFF, 0xFE, 0x00, 0xD8]).is_err());
    }

    #[test]
    fn test_records_quoting() {
        let rows = records("a,\"b, c\"\r\n\"say \"\"hi\"\"\",\"multi\nline\"\nlast");
        assert_eq!(
            rows,
            vec![
                (1, vec!["a".to_string(), "b, c".to_string()]),
                (2, vec!["say \"hi\"".to_string(), "multi\nline".to_string()]),
                (4, vec!["last".to_string()]),
            ]
        );
    }

    #[test]
    fn test_parse_skips_bad_rows() {
        let text = "school,\u{e9}cole\nlonely\n, blank source\n\n  pen , stylo ,plural\n";
        let catalog = parse_catalog(fr(), text, Path::new("fr_FR.csv"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve(None, "school", None), Resolution::Plain("\u{e9}cole"));
        assert_eq!(catalog.resolve(None, "pen", None), Resolution::Plain("stylo"));
        assert_eq!(catalog.resolve(None, "lonely", None), Resolution::Literal("lonely"));
        assert_eq!(catalog.format(), CatalogFormat::Csv);
    }

    #[test]
    fn test_third_column_plural_translation() {
        let text = "school,\u{e9}cole\napple,pomme,pommes\n\"%(count)d book\",\"%(count)d livre\",\"%(count)d livres\"\n";
        let catalog = parse_catalog(fr(), text, Path::new("fr_FR.csv"));

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.resolve(None, "apple", None), Resolution::Plain("pomme"));
        assert_eq!(catalog.resolve(None, "apple", Some(("apples", 1))), Resolution::Plain("pomme"));
        assert_eq!(catalog.resolve(None, "apple", Some(("apples", 2))), Resolution::Plain("pommes"));
        assert_eq!(catalog.resolve(None, "apple", Some(("apples", 0))), Resolution::Plain("pommes"));
        assert_eq!(
            catalog
                .resolve(None, "%(count)d book", Some(("%(count)d books", 5)))
                .as_str(),
            "%(count)d livres"
        );
    }

    #[test]
    fn test_plural_rows_selected_by_count() {
        let text = "\"%(count)d school\",\"%(count)d \u{e9}cole\",singular\n\
                    \"%(count)d schools\",\"%(count)d \u{e9}coles\",plural\n";
        let catalog = parse_catalog(fr(), text, Path::new("fr_FR.csv"));
        let plural = |count| {
            catalog
                .resolve(None, "%(count)d school", Some(("%(count)d schools", count)))
                .as_str()
        };
        assert_eq!(plural(1), "%(count)d \u{e9}cole");
        assert_eq!(plural(3), "%(count)d \u{e9}coles");
    }

    #[test]
    fn test_catalog_stem_pattern() {
        assert!(is_catalog_stem("fr_FR"));
        assert!(is_catalog_stem("de"));
        assert!(!is_catalog_stem("fr-FR"));
        assert!(!is_catalog_stem("FR_fr"));
        assert!(!is_catalog_stem("fr_"));
    }

    #[test]
    fn test_indicator_parse() {
        assert_eq!("".parse::<PluralIndicator>(), Ok(PluralIndicator::Unknown));
        assert_eq!("plural".parse::<PluralIndicator>(), Ok(PluralIndicator::Plural));
        assert!("Plural".parse::<PluralIndicator>().is_err());
    }
}
