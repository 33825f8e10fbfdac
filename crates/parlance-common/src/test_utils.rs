//! Test utilities and shared test helpers for the Parlance workspace.
//!
//! This module provides logging setup, fixed timestamps, and fixture writers
//! for both catalog formats so tests never depend on checked-in binaries.

use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Test fixture for creating a fixed UTC timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// The French delimited-text catalog used across the test suites.
pub const FR_FR_CSV: &str = "\"school\",\"\u{e9}cole\"\n\
\"%(count)d school\",\"%(count)d \u{e9}cole\",\"singular\"\n\
\"%(count)d schools\",\"%(count)d \u{e9}coles\",\"plural\"\n";

/// Byte-order-mark bearing encodings used by the catalog fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureEncoding {
    /// UTF-8 without a byte-order mark.
    Utf8,
    /// UTF-8 preceded by `EF BB BF`.
    Utf8Bom,
    /// UTF-16 little endian preceded by `FF FE`.
    Utf16LeBom,
    /// UTF-16 big endian preceded by `FE FF`.
    Utf16BeBom,
}

impl FixtureEncoding {
    /// Encode `text` into bytes using this encoding.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf8Bom => {
                let mut bytes = vec![0xEF, 0xBB, 0xBF];
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
            Self::Utf16LeBom => {
                let mut bytes = vec![0xFF, 0xFE];
                bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
                bytes
            }
            Self::Utf16BeBom => {
                let mut bytes = vec![0xFE, 0xFF];
                bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                bytes
            }
        }
    }
}

/// Write `<dir>/<code>.csv` with the given contents and encoding.
pub fn write_csv_catalog(
    dir: &Path,
    code: &str,
    contents: &str,
    encoding: FixtureEncoding,
) -> io::Result<PathBuf> {
    let path = dir.join(format!("{code}.csv"));
    fs::write(&path, encoding.encode(contents))?;
    Ok(path)
}

/// Builder for compiled (`.mo`) message catalogs.
///
/// Produces revision 0 files with an empty hash table, which is what
/// `msgfmt --no-hash` emits.
#[derive(Debug, Default, Clone)]
pub struct MoBuilder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    big_endian: bool,
}

impl MoBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the file in big-endian byte order.
    #[must_use]
    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    /// Add the metadata entry (empty msgid), e.g. a `Plural-Forms` header.
    #[must_use]
    pub fn header(self, header: &str) -> Self {
        self.raw(String::new(), header.to_string())
    }

    /// Add a plain `msgid -> msgstr` entry.
    #[must_use]
    pub fn message(self, msgid: &str, msgstr: &str) -> Self {
        self.raw(msgid.to_string(), msgstr.to_string())
    }

    /// Add a context-qualified entry.
    #[must_use]
    pub fn context_message(self, context: &str, msgid: &str, msgstr: &str) -> Self {
        self.raw(format!("{context}\u{4}{msgid}"), msgstr.to_string())
    }

    /// Add a plural entry, optionally context-qualified.
    #[must_use]
    pub fn plural_message(
        self,
        context: Option<&str>,
        msgid: &str,
        msgid_plural: &str,
        forms: &[&str],
    ) -> Self {
        let original = match context {
            Some(context) => format!("{context}\u{4}{msgid}\0{msgid_plural}"),
            None => format!("{msgid}\0{msgid_plural}"),
        };
        self.raw(original, forms.join("\0"))
    }

    fn raw(mut self, original: String, translation: String) -> Self {
        self.entries.push((original.into_bytes(), translation.into_bytes()));
        self
    }

    /// Serialize the catalog.
    pub fn build(mut self) -> Vec<u8> {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));

        let count = self.entries.len();
        let originals_offset = 28;
        let translations_offset = originals_offset + count * 8;
        let strings_offset = translations_offset + count * 8;

        let mut strings = Vec::new();
        let mut originals = Vec::with_capacity(count);
        let mut translations = Vec::with_capacity(count);
        for (original, _) in &self.entries {
            originals.push((original.len(), strings_offset + strings.len()));
            strings.extend_from_slice(original);
            strings.push(0);
        }
        for (_, translation) in &self.entries {
            translations.push((translation.len(), strings_offset + strings.len()));
            strings.extend_from_slice(translation);
            strings.push(0);
        }

        let word = |value: usize| -> [u8; 4] {
            let value = u32::try_from(value).expect("catalog fixture too large");
            if self.big_endian {
                value.to_be_bytes()
            } else {
                value.to_le_bytes()
            }
        };

        let mut out = Vec::with_capacity(strings_offset + strings.len());
        out.extend_from_slice(&word(0x9504_12de));
        out.extend_from_slice(&word(0));
        out.extend_from_slice(&word(count));
        out.extend_from_slice(&word(originals_offset));
        out.extend_from_slice(&word(translations_offset));
        out.extend_from_slice(&word(0));
        out.extend_from_slice(&word(strings_offset));
        for (len, offset) in originals.iter().chain(translations.iter()) {
            out.extend_from_slice(&word(*len));
            out.extend_from_slice(&word(*offset));
        }
        out.extend_from_slice(&strings);
        out
    }

    /// Write the catalog to `<dir>/<code>/LC_MESSAGES/<domain>.mo`.
    pub fn write(self, dir: &Path, code: &str, domain: &str) -> io::Result<PathBuf> {
        let messages_dir = dir.join(code).join("LC_MESSAGES");
        fs::create_dir_all(&messages_dir)?;
        let path = messages_dir.join(format!("{domain}.mo"));
        fs::write(&path, self.build())?;
        Ok(path)
    }
}

/// The French compiled catalog used across the test suites.
pub fn fr_fr_mo() -> MoBuilder {
    MoBuilder::new()
        .header(
            "Project-Id-Version: parlance\n\
             Language: fr_FR\n\
             Content-Type: text/plain; charset=UTF-8\n\
             Plural-Forms: nplurals=2; plural=(n > 1);\n",
        )
        .message("school", "\u{e9}cole")
        .context_message("law", "right", "le droit")
        .context_message("good", "right", "le bien")
        .plural_message(Some("organization"), "club", "clubs", &["le club", "les clubs"])
        .plural_message(Some("stick"), "club", "clubs", &["le b\u{e2}ton", "les b\u{e2}tons"])
}
