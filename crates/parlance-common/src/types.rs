//! Common type definitions and newtype wrappers for domain modeling.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Error returned when a string cannot be normalized into a [`LocaleCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid locale code: {0:?}")]
pub struct InvalidLocaleCode(pub String);

/// A normalized locale identifier of the form `language` or `language_REGION`.
///
/// Both `-` and `_` are accepted as separators on input; the stored form
/// always uses `_`, a lowercase language and an uppercase region
/// (`fr-fr` becomes `fr_FR`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Normalizes a raw code. Returns `None` for empty input, more than two
    /// parts, or parts containing anything other than ASCII alphanumerics.
    pub fn normalize(raw: &str) -> Option<Self> {
        let raw = raw.trim().replace('-', "_");
        let parts: Vec<&str> = raw.split('_').collect();

        let valid = |part: &&str| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric());
        if !parts.iter().all(valid) {
            return None;
        }

        match parts.as_slice() {
            [language] => Some(Self(language.to_ascii_lowercase())),
            [language, region] => Some(Self(format!(
                "{}_{}",
                language.to_ascii_lowercase(),
                region.to_ascii_uppercase()
            ))),
            _ => None,
        }
    }

    /// The full code, e.g. `fr_FR`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language part, e.g. `fr` for `fr_FR`.
    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }

    /// The region part, if any.
    pub fn region(&self) -> Option<&str> {
        self.0.split_once('_').map(|(_, region)| region)
    }

    /// A code consisting of only this code's language.
    #[must_use]
    pub fn language_only(&self) -> Self {
        Self(self.language().to_string())
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleCode {
    type Err = InvalidLocaleCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| InvalidLocaleCode(s.to_string()))
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_casing_and_separator() {
        assert_eq!(LocaleCode::normalize("fr-fr").unwrap().as_str(), "fr_FR");
        assert_eq!(LocaleCode::normalize("EN_us").unwrap().as_str(), "en_US");
        assert_eq!(LocaleCode::normalize(" de ").unwrap().as_str(), "de");
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        assert!(LocaleCode::normalize("").is_none());
        assert!(LocaleCode::normalize("zh_Hant_TW").is_none());
        assert!(LocaleCode::normalize("fr_").is_none());
        assert!(LocaleCode::normalize("e n").is_none());
    }

    #[test]
    fn test_parts() {
        let code: LocaleCode = "pt-br".parse().unwrap();
        assert_eq!(code.language(), "pt");
        assert_eq!(code.region(), Some("BR"));
        assert_eq!(code.language_only().as_str(), "pt");
        assert_eq!(code.to_string(), "pt_BR");

        let bare: LocaleCode = "ja".parse().unwrap();
        assert_eq!(bare.region(), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "a_b_c".parse::<LocaleCode>().unwrap_err();
        assert_eq!(err, InvalidLocaleCode("a_b_c".to_string()));
    }
}
