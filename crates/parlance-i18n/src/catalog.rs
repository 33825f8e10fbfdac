//! In-memory translation catalogs
//!
//! Both loaders produce the same [`Catalog`] shape, so lookup is independent
//! of the on-disk format. Entries are keyed the way compiled catalogs key
//! them: `context \x04 singular` when a context is present, the bare
//! singular otherwise.

use crate::plural::PluralRule;
use parlance_common::LocaleCode;
use parlance_config::CatalogFormat;
use std::collections::HashMap;

/// Separator between context and message in compiled catalogs.
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// Identifies one message: an optional disambiguating context plus the
/// source (singular) text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey {
    /// Disambiguating context, if any.
    pub context: Option<String>,
    /// Source text.
    pub singular: String,
}

impl MessageKey {
    /// A context-less key.
    pub fn new(singular: impl Into<String>) -> Self {
        Self {
            context: None,
            singular: singular.into(),
        }
    }

    /// A context-qualified key.
    pub fn with_context(context: impl Into<String>, singular: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            singular: singular.into(),
        }
    }

    fn encoded(&self) -> String {
        encode(self.context.as_deref(), &self.singular)
    }
}

fn encode(context: Option<&str>, singular: &str) -> String {
    match context {
        Some(context) => format!("{context}{CONTEXT_SEPARATOR}{singular}"),
        None => singular.to_string(),
    }
}

/// The translated forms of one message. Form 0 always exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderings {
    forms: Vec<String>,
    plural_source: Option<String>,
}

impl Renderings {
    /// A single, non-plural translation.
    pub fn singular(translation: impl Into<String>) -> Self {
        Self {
            forms: vec![translation.into()],
            plural_source: None,
        }
    }

    /// A plural-aware translation. Returns `None` when `forms` is empty.
    pub fn plural(plural_source: impl Into<String>, forms: Vec<String>) -> Option<Self> {
        if forms.is_empty() {
            return None;
        }
        Some(Self {
            forms,
            plural_source: Some(plural_source.into()),
        })
    }

    /// A singular and a "more than one" translation with no recorded
    /// plural source text, as delimited-text rows declare them.
    pub fn counted(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            forms: vec![singular.into(), plural.into()],
            plural_source: None,
        }
    }

    /// Whether this entry has count-dependent forms.
    pub fn is_plural(&self) -> bool {
        self.plural_source.is_some() || self.forms.len() > 1
    }

    /// The source plural text, for plural entries.
    pub fn plural_source(&self) -> Option<&str> {
        self.plural_source.as_deref()
    }

    /// The form at `index`, if the catalog provided one.
    pub fn form(&self, index: usize) -> Option<&str> {
        self.forms.get(index).map(String::as_str)
    }

    /// Form 0.
    pub fn default_form(&self) -> &str {
        &self.forms[0]
    }

    /// All forms in index order.
    pub fn forms(&self) -> &[String] {
        &self.forms
    }
}

/// Which lookup tier produced a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Found under the supplied context.
    Contextual(&'a str),
    /// Found without context.
    Plain(&'a str),
    /// Not translated; the source text is returned.
    Literal(&'a str),
}

impl<'a> Resolution<'a> {
    /// The resolved text.
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Contextual(text) | Self::Plain(text) | Self::Literal(text) => text,
        }
    }

    /// Whether a catalog entry was used.
    pub fn is_translated(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

/// Picks the source text for an untranslated message: English-style
/// binary plurals regardless of the target language.
pub(crate) fn literal<'a>(singular: &'a str, plural: Option<(&'a str, i64)>) -> &'a str {
    match plural {
        Some((plural, count)) if count != 1 => plural,
        _ => singular,
    }
}

/// Translations for exactly one locale. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Catalog {
    code: LocaleCode,
    format: CatalogFormat,
    plural_rule: PluralRule,
    entries: HashMap<String, Renderings>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new(code: LocaleCode, format: CatalogFormat, plural_rule: PluralRule) -> Self {
        Self {
            code,
            format,
            plural_rule,
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces an entry, returning the previous one.
    pub fn insert(&mut self, key: &MessageKey, renderings: Renderings) -> Option<Renderings> {
        self.entries.insert(key.encoded(), renderings)
    }

    /// Looks up one entry.
    pub fn get(&self, context: Option<&str>, singular: &str) -> Option<&Renderings> {
        match context {
            Some(_) => self.entries.get(&encode(context, singular)),
            None => self.entries.get(singular),
        }
    }

    /// The locale these translations belong to.
    pub fn code(&self) -> &LocaleCode {
        &self.code
    }

    /// Which on-disk format the catalog was read from.
    pub fn format(&self) -> CatalogFormat {
        self.format
    }

    /// Rule mapping a count to a form index.
    pub fn plural_rule(&self) -> &PluralRule {
        &self.plural_rule
    }

    pub(crate) fn set_plural_rule(&mut self, rule: PluralRule) {
        self.plural_rule = rule;
    }

    /// Number of entries, contextual ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a message through the lookup tiers.
    ///
    /// With a plural `(text, count)`, plural-aware entries are consulted
    /// first using this catalog's plural rule: under `context`, then without
    /// it. Failing that, the source text chosen by English-style binary
    /// plurals is looked up as an ordinary entry (delimited-text catalogs
    /// key their plural rows this way), again contextual first. Without a
    /// plural, form 0 of the contextual then the plain entry is used.
    pub fn resolve<'a>(
        &'a self,
        context: Option<&str>,
        singular: &'a str,
        plural: Option<(&'a str, i64)>,
    ) -> Resolution<'a> {
        if let Some((_, count)) = plural {
            let index = self.plural_rule.select(count);
            let plural_form = |ctx: Option<&str>| {
                self.get(ctx, singular)
                    .filter(|entry| entry.is_plural())
                    .and_then(|entry| entry.form(index))
            };

            if context.is_some() {
                if let Some(text) = plural_form(context) {
                    return Resolution::Contextual(text);
                }
            }
            if let Some(text) = plural_form(None) {
                return Resolution::Plain(text);
            }
        }

        let source = literal(singular, plural);
        if context.is_some() {
            if let Some(entry) = self.get(context, source) {
                return Resolution::Contextual(entry.default_form());
            }
        }
        match self.get(None, source) {
            Some(entry) => Resolution::Plain(entry.default_form()),
            None => Resolution::Literal(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn french() -> Catalog {
        let code: LocaleCode = "fr_FR".parse().unwrap();
        let mut catalog = Catalog::new(code, CatalogFormat::Gettext, PluralRule::for_language("fr"));
        catalog.insert(&MessageKey::new("school"), Renderings::singular("\u{e9}cole"));
        catalog.insert(&MessageKey::with_context("law", "right"), Renderings::singular("le droit"));
        catalog.insert(&MessageKey::with_context("good", "right"), Renderings::singular("le bien"));
        catalog.insert(
            &MessageKey::with_context("organization", "club"),
            Renderings::plural("clubs", vec!["le club".into(), "les clubs".into()]).unwrap(),
        );
        catalog.insert(
            &MessageKey::new("club"),
            Renderings::plural("clubs", vec!["un club".into(), "des clubs".into()]).unwrap(),
        );
        catalog
    }

    #[test]
    fn test_plain_lookup() {
        let catalog = french();
        assert_eq!(catalog.resolve(None, "school", None), Resolution::Plain("\u{e9}cole"));
        assert_eq!(catalog.resolve(None, "library", None), Resolution::Literal("library"));
    }

    #[test]
    fn test_contextual_lookup_tiers() {
        let catalog = french();
        assert_eq!(catalog.resolve(Some("law"), "right", None), Resolution::Contextual("le droit"));
        assert_eq!(catalog.resolve(Some("good"), "right", None), Resolution::Contextual("le bien"));
        // falls back to the context-less entry
        assert_eq!(catalog.resolve(Some("grammar"), "school", None), Resolution::Plain("\u{e9}cole"));
        assert_eq!(catalog.resolve(Some("direction"), "right", None), Resolution::Literal("right"));
    }

    #[test]
    fn test_plural_uses_catalog_rule() {
        let catalog = french();
        let resolve = |count| catalog.resolve(Some("organization"), "club", Some(("clubs", count)));
        assert_eq!(resolve(0), Resolution::Contextual("le club"));
        assert_eq!(resolve(1), Resolution::Contextual("le club"));
        assert_eq!(resolve(2), Resolution::Contextual("les clubs"));
        assert_eq!(
            catalog.resolve(Some("golf"), "club", Some(("clubs", 3))),
            Resolution::Plain("des clubs")
        );
    }

    #[test]
    fn test_untranslated_plural_is_binary() {
        let catalog = french();
        assert_eq!(catalog.resolve(None, "cat", Some(("cats", 1))), Resolution::Literal("cat"));
        assert_eq!(catalog.resolve(None, "cat", Some(("cats", 0))), Resolution::Literal("cats"));
    }

    #[test]
    fn test_renderings_require_a_form() {
        assert!(Renderings::plural("clubs", Vec::new()).is_none());
        let entry = Renderings::singular("x");
        assert!(!entry.is_plural());
        assert_eq!(entry.form(1), None);
        assert_eq!(entry.default_form(), "x");
    }
}
