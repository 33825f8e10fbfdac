//! Locales and translation lookup

use crate::catalog::{literal, Catalog, Resolution};
use crate::descriptor::descriptor;
use crate::plural::PluralRule;
use parlance_common::LocaleCode;
use std::sync::Arc;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Monday first, matching `chrono::Weekday::num_days_from_monday`.
const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One resolved locale: its catalog (if any) and the name tables the
/// formatters use. Built once per code by the registry and shared.
#[derive(Debug)]
pub struct Locale {
    code: LocaleCode,
    name: String,
    name_en: String,
    rtl: bool,
    catalog: Option<Arc<Catalog>>,
    plural_rule: PluralRule,
    pub(crate) months: [String; 12],
    pub(crate) weekdays: [String; 7],
}

impl Locale {
    /// Builds a locale. Month and weekday names are translated through the
    /// catalog here, once.
    pub fn new(code: LocaleCode, catalog: Option<Catalog>) -> Self {
        let (name, name_en) = descriptor(code.as_str())
            .map_or(("Unknown", "Unknown"), |d| (d.name, d.name_en));
        let plural_rule = catalog
            .as_ref()
            .map_or_else(|| PluralRule::for_language(code.language()), |c| c.plural_rule().clone());
        let rtl = matches!(code.language(), "ar" | "fa" | "he");

        let mut locale = Self {
            code,
            name: name.to_string(),
            name_en: name_en.to_string(),
            rtl,
            catalog: catalog.map(Arc::new),
            plural_rule,
            months: Default::default(),
            weekdays: Default::default(),
        };
        locale.months = MONTHS.map(|month| locale.translate(month));
        locale.weekdays = WEEKDAYS.map(|day| locale.translate(day));
        locale
    }

    /// The normalized code this locale was resolved to.
    pub fn code(&self) -> &LocaleCode {
        &self.code
    }

    /// Display name in the locale's own language.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name in English.
    pub fn name_en(&self) -> &str {
        &self.name_en
    }

    /// Whether the language is written right to left.
    pub fn rtl(&self) -> bool {
        self.rtl
    }

    /// The loaded catalog, or `None` when messages pass through untranslated.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    /// Rule used for plural lookups in this locale.
    pub fn plural_rule(&self) -> &PluralRule {
        &self.plural_rule
    }

    /// Translated month names, January first.
    pub fn months(&self) -> &[String; 12] {
        &self.months
    }

    /// Translated weekday names, Monday first.
    pub fn weekdays(&self) -> &[String; 7] {
        &self.weekdays
    }

    /// Resolves a message and reports which tier answered.
    pub fn resolve<'a>(
        &'a self,
        context: Option<&str>,
        singular: &'a str,
        plural: Option<(&'a str, i64)>,
    ) -> Resolution<'a> {
        match &self.catalog {
            Some(catalog) => catalog.resolve(context, singular, plural),
            None => Resolution::Literal(literal(singular, plural)),
        }
    }

    /// Translates `message`, returning it unchanged when untranslated.
    pub fn translate(&self, message: &str) -> String {
        self.resolve(None, message, None).as_str().to_string()
    }

    /// Translates a count-dependent message using this locale's plural rule.
    pub fn translate_plural(&self, singular: &str, plural: &str, count: i64) -> String {
        self.resolve(None, singular, Some((plural, count)))
            .as_str()
            .to_string()
    }

    /// Translates `message` under a disambiguating `context`, falling back
    /// to the context-less entry and then to the message itself.
    pub fn context_translate(&self, context: &str, message: &str) -> String {
        self.resolve(Some(context), message, None).as_str().to_string()
    }

    /// Context-qualified, count-dependent translation.
    pub fn context_translate_plural(
        &self,
        context: &str,
        singular: &str,
        plural: &str,
        count: i64,
    ) -> String {
        self.resolve(Some(context), singular, Some((plural, count)))
            .as_str()
            .to_string()
    }
}
