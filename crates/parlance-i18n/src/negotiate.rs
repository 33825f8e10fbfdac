//! `Accept-Language` header parsing

use accept_language::parse_with_quality;

/// One language range from an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Language range as sent, e.g. `de-DE`.
    pub tag: String,
    /// Weight in `(0, 1]`.
    pub quality: f64,
}

/// Parses an `Accept-Language` value into ranges ordered by descending
/// quality. Ties keep header order. Wildcards and ranges whose weight is
/// zero, negative or not a finite number are dropped.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = parse_with_quality(header)
        .into_iter()
        .map(|(tag, quality)| LanguagePreference {
            tag,
            quality: f64::from(quality),
        })
        .filter(|p| !p.tag.is_empty() && p.tag != "*" && p.quality.is_finite() && p.quality > 0.0)
        .collect();

    // every weight is finite here, so the order is total
    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    preferences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(header: &str) -> Vec<String> {
        parse_accept_language(header)
            .into_iter()
            .map(|p| p.tag.to_ascii_lowercase())
            .collect()
    }

    #[test]
    fn test_orders_by_quality() {
        assert_eq!(tags("fr;q=0.5, de-DE, en;q=0.8"), vec!["de-de", "en", "fr"]);
    }

    #[test]
    fn test_ties_keep_header_order() {
        assert_eq!(tags("es, pt-BR, en"), vec!["es", "pt-br", "en"]);
    }

    #[test]
    fn test_unusable_weights_are_dropped() {
        assert_eq!(tags("ja;q=nan, de-DE;q=0.9"), vec!["de-de"]);
        assert_eq!(tags("ja;q=0, ko;q=0.1"), vec!["ko"]);
    }

    #[test]
    fn test_skips_wildcards_and_blanks() {
        assert_eq!(tags("*, , en-US;q=0.9"), vec!["en-us"]);
        assert!(parse_accept_language("").is_empty());
    }
}
