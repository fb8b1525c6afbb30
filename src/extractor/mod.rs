//! Article identifier extraction.
//!
//! The provider's URL scheme differs between editorials, news and other
//! content. IDs are pulled out of a URL by trying an ordered table of rules,
//! most specific first; the first rule that matches wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalizer::text::compile_pattern;

/// One step of the extraction cascade.
struct IdRule {
    name: &'static str,
    pattern: Regex,
}

impl IdRule {
    fn capture(&self, url: &str) -> Option<String> {
        self.pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Rule sources in priority order.
const RULE_SOURCES: [(&str, &str); 5] = [
    ("numeric", r"^([0-9]+)$"),
    ("editorial", r"editorial/[^/?#]*-([0-9]+)(?:[?#]|$)"),
    ("noticia", r"noticia/[^/?#]*-([0-9]+)(?:[?#]|$)"),
    ("path-segment", r"/([0-9]+)(?:[?#]|$)"),
    // Six digits minimum keeps short counters inside slugs from matching.
    ("long-suffix", r"-([0-9]{6,})(?:[?#]|$)"),
];

static RULES: LazyLock<Vec<IdRule>> = LazyLock::new(|| {
    RULE_SOURCES
        .iter()
        .filter_map(|&(name, source)| {
            compile_pattern(name, source).map(|pattern| IdRule { name, pattern })
        })
        .collect()
});

/// Extract the article ID from a URL (or a bare numeric ID).
///
/// Total over all inputs: returns `None` for empty input or when no rule
/// matches.
pub fn extract_article_id(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }

    RULES.iter().find_map(|rule| {
        let id = rule.capture(url)?;
        tracing::trace!(rule = rule.name, %url, %id, "Extracted article ID");
        Some(id)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_compile() {
        assert_eq!(RULES.len(), RULE_SOURCES.len());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_article_id(""), None);
    }

    #[test]
    fn test_numeric_id_passes_through() {
        assert_eq!(extract_article_id("12345"), Some("12345".into()));
    }

    #[test]
    fn test_editorial_url() {
        assert_eq!(
            extract_article_id("https://www.publico.pt/2024/05/01/opiniao/editorial/some-slug-987654"),
            Some("987654".into())
        );
        assert_eq!(
            extract_article_id("https://www.publico.pt/editorial/short-12?utm=x"),
            Some("12".into())
        );
    }

    #[test]
    fn test_noticia_url() {
        assert_eq!(
            extract_article_id("https://www.publico.pt/2024/01/02/politica/noticia/other-slug-42"),
            Some("42".into())
        );
        assert_eq!(
            extract_article_id("https://www.publico.pt/noticia/governo-anuncia-2075123#comentarios"),
            Some("2075123".into())
        );
    }

    #[test]
    fn test_trailing_numeric_segment() {
        assert_eq!(extract_article_id("https://www.publico.pt/content/999?x=1"), Some("999".into()));
        assert_eq!(extract_article_id("https://www.publico.pt/content/999"), Some("999".into()));
    }

    #[test]
    fn test_long_suffix_fallback() {
        assert_eq!(
            extract_article_id("https://www.publico.pt/p3/campanha-verao-123456#top"),
            Some("123456".into())
        );
    }

    #[test]
    fn test_short_suffix_has_no_match() {
        assert_eq!(extract_article_id("https://www.publico.pt/p3/campanha-verao-123#top"), None);
        assert_eq!(extract_article_id("https://www.publico.pt/sobre"), None);
    }

    #[test]
    fn test_specific_rules_win_over_generic() {
        // Both the noticia rule and the long-suffix rule would match here.
        assert_eq!(
            extract_article_id("https://www.publico.pt/noticia/slug-1234567"),
            Some("1234567".into())
        );
        // A numeric segment earlier in the path is not a trailing segment.
        assert_eq!(
            extract_article_id("https://www.publico.pt/2024/01/02/mundo/noticia/cimeira-2075001"),
            Some("2075001".into())
        );
    }

    #[test]
    fn test_only_ascii_digits_count() {
        assert_eq!(extract_article_id("١٢٣"), None);
        assert_eq!(extract_article_id("https://www.publico.pt/noticia/slug-١٢٣"), None);
        assert_eq!(extract_article_id("https://www.publico.pt/content/٤٥٦٧٨٩"), None);
    }

    #[test]
    fn test_deterministic() {
        let url = "https://www.publico.pt/noticia/a-b-c-55";
        assert_eq!(extract_article_id(url), extract_article_id(url));
        assert_eq!(extract_article_id(url), Some("55".into()));
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        for input in ["-", "/", "?#", "noticia/-", "editorial/", "ção-1234567", "\u{0}"] {
            let _ = extract_article_id(input);
        }
    }
}
