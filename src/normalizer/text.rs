use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

use super::UNTITLED_ARTICLE;

/// Compile a fixed pattern, logging instead of panicking if it is invalid.
pub(crate) fn compile_pattern(name: &'static str, source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!(pattern = name, error = %e, "Invalid pattern");
            None
        }
    }
}

static MARKUP: LazyLock<Option<Regex>> = LazyLock::new(|| compile_pattern("markup", r"<[^>]*>"));

/// Leading "há N horas ..." labels. The first pattern also accepts the
/// mojibake form of "há" that shows up in some payloads.
static RELATIVE_TIME_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        (
            "relative-time",
            r"(?i)^(há|hÃ¡)\s+[0-9]+\s+(horas?|dias?|semanas?|meses?)(?:\s*\.{3}|\s+\.\.\.|…)\s*",
        ),
        (
            "relative-time-plain",
            r"(?i)^h[aá]\s+[0-9]+\s+(?:horas?|dias?|semanas?|meses?)(?:\s*\.{3}|\s+\.\.\.|…)\s*",
        ),
    ]
    .into_iter()
    .filter_map(|(name, source)| compile_pattern(name, source))
    .collect()
});

/// Drop every `<...>` tag, then decode HTML entities.
///
/// Encoded brackets (`&lt;`, `&gt;`) survive as literal text.
pub fn strip_markup(text: &str) -> String {
    let stripped = match MARKUP.as_ref() {
        Some(re) => re.replace_all(text, ""),
        None => std::borrow::Cow::Borrowed(text),
    };
    decode_html_entities(&stripped).into_owned()
}

/// Markup-free title, or the untitled placeholder.
pub fn display_title(title: Option<&str>) -> String {
    let cleaned = strip_markup(title.unwrap_or(""));
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        UNTITLED_ARTICLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Remove one leading relative-time label ("há 3 horas ...") from a summary.
pub fn clean_summary(description: Option<&str>) -> String {
    let Some(text) = description.filter(|d| !d.is_empty()) else {
        return String::new();
    };

    for pattern in RELATIVE_TIME_PREFIXES.iter() {
        if let Some(found) = pattern.find(text) {
            return text[found.end()..].to_string();
        }
    }

    text.to_string()
}
