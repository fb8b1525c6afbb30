use crate::domain::Article;

/// Root of the provider's website; the fallback for any missing URL.
pub const SITE_URL: &str = "https://www.publico.pt";

const SITE_DOMAIN: &str = "publico.pt";

/// Known malformed prefixes and their replacement, applied in order, each at
/// most once.
const SCHEME_REPAIRS: [(&str, &str); 3] = [
    ("https://www.publico.pthttps//", "https://"),
    ("https://www.publico.pthttps/", "https://"),
    ("https//", "https://"),
];

/// Canonical URL of an article: `fullUrl` when set, otherwise the repaired `url`.
pub fn resolve_url(article: &Article) -> String {
    match article.full_url.as_deref() {
        Some(full) if !full.is_empty() => full.to_string(),
        _ => repair_url(article.url.as_deref().unwrap_or("")),
    }
}

/// Repair a raw article URL.
///
/// Inputs that match none of the known malformations pass through unchanged,
/// except relative paths, which are anchored at [`SITE_URL`].
pub fn repair_url(raw: &str) -> String {
    if raw.is_empty() {
        return SITE_URL.to_string();
    }

    let mut fixed = raw.to_string();
    for (broken, replacement) in SCHEME_REPAIRS {
        fixed = fixed.replacen(broken, replacement, 1);
    }

    if !fixed.contains(SITE_DOMAIN) && !fixed.starts_with("http") {
        let separator = if fixed.starts_with('/') { "" } else { "/" };
        fixed = format!("{SITE_URL}{separator}{fixed}");
    }

    fixed
}
