//! Payload normalization.
//!
//! Every function here is total: malformed or missing fields resolve to a
//! placeholder or an empty value instead of an error.

pub mod date;
pub mod metadata;
pub mod text;
pub mod url;

pub use date::{format_timestamp, resolve_date, DEFAULT_DATE_FORMAT};
pub use metadata::{extract_tags, format_authors, resolve_icon};
pub use text::{clean_summary, display_title, strip_markup};
pub use self::url::{repair_url, resolve_url, SITE_URL};

use crate::domain::{Article, ArticleView};
use crate::extractor::extract_article_id;

pub const DEFAULT_METADATA_PLACEHOLDER: &str = "Not available";
pub const UNKNOWN_DATE_PLACEHOLDER: &str = DEFAULT_METADATA_PLACEHOLDER;
pub const UNTITLED_ARTICLE: &str = "Untitled";

#[derive(Debug, Clone)]
pub struct Normalizer {
    date_format: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_date_format(DEFAULT_DATE_FORMAT)
    }

    pub fn with_date_format(format: &str) -> Self {
        Self {
            date_format: format.to_string(),
        }
    }

    pub fn normalize(&self, article: &Article) -> ArticleView {
        self.normalize_with_overlay(article, None)
    }

    /// Normalize a list entry, letting an enrichment record override the
    /// authors, tags, summary, date and content. Title, URL and icon always
    /// come from the base entry.
    pub fn normalize_with_overlay(&self, base: &Article, overlay: Option<&Article>) -> ArticleView {
        let url = resolve_url(base);
        let id = extract_article_id(&url).or_else(|| base.id.map(|id| id.to_string()));

        let authors = overlay
            .map(|o| &o.authors)
            .filter(|a| !a.is_missing())
            .unwrap_or(&base.authors);
        let tags = overlay
            .map(|o| &o.tags)
            .filter(|t| !t.is_missing())
            .unwrap_or(&base.tags);
        let description = overlay
            .and_then(|o| o.description.as_deref())
            .or(base.description.as_deref());
        let lead = overlay
            .and_then(|o| o.lead.as_deref())
            .or(base.lead.as_deref());
        let body = overlay
            .and_then(|o| o.body.as_deref().or(o.text.as_deref()))
            .or(base.body.as_deref())
            .or(base.text.as_deref());
        let section = overlay
            .and_then(|o| o.section.as_deref())
            .or(base.section.as_deref());

        ArticleView {
            id,
            title: display_title(base.title.as_deref()),
            url,
            authors: format_authors(authors),
            tags: extract_tags(tags),
            summary: clean_summary(description),
            published: resolve_date(overlay.unwrap_or(base), &self.date_format),
            icon: resolve_icon(base),
            section: section.map(String::from),
            lead: lead.map(|l| strip_markup(l).trim().to_string()).filter(|l| !l.is_empty()),
            body: body.map(strip_markup),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Icon;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Article {
        Article::from_value(&value).unwrap()
    }

    #[test]
    fn test_normalize_list_entry() {
        let article = decode(json!({
            "id": 2075123,
            "titulo": "<b>Governo</b> anuncia medidas",
            "url": "https://www.publico.pthttps//www.publico.pt/2024/01/02/politica/noticia/governo-anuncia-2075123",
            "descricao": "há 3 horas ... Governo anuncia",
            "data": "2024-01-02T10:15:00",
            "autores": {"nome": "Ana"},
            "tags": ["Política", "undefined"]
        }));

        let view = Normalizer::new().normalize(&article);
        assert_eq!(view.id.as_deref(), Some("2075123"));
        assert_eq!(view.title, "Governo anuncia medidas");
        assert_eq!(
            view.url,
            "https://www.publico.pt/2024/01/02/politica/noticia/governo-anuncia-2075123"
        );
        assert_eq!(view.authors, "Ana");
        assert_eq!(view.tags, vec!["Política"]);
        assert_eq!(view.summary, "Governo anuncia");
        assert_eq!(view.published, "02/01/2024 10:15");
        assert_eq!(view.icon, Icon::Globe);
    }

    #[test]
    fn test_empty_payload_uses_placeholders() {
        let view = Normalizer::new().normalize(&Article::default());
        assert_eq!(view.id, None);
        assert_eq!(view.title, UNTITLED_ARTICLE);
        assert_eq!(view.url, SITE_URL);
        assert_eq!(view.authors, DEFAULT_METADATA_PLACEHOLDER);
        assert!(view.tags.is_empty());
        assert_eq!(view.summary, "");
        assert_eq!(view.published, UNKNOWN_DATE_PLACEHOLDER);
        assert_eq!(view.icon, Icon::Globe);
        assert!(!view.has_body());
    }

    #[test]
    fn test_id_falls_back_to_url() {
        let article = decode(json!({"url": "/2024/01/02/mundo/noticia/cimeira-2075001"}));
        let view = Normalizer::new().normalize(&article);
        assert_eq!(view.id.as_deref(), Some("2075001"));
    }

    #[test]
    fn test_url_id_wins_over_payload_id() {
        let article = decode(json!({"id": 1, "url": "/2024/01/02/mundo/noticia/cimeira-2075001"}));
        let view = Normalizer::new().normalize(&article);
        assert_eq!(view.id.as_deref(), Some("2075001"));
    }

    #[test]
    fn test_payload_id_when_url_has_none() {
        let article = decode(json!({"id": 42, "url": "/sobre"}));
        let view = Normalizer::new().normalize(&article);
        assert_eq!(view.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_overlay_overrides_metadata_only() {
        let base = decode(json!({
            "titulo": "Base",
            "url": "/noticia/base-100",
            "descricao": "Resumo curto",
            "autores": [],
            "multimediaPrincipal": "https://img/base.jpg"
        }));
        let overlay = decode(json!({
            "titulo": "Detalhe",
            "url": "/noticia/outro-200",
            "descricao": "há 2 dias ... Resumo completo",
            "autores": [{"nome": "Rui"}],
            "tags": [{"name": "Economia"}],
            "data": "2024-02-01T09:00:00",
            "lead": "<p>Entrada</p>",
            "body": "<p>Corpo</p>"
        }));

        let view = Normalizer::new().normalize_with_overlay(&base, Some(&overlay));
        assert_eq!(view.title, "Base");
        assert_eq!(view.url, "https://www.publico.pt/noticia/base-100");
        assert_eq!(view.icon, Icon::Image("https://img/base.jpg".into()));
        assert_eq!(view.authors, "Rui");
        assert_eq!(view.tags, vec!["Economia"]);
        assert_eq!(view.summary, "Resumo completo");
        assert_eq!(view.published, "01/02/2024 09:00");
        assert_eq!(view.lead.as_deref(), Some("Entrada"));
        assert_eq!(view.body.as_deref(), Some("Corpo"));
    }

    #[test]
    fn test_overlay_missing_fields_keep_base() {
        let base = decode(json!({
            "titulo": "Base",
            "descricao": "Resumo",
            "autores": {"nome": "Ana"},
            "tags": "Cultura"
        }));
        let overlay = decode(json!({"id": 5}));

        let view = Normalizer::new().normalize_with_overlay(&base, Some(&overlay));
        assert_eq!(view.authors, "Ana");
        assert_eq!(view.tags, vec!["Cultura"]);
        assert_eq!(view.summary, "Resumo");
        // The date comes from the enrichment record as a whole.
        assert_eq!(view.published, UNKNOWN_DATE_PLACEHOLDER);
    }

    #[test]
    fn test_custom_date_format() {
        let article = decode(json!({"data": "2024-01-02T10:15:00"}));
        let view = Normalizer::with_date_format("%Y-%m-%d").normalize(&article);
        assert_eq!(view.published, "2024-01-02");
    }

    #[test]
    fn test_normalize_deterministic() {
        let article = decode(json!({"titulo": "x", "url": "/a-123456", "tags": ["t"]}));
        let normalizer = Normalizer::new();
        assert_eq!(normalizer.normalize(&article), normalizer.normalize(&article));
    }
}
