use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "source", rename_all = "lowercase")]
pub enum Icon {
    /// Remote image URL.
    Image(String),
    /// Generic globe marker.
    Globe,
}

/// Fixed-shape, display-ready view of an article.
///
/// Every string field is present; placeholders stand in for missing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
    /// Identifier extracted from the canonical URL, or the payload `id` when
    /// the URL carries none. Keys detail lookups and the enrichment cache.
    pub id: Option<String>,
    pub title: String,
    pub url: String,
    pub authors: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub published: String,
    pub icon: Icon,
    pub section: Option<String>,
    /// Markup-stripped lead, when the payload carries one.
    pub lead: Option<String>,
    /// Markup-stripped body, when the payload carries one.
    pub body: Option<String>,
}

impl ArticleView {
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.trim().is_empty())
    }
}
