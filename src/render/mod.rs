//! Text and markdown presentation of normalized articles.

use crate::domain::ArticleView;
use crate::normalizer::DEFAULT_METADATA_PLACEHOLDER;

pub const SUMMARY_PLACEHOLDER: &str = "No summary available.";
pub const NO_ARTICLE_ID_MESSAGE: &str = "Could not extract article ID from URL";
pub const DETAILS_UNAVAILABLE_MESSAGE: &str = "Article details are not available right now";

const WEBSITE_ONLY_NOTICE: &str = "To read the full article, please open it in the browser.\n\n\
     The full content of this article is only available on the Público website.";

/// State of the full-article view.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticlePage {
    Loading { title: String },
    Ready(ArticleView),
    Error(String),
}

impl ArticlePage {
    pub fn load_error(err: &impl std::fmt::Display) -> Self {
        ArticlePage::Error(format!("Error loading article: {}", err))
    }
}

/// One entry of a headline list, with a 1-based index.
pub fn list_line(index: usize, view: &ArticleView) -> String {
    format!(
        "{:>3}. {}\n     {} • {}\n     {}",
        index + 1,
        view.title,
        view.published,
        view.authors,
        view.url
    )
}

/// The tags displayed for an article, capped at `max_tags`.
pub fn visible_tags(view: &ArticleView, max_tags: usize) -> &[String] {
    &view.tags[..view.tags.len().min(max_tags)]
}

/// Side-panel markdown for a list entry: title, summary and metadata.
pub fn list_detail_markdown(view: &ArticleView, max_tags: usize) -> String {
    let summary = if view.summary.is_empty() {
        SUMMARY_PLACEHOLDER
    } else {
        &view.summary
    };

    let tags = visible_tags(view, max_tags);
    let keywords = if tags.is_empty() {
        DEFAULT_METADATA_PLACEHOLDER.to_string()
    } else {
        tags.join(", ")
    };

    format!(
        "# {}\n\n---\n\n{}\n\n**Author:** {}\n**Published:** {}\n**Keywords:** {}\n",
        view.title, summary, view.authors, view.published, keywords
    )
}

/// Full-article markdown.
pub fn article_markdown(page: &ArticlePage) -> String {
    let view = match page {
        ArticlePage::Error(message) => return format!("# Error\n\n{}", message),
        ArticlePage::Loading { title } => {
            return format!("# {}\n\nLoading article preview...", title)
        }
        ArticlePage::Ready(view) => view,
    };

    let mut out = match &view.section {
        Some(section) => format!(
            "# {}\n\n*{} • {} • {}*\n\n",
            view.title, section, view.authors, view.published
        ),
        None => format!("# {}\n\n*{} • {}*\n\n", view.title, view.authors, view.published),
    };

    if let Some(lead) = &view.lead {
        out.push_str(&format!("**{}**\n\n", lead));
    }

    match &view.body {
        Some(body) if view.has_body() => out.push_str(body),
        _ => out.push_str(WEBSITE_ONLY_NOTICE),
    }
    out.push('\n');
    out
}
