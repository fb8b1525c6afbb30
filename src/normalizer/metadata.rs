use crate::domain::fields::OBJECT_TOKEN;
use crate::domain::{Article, AuthorEntry, Authors, Icon, Media, TagEntry, Tags};

use super::DEFAULT_METADATA_PLACEHOLDER;

/// Values that show up as tags when the provider stringifies missing data.
const JUNK_TAGS: [&str; 3] = ["undefined", "null", OBJECT_TOKEN];

/// Comma-joined author names, or the placeholder when there are none.
pub fn format_authors(authors: &Authors) -> String {
    let joined = match authors {
        Authors::Missing => None,
        Authors::Single(entry) => entry
            .display_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        Authors::Many(entries) => {
            let names: Vec<&str> = entries
                .iter()
                .filter_map(AuthorEntry::display_name)
                .filter(|name| !name.is_empty())
                .collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
    };

    joined.unwrap_or_else(|| DEFAULT_METADATA_PLACEHOLDER.to_string())
}

fn is_meaningful_tag(tag: &str) -> bool {
    !tag.trim().is_empty() && !JUNK_TAGS.contains(&tag)
}

/// Tag labels with empty and junk entries removed.
pub fn extract_tags(tags: &Tags) -> Vec<String> {
    match tags {
        Tags::Missing => Vec::new(),
        Tags::Single(entry) => {
            let label = entry.label();
            if is_meaningful_tag(&label) {
                vec![label]
            } else {
                Vec::new()
            }
        }
        Tags::Many(entries) => entries
            .iter()
            .map(TagEntry::label)
            .filter(|label| is_meaningful_tag(label))
            .collect(),
    }
}

fn non_empty(src: &Option<String>) -> Option<&str> {
    src.as_deref().filter(|s| !s.is_empty())
}

/// Icon for an article: main media first (bare URL, then object `src`),
/// then the `imagem` object, then the globe marker.
pub fn resolve_icon(article: &Article) -> Icon {
    let main = match &article.main_media {
        Some(Media::Url(url)) if !url.is_empty() => Some(url.as_str()),
        Some(Media::Object { src }) => non_empty(src),
        _ => None,
    };

    let image = match &article.image {
        Some(Media::Object { src }) => non_empty(src),
        _ => None,
    };

    main.or(image)
        .map(|src| Icon::Image(src.to_string()))
        .unwrap_or(Icon::Globe)
}
