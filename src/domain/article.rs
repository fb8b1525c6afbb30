use serde_json::{Map, Value};

use crate::domain::fields::{string_key, Authors, Media, Tags};

/// An article as received from the provider, validated field by field.
///
/// Every field is optional: the wire shape is never trusted to match what the
/// API documents. Field names are English; the wire keys are noted per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Article {
    /// `id`
    pub id: Option<i64>,
    /// `titulo`
    pub title: Option<String>,
    /// `url`, possibly malformed
    pub url: Option<String>,
    /// `fullUrl`
    pub full_url: Option<String>,
    /// `descricao`, usually prefixed with a relative-time label
    pub description: Option<String>,
    /// `lead`
    pub lead: Option<String>,
    /// `body`
    pub body: Option<String>,
    /// `texto`
    pub text: Option<String>,
    /// `secao`
    pub section: Option<String>,
    /// `data`
    pub date: Option<String>,
    /// `time`
    pub time: Option<String>,
    /// `imagem`
    pub image: Option<Media>,
    /// `multimediaPrincipal`
    pub main_media: Option<Media>,
    /// `autores`
    pub authors: Authors,
    /// `tags`
    pub tags: Tags,
}

impl Article {
    /// Decode an article from an untyped JSON value.
    ///
    /// Returns `None` when the value is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_map(map)),
            _ => None,
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            id: map.get("id").and_then(parse_id),
            title: string_key(map, "titulo"),
            url: string_key(map, "url"),
            full_url: string_key(map, "fullUrl"),
            description: string_key(map, "descricao"),
            lead: string_key(map, "lead"),
            body: string_key(map, "body"),
            text: string_key(map, "texto"),
            section: string_key(map, "secao"),
            date: string_key(map, "data"),
            time: string_key(map, "time"),
            image: Media::from_value(map.get("imagem")),
            main_media: Media::from_value(map.get("multimediaPrincipal")),
            authors: Authors::from_value(map.get("autores")),
            tags: Tags::from_value(map.get("tags")),
        }
    }

    /// Decode a list payload. Anything that is not a JSON array yields an
    /// empty list; array entries that are not objects are skipped.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        match value {
            Value::Array(items) => items.iter().filter_map(Self::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::{AuthorEntry, TagEntry};
    use serde_json::json;

    #[test]
    fn test_decode_full_article() {
        let value = json!({
            "id": 2075123,
            "titulo": "Governo anuncia <em>medidas</em>",
            "url": "/2024/01/02/politica/noticia/governo-anuncia-medidas-2075123",
            "fullUrl": "https://www.publico.pt/2024/01/02/politica/noticia/governo-anuncia-medidas-2075123",
            "descricao": "há 3 horas ... Governo anuncia",
            "secao": "Política",
            "data": "2024-01-02T10:15:00",
            "multimediaPrincipal": {"src": "https://imagens.publico.pt/1.jpg", "tipo": "imagem"},
            "autores": [{"nome": "Ana"}],
            "tags": ["Política"]
        });

        let article = Article::from_value(&value).unwrap();
        assert_eq!(article.id, Some(2075123));
        assert_eq!(article.title.as_deref(), Some("Governo anuncia <em>medidas</em>"));
        assert_eq!(article.section.as_deref(), Some("Política"));
        assert_eq!(
            article.authors,
            Authors::Many(vec![AuthorEntry::Record {
                nome: Some("Ana".into()),
                name: None
            }])
        );
        assert_eq!(article.tags, Tags::Many(vec![TagEntry::Text("Política".into())]));
        assert!(article.image.is_none());
        assert!(article.main_media.is_some());
    }

    #[test]
    fn test_wrongly_typed_fields_become_none() {
        let value = json!({"id": "not-a-number", "titulo": 5, "url": ["x"], "data": null});
        let article = Article::from_value(&value).unwrap();
        assert_eq!(article.id, None);
        assert_eq!(article.title, None);
        assert_eq!(article.url, None);
        assert_eq!(article.date, None);
    }

    #[test]
    fn test_string_id_is_parsed() {
        let article = Article::from_value(&json!({"id": "42"})).unwrap();
        assert_eq!(article.id, Some(42));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(Article::from_value(&json!([1, 2])).is_none());
        assert!(Article::from_value(&json!("text")).is_none());
        assert!(Article::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_list_guard() {
        assert!(Article::list_from_value(&json!({"items": []})).is_empty());
        assert!(Article::list_from_value(&json!(null)).is_empty());

        let list = Article::list_from_value(&json!([{"titulo": "a"}, 3, {"titulo": "b"}]));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].title.as_deref(), Some("b"));
    }
}
