//! Union-shaped article fields.
//!
//! The provider sends authors, tags and images in several shapes. Each field is
//! inspected once when the payload is decoded and turned into one of the enums
//! below; nothing downstream looks at raw JSON again.

use serde_json::{Map, Value};

/// Stringification of a JSON object, mirroring what the provider's own
/// front-end produces when it coerces a tag object to text.
pub const OBJECT_TOKEN: &str = "[object Object]";

/// JavaScript-style truthiness, which is what the provider's payloads assume.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0 || f.is_nan()).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Text conversion for loose scalar labels: strings as-is, numbers printed.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Generic text conversion of an arbitrary JSON value.
///
/// Arrays join their elements with `,` (null entries become empty), objects
/// collapse to [`OBJECT_TOKEN`].
pub(crate) fn coerce_to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_TOKEN.to_string(),
    }
}

/// One entry of the `autores` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorEntry {
    /// A bare string.
    Name(String),
    /// An object carrying `nome` and/or `name`.
    Record {
        nome: Option<String>,
        name: Option<String>,
    },
    /// Anything else (numbers, booleans, nested arrays).
    Unknown,
}

impl AuthorEntry {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => AuthorEntry::Name(s.clone()),
            Value::Object(map) => AuthorEntry::Record {
                nome: string_key(map, "nome"),
                name: string_key(map, "name"),
            },
            _ => AuthorEntry::Unknown,
        }
    }

    /// Display name, `nome` winning over `name`. Empty names count as missing
    /// on records; a bare string is returned verbatim.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            AuthorEntry::Name(s) => Some(s.as_str()),
            AuthorEntry::Record { nome, name } => nome
                .as_deref()
                .filter(|n| !n.is_empty())
                .or_else(|| name.as_deref().filter(|n| !n.is_empty())),
            AuthorEntry::Unknown => None,
        }
    }
}

/// The `autores` field after shape inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Authors {
    #[default]
    Missing,
    Single(AuthorEntry),
    Many(Vec<AuthorEntry>),
}

impl Authors {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Authors::Missing,
            Some(v) if is_falsy(v) => Authors::Missing,
            Some(Value::Array(items)) => {
                Authors::Many(items.iter().map(AuthorEntry::from_value).collect())
            }
            Some(v) => Authors::Single(AuthorEntry::from_value(v)),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Authors::Missing)
    }
}

/// Alternate keys a tag object may carry its label under, in priority order.
pub const TAG_LABEL_KEYS: [&str; 5] = ["nome", "name", "value", "titulo", "title"];

/// One entry of the `tags` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEntry {
    Text(String),
    /// Labels found under [`TAG_LABEL_KEYS`], in key order.
    Record(Vec<Option<String>>),
    /// A nested list, kept as its generic text conversion.
    Composite(String),
    /// Null, booleans, numbers: never a tag.
    Unknown,
}

impl TagEntry {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => TagEntry::Text(s.clone()),
            Value::Object(map) => TagEntry::Record(
                TAG_LABEL_KEYS
                    .iter()
                    .map(|key| map.get(*key).and_then(scalar_text))
                    .collect(),
            ),
            Value::Array(_) => TagEntry::Composite(coerce_to_text(value)),
            _ => TagEntry::Unknown,
        }
    }

    /// Label for this entry, or an empty string when there is none.
    pub fn label(&self) -> String {
        match self {
            TagEntry::Text(s) => s.clone(),
            TagEntry::Record(candidates) => candidates
                .iter()
                .flatten()
                .find(|label| !label.is_empty())
                .cloned()
                // A plain object has no text of its own.
                .unwrap_or_default(),
            TagEntry::Composite(text) if text != OBJECT_TOKEN => text.clone(),
            TagEntry::Composite(_) | TagEntry::Unknown => String::new(),
        }
    }
}

/// The `tags` field after shape inspection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Tags {
    #[default]
    Missing,
    Single(TagEntry),
    Many(Vec<TagEntry>),
}

impl Tags {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => Tags::Missing,
            Some(v) if is_falsy(v) => Tags::Missing,
            Some(Value::Array(items)) => Tags::Many(items.iter().map(TagEntry::from_value).collect()),
            Some(v) => Tags::Single(TagEntry::from_value(v)),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Tags::Missing)
    }
}

/// An image reference: `imagem` or `multimediaPrincipal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    Url(String),
    Object { src: Option<String> },
}

impl Media {
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::String(s) => Some(Media::Url(s.clone())),
            Value::Object(map) => Some(Media::Object {
                src: string_key(map, "src"),
            }),
            _ => None,
        }
    }
}

pub(crate) fn string_key(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
