//! Notion API response types and the typed property projection.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{NotionError, NotionResult};

/// One page of a database query.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Page>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A database row.
#[derive(Debug, Deserialize)]
pub struct Page {
    pub id: String,
    /// Kept raw so unknown property kinds can be reported by name.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// Property kinds with a projection rule.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Url {
        url: Option<String>,
    },
}

const SUPPORTED_KINDS: [&str; 6] = [
    "title",
    "rich_text",
    "select",
    "multi_select",
    "checkbox",
    "url",
];

impl PropertyValue {
    /// Parse a raw property, failing on kinds without a projection rule.
    pub fn from_raw(name: &str, raw: Value) -> NotionResult<Self> {
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if !SUPPORTED_KINDS.contains(&kind.as_str()) {
            return Err(NotionError::UnsupportedProperty {
                property: name.to_string(),
                kind,
            });
        }
        serde_json::from_value(raw).map_err(|e| NotionError::InvalidResponse {
            message: format!("property '{name}': {e}"),
        })
    }

    /// The plain value written to the cache file.
    ///
    /// - title, rich text: concatenated plain text, `""` when empty
    /// - select: option name, `""` when unset
    /// - multi-select: option names
    /// - checkbox: boolean
    /// - url: the URL, `""` when unset
    pub fn project(self) -> Value {
        match self {
            Self::Title { title: segments } | Self::RichText { rich_text: segments } => {
                Value::String(segments.into_iter().map(|s| s.plain_text).collect())
            }
            Self::Select { select } => {
                Value::String(select.map(|option| option.name).unwrap_or_default())
            }
            Self::MultiSelect { multi_select } => Value::Array(
                multi_select
                    .into_iter()
                    .map(|option| Value::String(option.name))
                    .collect(),
            ),
            Self::Checkbox { checkbox } => Value::Bool(checkbox),
            Self::Url { url } => Value::String(url.unwrap_or_default()),
        }
    }
}

/// Flatten a page to `{"id": ..., <property>: <plain value>, ...}`.
pub fn project_page(page: Page) -> NotionResult<Map<String, Value>> {
    let mut row = Map::new();
    row.insert("id".to_string(), Value::String(page.id));
    for (name, raw) in page.properties {
        let value = PropertyValue::from_raw(&name, raw)?.project();
        row.insert(name, value);
    }
    Ok(row)
}
