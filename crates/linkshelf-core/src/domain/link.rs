//! Link domain types.
//!
//! These types represent catalog entries in the system, independent of any
//! infrastructure concerns (PostgREST rows, Notion pages, JSON files).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// A link as seen by the view layer.
///
/// Every list-valued field is a real list here; nullable store values have
/// already been normalized by [`StoredLink::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Display title.
    pub name: String,
    /// Target address.
    pub url: String,
    /// Model label (free text).
    pub model: String,
    /// Free-text description (empty when the store has none).
    pub description: String,
    /// Category labels, display order preserved.
    pub category: Vec<String>,
    /// Tag labels, display order preserved.
    pub tags: Vec<String>,
    /// Whether the link is featured in the popular view.
    #[serde(rename = "isPopular")]
    pub is_popular: bool,
    /// Server-assigned creation time. Absent for rows read from the static
    /// cache file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// Text value of a field as it appears in an edit buffer.
    ///
    /// List fields are joined with `", "`; the popular flag renders as
    /// `"true"`/`"false"`.
    pub fn field_text(&self, field: LinkField) -> String {
        match field {
            LinkField::Name => self.name.clone(),
            LinkField::Url => self.url.clone(),
            LinkField::Model => self.model.clone(),
            LinkField::Description => self.description.clone(),
            LinkField::Category => join_labels(&self.category),
            LinkField::Tags => join_labels(&self.tags),
            LinkField::IsPopular => self.is_popular.to_string(),
        }
    }
}

/// A link exactly as the remote store reports it.
///
/// Legacy rows may carry nulls in any column except `id`, and the static
/// cache file may carry `category` as a bare string. Both shapes are accepted
/// here and cleaned up by [`StoredLink::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLink {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub category: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_labels")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "isPopular", default)]
    pub is_popular: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredLink {
    /// Convert into the view-layer shape, replacing nulls with empty values.
    pub fn normalize(self) -> LinkRecord {
        LinkRecord {
            id: self.id,
            name: self.name.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            model: self.model.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            is_popular: self.is_popular.unwrap_or(false),
            created_at: self.created_at,
        }
    }

    /// Apply a partial update in place.
    ///
    /// Used by in-process stores; remote stores apply patches server-side.
    pub fn apply(&mut self, patch: &LinkPatch) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(url) = &patch.url {
            self.url = Some(url.clone());
        }
        if let Some(model) = &patch.model {
            self.model = Some(model.clone());
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(category) = &patch.category {
            self.category = Some(category.clone());
        }
        if let Some(tags) = &patch.tags {
            self.tags = Some(tags.clone());
        }
        if let Some(is_popular) = patch.is_popular {
            self.is_popular = Some(is_popular);
        }
    }
}

impl From<StoredLink> for LinkRecord {
    fn from(stored: StoredLink) -> Self {
        stored.normalize()
    }
}

/// Raw label column: `null`, a bare string, or a list that may contain nulls.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabels {
    One(String),
    Many(Vec<Option<String>>),
}

fn deserialize_labels<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawLabels>::deserialize(deserializer)?;
    Ok(raw.map(|labels| match labels {
        RawLabels::One(label) if label.is_empty() => Vec::new(),
        RawLabels::One(label) => vec![label],
        RawLabels::Many(labels) => labels.into_iter().flatten().collect(),
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Writes
// ─────────────────────────────────────────────────────────────────────────────

/// A link to be inserted (no id or timestamp yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLink {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Vec<String>,
    pub tags: Vec<String>,
    #[serde(rename = "isPopular")]
    pub is_popular: bool,
}

impl NewLink {
    /// Create a new link with the required fields.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            model: None,
            description: None,
            category: Vec::new(),
            tags: Vec::new(),
            is_popular: false,
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Vec<String>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub const fn popular(mut self, is_popular: bool) -> Self {
        self.is_popular = is_popular;
        self
    }
}

/// A partial update. Only the `Some` fields are sent to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "isPopular", skip_serializing_if = "Option::is_none")]
    pub is_popular: Option<bool>,
}

impl LinkPatch {
    /// Patch a single text field.
    ///
    /// List fields receive the value split with [`split_labels`]; the popular
    /// flag parses `"true"`/`"false"` and is left unset otherwise.
    pub fn text(field: LinkField, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut patch = Self::default();
        match field {
            LinkField::Name => patch.name = Some(value),
            LinkField::Url => patch.url = Some(value),
            LinkField::Model => patch.model = Some(value),
            LinkField::Description => patch.description = Some(value),
            LinkField::Category => patch.category = Some(split_labels(&value)),
            LinkField::Tags => patch.tags = Some(split_labels(&value)),
            LinkField::IsPopular => patch.is_popular = value.trim().parse().ok(),
        }
        patch
    }

    /// Patch the popular flag.
    pub fn popular(is_popular: bool) -> Self {
        Self {
            is_popular: Some(is_popular),
            ..Self::default()
        }
    }

    /// True when no field is set.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url.is_none()
            && self.model.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.is_popular.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fields
// ─────────────────────────────────────────────────────────────────────────────

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text, committed on blur.
    Text,
    /// Comma-delimited labels, committed on blur.
    Labels,
    /// Boolean, committed on toggle.
    Flag,
}

/// Editable columns of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkField {
    Name,
    Url,
    Model,
    Description,
    Category,
    Tags,
    IsPopular,
}

impl LinkField {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Url,
        Self::Model,
        Self::Description,
        Self::Category,
        Self::Tags,
        Self::IsPopular,
    ];

    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Name | Self::Url | Self::Model | Self::Description => FieldKind::Text,
            Self::Category | Self::Tags => FieldKind::Labels,
            Self::IsPopular => FieldKind::Flag,
        }
    }

    /// Column name used by the store and the JSON cache file.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Url => "url",
            Self::Model => "model",
            Self::Description => "description",
            Self::Category => "category",
            Self::Tags => "tags",
            Self::IsPopular => "isPopular",
        }
    }
}

impl fmt::Display for LinkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LinkField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "url" => Ok(Self::Url),
            "model" => Ok(Self::Model),
            "description" => Ok(Self::Description),
            "category" | "categories" => Ok(Self::Category),
            "tags" | "tag" => Ok(Self::Tags),
            "ispopular" | "popular" | "is_popular" => Ok(Self::IsPopular),
            other => Err(format!("unknown link field: {other}")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Label helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Split a comma-delimited buffer into trimmed, non-empty labels.
pub fn split_labels(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join labels into the buffer form used by list cells.
pub fn join_labels(labels: &[String]) -> String {
    labels.join(", ")
}
