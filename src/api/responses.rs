// src/api/responses.rs
//! Wire shapes of Notion API responses.
//!
//! Every field that Notion may omit has a serde default, so a block or page
//! with missing sub-fields still deserializes. Conversion into the domain
//! model happens in `parser`.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Generic paginated list response.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Body Notion sends with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: u16,
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// A block object. The type-specific payload sits under a key named after
/// the type and is captured by `payloads`.
#[derive(Debug, Clone, Deserialize)]
pub struct WireBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    /// Only present in exported dumps, where children are inlined.
    #[serde(default)]
    pub children: Vec<WireBlock>,
    #[serde(flatten)]
    pub payloads: Map<String, Value>,
}

/// Union of the payload fields of every supported block type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WirePayload {
    pub rich_text: Vec<WireRichText>,
    pub color: Option<String>,
    pub is_toggleable: bool,
    pub checked: bool,
    pub language: Option<String>,
    pub caption: Vec<WireRichText>,
    pub icon: Option<WireIcon>,
    pub expression: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub external: Option<WireUrl>,
    pub file: Option<WireHostedFile>,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
    pub cells: Vec<Vec<WireRichText>>,
    pub synced_from: Option<WireSyncedFrom>,
    pub page_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireUrl {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireHostedFile {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireSyncedFrom {
    #[serde(default)]
    pub block_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireIcon {
    #[serde(rename = "type", default)]
    pub icon_type: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub external: Option<WireUrl>,
    #[serde(default)]
    pub file: Option<WireHostedFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireRichText {
    #[serde(rename = "type")]
    pub text_type: String,
    pub plain_text: String,
    pub href: Option<String>,
    pub annotations: WireAnnotations,
    pub text: Option<WireTextContent>,
    pub equation: Option<WireEquation>,
    pub mention: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireAnnotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireTextContent {
    pub content: String,
    pub link: Option<WireUrl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WireEquation {
    pub expression: String,
}

/// A page object, optionally carrying an inlined block tree (dumps only).
#[derive(Debug, Clone, Deserialize)]
pub struct WirePage {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub properties: IndexMap<String, WireProperty>,
    #[serde(default)]
    pub blocks: Vec<WireBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireProperty {
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}
