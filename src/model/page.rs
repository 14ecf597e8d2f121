use super::Block;
use crate::types::{flatten_plain_text, PageId, PropertyName, RichTextItem};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A Notion page: metadata plus its (already resolved) block tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub url: Option<String>,
    pub properties: IndexMap<PropertyName, PropertyValue>,
    pub blocks: Vec<Block>,
}

/// The property types the site reads. Everything else is kept as its tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title(Vec<RichTextItem>),
    RichText(Vec<RichTextItem>),
    Select(Option<String>),
    MultiSelect(Vec<String>),
    Checkbox(bool),
    Number(Option<f64>),
    Date(Option<chrono::NaiveDate>),
    Url(Option<String>),
    Other(String),
}

impl Page {
    pub fn new(id: PageId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: None,
            properties: IndexMap::new(),
            blocks: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: PropertyValue) -> Self {
        self.properties.insert(PropertyName::new(name), value);
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(&PropertyName::new(name))
    }

    /// Name of the selected option of a select property.
    pub fn select(&self, name: &str) -> Option<&str> {
        match self.property(name)? {
            PropertyValue::Select(option) => option.as_deref(),
            _ => None,
        }
    }

    pub fn checkbox(&self, name: &str) -> Option<bool> {
        match self.property(name)? {
            PropertyValue::Checkbox(checked) => Some(*checked),
            _ => None,
        }
    }

    /// Plain text of a title or rich text property.
    pub fn text(&self, name: &str) -> Option<String> {
        match self.property(name)? {
            PropertyValue::Title(items) | PropertyValue::RichText(items) => {
                Some(flatten_plain_text(items))
            }
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<chrono::NaiveDate> {
        match self.property(name)? {
            PropertyValue::Date(date) => *date,
            _ => None,
        }
    }

    pub fn tags(&self, name: &str) -> Vec<&str> {
        match self.property(name) {
            Some(PropertyValue::MultiSelect(options)) => {
                options.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }
}
