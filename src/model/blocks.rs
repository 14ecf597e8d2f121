use super::common::BlockCommon;
use crate::types::{BlockId, Color, PageId, RichTextItem};
use serde::{Deserialize, Serialize};

/// Rich text plus the block-level color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TextBlockContent {
    pub rich_text: Vec<RichTextItem>,
    pub color: Color,
}

impl TextBlockContent {
    pub fn plain(text: &str) -> Self {
        Self {
            rich_text: vec![RichTextItem::plain_text(text)],
            color: Color::Default,
        }
    }
}

/// Paragraph block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ParagraphBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Heading block, shared by all three heading levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HeadingBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub is_toggleable: bool,
    /// Page-unique anchor id, set by `assign_heading_anchors`.
    #[serde(default)]
    pub anchor: Option<String>,
}

/// Bulleted or numbered list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListItemBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// To-do block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToDoBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
    pub checked: bool,
}

/// Toggle block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ToggleBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Quote block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QuoteBlock {
    pub common: BlockCommon,
    pub content: TextBlockContent,
}

/// Callout block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CalloutBlock {
    pub common: BlockCommon,
    pub icon: Option<Icon>,
    pub content: TextBlockContent,
}

/// Icon types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Icon {
    Emoji(String),
    External { url: String },
    File { url: String },
}

/// Code block.
///
/// `highlighted` is filled in by the preparation pass before the tree is
/// transformed; it holds ready-to-embed markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CodeBlock {
    pub common: BlockCommon,
    pub language: String,
    pub caption: Vec<RichTextItem>,
    pub content: TextBlockContent,
    pub highlighted: Option<String>,
}

/// Equation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EquationBlock {
    pub common: BlockCommon,
    pub expression: String,
}

/// A block with no payload of its own: divider, breadcrumb, table of
/// contents, column list and column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BareBlock {
    pub common: BlockCommon,
}

/// Image, video, file and pdf blocks.
///
/// `source` is `None` when the payload carried neither an external nor an
/// uploaded file URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaBlock {
    pub common: BlockCommon,
    pub source: Option<FileObject>,
    pub caption: Vec<RichTextItem>,
}

/// Bookmark, embed and link preview blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkBlock {
    pub common: BlockCommon,
    pub url: Option<String>,
    pub caption: Vec<RichTextItem>,
}

/// Child page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChildPageBlock {
    pub common: BlockCommon,
    pub title: String,
}

/// Link to page block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkToPageBlock {
    pub common: BlockCommon,
    pub page_id: Option<PageId>,
}

/// Table block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableBlock {
    pub common: BlockCommon,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
}

/// Table row block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TableRowBlock {
    pub common: BlockCommon,
    pub cells: Vec<Vec<RichTextItem>>,
}

/// Synced block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SyncedBlock {
    pub common: BlockCommon,
    pub synced_from: Option<BlockId>,
}

/// A block whose type this crate does not model. The original tag is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UnsupportedBlock {
    pub common: BlockCommon,
    pub block_type: String,
}

/// Where a media block's bytes live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileObject {
    External {
        url: String,
    },
    File {
        url: String,
        expiry_time: Option<chrono::DateTime<chrono::Utc>>,
    },
}

impl FileObject {
    pub fn url(&self) -> &str {
        match self {
            FileObject::External { url } => url,
            FileObject::File { url, .. } => url,
        }
    }
}
