use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{flatten_plain_text, BlockId, RichTextItem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expands to a match that applies the same expression to every variant.
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Breadcrumb($pattern) => $result,
            Block::TableOfContents($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Pdf($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::LinkPreview($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::LinkToPage($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ColumnList($pattern) => $result,
            Block::Column($pattern) => $result,
            Block::Synced($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// A single content node from Notion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    BulletedListItem(ListItemBlock),
    NumberedListItem(ListItemBlock),
    ToDo(ToDoBlock),
    Toggle(ToggleBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Code(CodeBlock),
    Equation(EquationBlock),
    Divider(BareBlock),
    Breadcrumb(BareBlock),
    TableOfContents(BareBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    File(MediaBlock),
    Pdf(MediaBlock),
    Bookmark(LinkBlock),
    Embed(LinkBlock),
    LinkPreview(LinkBlock),
    ChildPage(ChildPageBlock),
    LinkToPage(LinkToPageBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ColumnList(BareBlock),
    Column(BareBlock),
    Synced(SyncedBlock),
    Unsupported(UnsupportedBlock),
}

/// The type tag of a block, including the two synthesized list kinds.
///
/// Handler registries are keyed by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Paragraph,
    #[serde(rename = "heading_1")]
    Heading1,
    #[serde(rename = "heading_2")]
    Heading2,
    #[serde(rename = "heading_3")]
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    Quote,
    Callout,
    Code,
    Equation,
    Divider,
    Breadcrumb,
    TableOfContents,
    Image,
    Video,
    File,
    Pdf,
    Bookmark,
    Embed,
    LinkPreview,
    ChildPage,
    LinkToPage,
    Table,
    TableRow,
    ColumnList,
    Column,
    #[serde(rename = "synced_block")]
    Synced,
    Unsupported,
    BulletedList,
    NumberedList,
}

impl BlockKind {
    /// Every tag the parser and the registries know about.
    pub const ALL: [BlockKind; 32] = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::BulletedListItem,
        BlockKind::NumberedListItem,
        BlockKind::ToDo,
        BlockKind::Toggle,
        BlockKind::Quote,
        BlockKind::Callout,
        BlockKind::Code,
        BlockKind::Equation,
        BlockKind::Divider,
        BlockKind::Breadcrumb,
        BlockKind::TableOfContents,
        BlockKind::Image,
        BlockKind::Video,
        BlockKind::File,
        BlockKind::Pdf,
        BlockKind::Bookmark,
        BlockKind::Embed,
        BlockKind::LinkPreview,
        BlockKind::ChildPage,
        BlockKind::LinkToPage,
        BlockKind::Table,
        BlockKind::TableRow,
        BlockKind::ColumnList,
        BlockKind::Column,
        BlockKind::Synced,
        BlockKind::Unsupported,
        BlockKind::BulletedList,
        BlockKind::NumberedList,
    ];

    /// The Notion wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading1 => "heading_1",
            BlockKind::Heading2 => "heading_2",
            BlockKind::Heading3 => "heading_3",
            BlockKind::BulletedListItem => "bulleted_list_item",
            BlockKind::NumberedListItem => "numbered_list_item",
            BlockKind::ToDo => "to_do",
            BlockKind::Toggle => "toggle",
            BlockKind::Quote => "quote",
            BlockKind::Callout => "callout",
            BlockKind::Code => "code",
            BlockKind::Equation => "equation",
            BlockKind::Divider => "divider",
            BlockKind::Breadcrumb => "breadcrumb",
            BlockKind::TableOfContents => "table_of_contents",
            BlockKind::Image => "image",
            BlockKind::Video => "video",
            BlockKind::File => "file",
            BlockKind::Pdf => "pdf",
            BlockKind::Bookmark => "bookmark",
            BlockKind::Embed => "embed",
            BlockKind::LinkPreview => "link_preview",
            BlockKind::ChildPage => "child_page",
            BlockKind::LinkToPage => "link_to_page",
            BlockKind::Table => "table",
            BlockKind::TableRow => "table_row",
            BlockKind::ColumnList => "column_list",
            BlockKind::Column => "column",
            BlockKind::Synced => "synced_block",
            BlockKind::Unsupported => "unsupported",
            BlockKind::BulletedList => "bulleted_list",
            BlockKind::NumberedList => "numbered_list",
        }
    }

    /// Heading level for the three heading tags.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading1 => Some(1),
            BlockKind::Heading2 => Some(2),
            BlockKind::Heading3 => Some(3),
            _ => None,
        }
    }

    pub fn heading(level: u8) -> Option<BlockKind> {
        match level {
            1 => Some(BlockKind::Heading1),
            2 => Some(BlockKind::Heading2),
            3 => Some(BlockKind::Heading3),
            _ => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }
}

impl std::str::FromStr for BlockKind {
    type Err = std::convert::Infallible;

    /// Unknown tags parse as `Unsupported`; this never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BlockKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .unwrap_or(BlockKind::Unsupported))
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    /// Loaded children. Empty for leaf blocks.
    pub fn children(&self) -> &[Block] {
        match_all_blocks!(self, b => &b.common.children)
    }

    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    /// Returns a copy of this block whose children are replaced.
    /// `has_children` keeps the value the content source reported.
    pub fn with_children(&self, children: Vec<Block>) -> Block {
        let mut copy = self.clone();
        copy.common_mut().children = children;
        copy
    }

    /// Marks this block as having children the source has not delivered.
    pub fn awaiting_children(mut self) -> Block {
        self.common_mut().has_children = true;
        self
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Paragraph(_) => BlockKind::Paragraph,
            Block::Heading1(_) => BlockKind::Heading1,
            Block::Heading2(_) => BlockKind::Heading2,
            Block::Heading3(_) => BlockKind::Heading3,
            Block::BulletedListItem(_) => BlockKind::BulletedListItem,
            Block::NumberedListItem(_) => BlockKind::NumberedListItem,
            Block::ToDo(_) => BlockKind::ToDo,
            Block::Toggle(_) => BlockKind::Toggle,
            Block::Quote(_) => BlockKind::Quote,
            Block::Callout(_) => BlockKind::Callout,
            Block::Code(_) => BlockKind::Code,
            Block::Equation(_) => BlockKind::Equation,
            Block::Divider(_) => BlockKind::Divider,
            Block::Breadcrumb(_) => BlockKind::Breadcrumb,
            Block::TableOfContents(_) => BlockKind::TableOfContents,
            Block::Image(_) => BlockKind::Image,
            Block::Video(_) => BlockKind::Video,
            Block::File(_) => BlockKind::File,
            Block::Pdf(_) => BlockKind::Pdf,
            Block::Bookmark(_) => BlockKind::Bookmark,
            Block::Embed(_) => BlockKind::Embed,
            Block::LinkPreview(_) => BlockKind::LinkPreview,
            Block::ChildPage(_) => BlockKind::ChildPage,
            Block::LinkToPage(_) => BlockKind::LinkToPage,
            Block::Table(_) => BlockKind::Table,
            Block::TableRow(_) => BlockKind::TableRow,
            Block::ColumnList(_) => BlockKind::ColumnList,
            Block::Column(_) => BlockKind::Column,
            Block::Synced(_) => BlockKind::Synced,
            Block::Unsupported(_) => BlockKind::Unsupported,
        }
    }

    /// The tag as it appeared on the wire; unsupported blocks keep theirs.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Unsupported(b) => &b.block_type,
            other => other.kind().as_str(),
        }
    }

    /// The block's own rich text, for types that carry one.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match self {
            Block::Paragraph(b) => Some(&b.content.rich_text),
            Block::Heading1(b) | Block::Heading2(b) | Block::Heading3(b) => {
                Some(&b.content.rich_text)
            }
            Block::BulletedListItem(b) | Block::NumberedListItem(b) => Some(&b.content.rich_text),
            Block::ToDo(b) => Some(&b.content.rich_text),
            Block::Toggle(b) => Some(&b.content.rich_text),
            Block::Quote(b) => Some(&b.content.rich_text),
            Block::Callout(b) => Some(&b.content.rich_text),
            Block::Code(b) => Some(&b.content.rich_text),
            _ => None,
        }
    }

    /// Flattened visible text; empty for blocks without rich text.
    pub fn plain_text(&self) -> String {
        self.rich_text().map(flatten_plain_text).unwrap_or_default()
    }

    pub fn heading_level(&self) -> Option<u8> {
        self.kind().heading_level()
    }
}
