//! Short constructors for the common block types.
//!
//! Fixtures, benches and callers that synthesize content use these instead of
//! spelling out every payload struct.

use super::blocks::*;
use super::common::BlockCommon;
use super::Block;
use crate::types::{BlockId, RichTextItem};

fn common(id: &str) -> BlockCommon {
    BlockCommon::new(BlockId::from_raw(id))
}

impl Block {
    pub fn paragraph(id: &str, text: &str) -> Block {
        Block::paragraph_rich(id, vec![RichTextItem::plain_text(text)])
    }

    pub fn paragraph_rich(id: &str, rich_text: Vec<RichTextItem>) -> Block {
        Block::Paragraph(ParagraphBlock {
            common: common(id),
            content: TextBlockContent {
                rich_text,
                ..Default::default()
            },
        })
    }

    /// Heading of level 1 to 3; other levels clamp into that range.
    pub fn heading(level: u8, id: &str, text: &str) -> Block {
        let heading = HeadingBlock {
            common: common(id),
            content: TextBlockContent::plain(text),
            is_toggleable: false,
            anchor: None,
        };
        match level {
            0 | 1 => Block::Heading1(heading),
            2 => Block::Heading2(heading),
            _ => Block::Heading3(heading),
        }
    }

    pub fn bulleted_item(id: &str, text: &str) -> Block {
        Block::BulletedListItem(ListItemBlock {
            common: common(id),
            content: TextBlockContent::plain(text),
        })
    }

    pub fn numbered_item(id: &str, text: &str) -> Block {
        Block::NumberedListItem(ListItemBlock {
            common: common(id),
            content: TextBlockContent::plain(text),
        })
    }

    pub fn to_do(id: &str, text: &str, checked: bool) -> Block {
        Block::ToDo(ToDoBlock {
            common: common(id),
            content: TextBlockContent::plain(text),
            checked,
        })
    }

    pub fn toggle(id: &str, text: &str, children: Vec<Block>) -> Block {
        Block::Toggle(ToggleBlock {
            common: common(id).with_children(children),
            content: TextBlockContent::plain(text),
        })
    }

    pub fn quote(id: &str, text: &str) -> Block {
        Block::Quote(QuoteBlock {
            common: common(id),
            content: TextBlockContent::plain(text),
        })
    }

    pub fn callout(id: &str, text: &str) -> Block {
        Block::Callout(CalloutBlock {
            common: common(id),
            icon: None,
            content: TextBlockContent::plain(text),
        })
    }

    pub fn code(id: &str, language: &str, source: &str) -> Block {
        Block::Code(CodeBlock {
            common: common(id),
            language: language.to_string(),
            caption: Vec::new(),
            content: TextBlockContent::plain(source),
            highlighted: None,
        })
    }

    pub fn divider(id: &str) -> Block {
        Block::Divider(BareBlock { common: common(id) })
    }

    pub fn table_of_contents(id: &str) -> Block {
        Block::TableOfContents(BareBlock { common: common(id) })
    }

    pub fn column_list(id: &str, columns: Vec<Block>) -> Block {
        Block::ColumnList(BareBlock {
            common: common(id).with_children(columns),
        })
    }

    pub fn column(id: &str, children: Vec<Block>) -> Block {
        Block::Column(BareBlock {
            common: common(id).with_children(children),
        })
    }

    pub fn image(id: &str, url: &str) -> Block {
        Block::Image(MediaBlock {
            common: common(id),
            source: Some(FileObject::External {
                url: url.to_string(),
            }),
            caption: Vec::new(),
        })
    }

    pub fn video(id: &str, url: &str) -> Block {
        Block::Video(MediaBlock {
            common: common(id),
            source: Some(FileObject::External {
                url: url.to_string(),
            }),
            caption: Vec::new(),
        })
    }

    pub fn bookmark(id: &str, url: &str) -> Block {
        Block::Bookmark(LinkBlock {
            common: common(id),
            url: Some(url.to_string()),
            caption: Vec::new(),
        })
    }

    pub fn embed(id: &str, url: &str) -> Block {
        Block::Embed(LinkBlock {
            common: common(id),
            url: Some(url.to_string()),
            caption: Vec::new(),
        })
    }

    pub fn unsupported(id: &str, block_type: &str) -> Block {
        Block::Unsupported(UnsupportedBlock {
            common: common(id),
            block_type: block_type.to_string(),
        })
    }
}
