//! Default handlers for the common block types.
//!
//! Embeds, files, pdfs, child pages, page links, breadcrumbs, link previews,
//! synced blocks and tables of contents have no binding here and are skipped.

use super::anchors::heading_anchor;
use super::context::RenderContext;
use super::node::RenderedNode;
use super::registry::HandlerRegistry;
use crate::model::{Block, BlockKind, FileObject, Icon, TextBlockContent};
use crate::transform::{GroupedBlock, ListKind};
use crate::types::{flatten_plain_text, is_safe_href, ValidatedUrl};

pub fn default_registry() -> HandlerRegistry {
    HandlerRegistry::empty()
        .with_fn(BlockKind::Paragraph, paragraph)
        .with_fn(BlockKind::Heading1, heading)
        .with_fn(BlockKind::Heading2, heading)
        .with_fn(BlockKind::Heading3, heading)
        .with_fn(BlockKind::BulletedList, list)
        .with_fn(BlockKind::NumberedList, list)
        .with_fn(BlockKind::BulletedListItem, list_item)
        .with_fn(BlockKind::NumberedListItem, list_item)
        .with_fn(BlockKind::ToDo, to_do)
        .with_fn(BlockKind::Toggle, toggle)
        .with_fn(BlockKind::Quote, quote)
        .with_fn(BlockKind::Callout, callout)
        .with_fn(BlockKind::Code, code)
        .with_fn(BlockKind::Equation, equation)
        .with_fn(BlockKind::Divider, divider)
        .with_fn(BlockKind::Image, image)
        .with_fn(BlockKind::Video, video)
        .with_fn(BlockKind::Bookmark, bookmark)
        .with_fn(BlockKind::ColumnList, column_list)
        .with_fn(BlockKind::Column, column)
        .with_fn(BlockKind::Table, table)
        .with_fn(BlockKind::TableRow, table_row)
}

/// Element for a text-bearing block: block class, color class, rich text.
fn text_element(tag: &str, block: &Block, content: &TextBlockContent, ctx: &RenderContext) -> RenderedNode {
    RenderedNode::element(tag)
        .class(ctx.class_for(block.kind()))
        .class(content.color.css_class().as_deref())
        .children_from(ctx.render_rich_text(&content.rich_text))
}

pub fn paragraph(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Paragraph(paragraph) = block else {
        return None;
    };
    Some(text_element("p", block, &paragraph.content, ctx))
}

pub fn heading(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let (level, heading) = match block {
        Block::Heading1(h) => (1, h),
        Block::Heading2(h) => (2, h),
        Block::Heading3(h) => (3, h),
        _ => return None,
    };
    let mut element = text_element(&format!("h{}", level), block, &heading.content, ctx);
    if let Some(anchor) = heading_anchor(block) {
        element = element.attr("id", anchor);
    }

    if heading.is_toggleable && !block.children().is_empty() {
        Some(
            RenderedNode::element("details")
                .child(RenderedNode::element("summary").child(element))
                .children_from(ctx.render_children(block.children())),
        )
    } else {
        Some(element)
    }
}

pub fn list(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let GroupedBlock::List { kind, items } = node else {
        return None;
    };
    let tag = match kind {
        ListKind::Bulleted => "ul",
        ListKind::Numbered => "ol",
    };
    let rendered_items = items
        .iter()
        .filter_map(|item| ctx.render_node(&GroupedBlock::Single(*item)));
    Some(
        RenderedNode::element(tag)
            .class(ctx.class_for(node.kind()))
            .children_from(rendered_items),
    )
}

pub fn list_item(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let (Block::BulletedListItem(item) | Block::NumberedListItem(item)) = block else {
        return None;
    };
    Some(
        text_element("li", block, &item.content, ctx)
            .children_from(ctx.render_children(block.children())),
    )
}

pub fn to_do(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::ToDo(todo) = block else {
        return None;
    };
    let mut checkbox = RenderedNode::element("input")
        .attr("type", "checkbox")
        .attr("disabled", "");
    if todo.checked {
        checkbox = checkbox.attr("checked", "");
    }
    Some(
        RenderedNode::element("div")
            .class(Some("to-do"))
            .class(ctx.class_for(BlockKind::ToDo))
            .child(checkbox)
            .child(text_element("span", block, &todo.content, ctx))
            .children_from(ctx.render_children(block.children())),
    )
}

pub fn toggle(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Toggle(toggle) = block else {
        return None;
    };
    Some(
        RenderedNode::element("details")
            .class(ctx.class_for(BlockKind::Toggle))
            .child(
                RenderedNode::element("summary")
                    .children_from(ctx.render_rich_text(&toggle.content.rich_text)),
            )
            .children_from(ctx.render_children(block.children())),
    )
}

pub fn quote(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Quote(quote) = block else {
        return None;
    };
    Some(
        text_element("blockquote", block, &quote.content, ctx)
            .children_from(ctx.render_children(block.children())),
    )
}

pub fn callout(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Callout(callout) = block else {
        return None;
    };
    let icon = callout.icon.as_ref().and_then(|icon| match icon {
        Icon::Emoji(emoji) => Some(
            RenderedNode::element("span")
                .class(Some("callout-icon"))
                .child(RenderedNode::text(emoji.as_str())),
        ),
        Icon::External { url } | Icon::File { url } if is_safe_href(url) => Some(
            RenderedNode::element("img")
                .class(Some("callout-icon"))
                .attr("src", url.as_str())
                .attr("alt", ""),
        ),
        Icon::External { url } | Icon::File { url } => {
            log::warn!("callout {} icon has unsupported url '{}'", block.id(), url);
            None
        }
    });
    let body = text_element("div", block, &callout.content, ctx)
        .class(Some("callout-body"))
        .children_from(ctx.render_children(block.children()));
    Some(
        RenderedNode::element("aside")
            .class(Some("callout"))
            .children_from(icon)
            .child(body),
    )
}

pub fn code(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let Block::Code(code) = node.block()? else {
        return None;
    };
    let source = match &code.highlighted {
        Some(markup) => RenderedNode::raw(markup.as_str()),
        None => RenderedNode::text(flatten_plain_text(&code.content.rich_text)),
    };
    let language_class = format!("language-{}", code.language.replace(' ', "-"));
    let pre = RenderedNode::element("pre")
        .class(ctx.class_for(BlockKind::Code))
        .child(
            RenderedNode::element("code")
                .class(Some(&language_class))
                .child(source),
        );

    if code.caption.is_empty() {
        return Some(pre);
    }
    Some(
        RenderedNode::element("figure")
            .child(pre)
            .child(RenderedNode::element("figcaption").children_from(ctx.render_rich_text(&code.caption))),
    )
}

pub fn equation(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let Block::Equation(equation) = node.block()? else {
        return None;
    };
    Some(
        RenderedNode::element("div")
            .class(Some("equation"))
            .class(ctx.class_for(BlockKind::Equation))
            .child(RenderedNode::text(equation.expression.as_str())),
    )
}

pub fn divider(_node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    Some(RenderedNode::element("hr").class(ctx.class_for(BlockKind::Divider)))
}

fn media_url(block: &Block, source: Option<&FileObject>) -> Option<String> {
    match source {
        Some(file) if is_safe_href(file.url()) => Some(file.url().to_string()),
        Some(file) if !file.url().is_empty() => {
            log::warn!(
                "{} block {} has unsupported url '{}'; not rendering it",
                block.block_type(),
                block.id(),
                file.url()
            );
            None
        }
        _ => {
            log::warn!("{} block {} has no url; not rendering it", block.block_type(), block.id());
            None
        }
    }
}

fn figure(media: RenderedNode, caption: Vec<RenderedNode>, class: Option<&str>) -> RenderedNode {
    let figure = RenderedNode::element("figure").class(class).child(media);
    if caption.is_empty() {
        figure
    } else {
        figure.child(RenderedNode::element("figcaption").children_from(caption))
    }
}

pub fn image(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Image(image) = block else {
        return None;
    };
    let url = media_url(block, image.source.as_ref())?;
    let img = RenderedNode::element("img")
        .attr("src", url)
        .attr("alt", flatten_plain_text(&image.caption))
        .attr("loading", "lazy");
    Some(figure(
        img,
        ctx.render_rich_text(&image.caption),
        ctx.class_for(BlockKind::Image),
    ))
}

pub fn video(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Video(video) = block else {
        return None;
    };
    let url = media_url(block, video.source.as_ref())?;
    let player = RenderedNode::element("video")
        .attr("controls", "")
        .attr("preload", "metadata")
        .attr("src", url);
    Some(figure(
        player,
        ctx.render_rich_text(&video.caption),
        ctx.class_for(BlockKind::Video),
    ))
}

pub fn bookmark(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Bookmark(bookmark) = block else {
        return None;
    };
    let Some(url) = bookmark.url.as_deref().filter(|url| !url.is_empty()) else {
        log::warn!("bookmark {} has no url; not rendering it", block.id());
        return None;
    };
    if let Err(e) = ValidatedUrl::parse(url) {
        log::warn!("bookmark {} skipped: {}", block.id(), e);
        return None;
    }
    let label = if bookmark.caption.is_empty() {
        vec![RenderedNode::text(url)]
    } else {
        ctx.render_rich_text(&bookmark.caption)
    };
    Some(
        RenderedNode::element("a")
            .class(Some("bookmark"))
            .class(ctx.class_for(BlockKind::Bookmark))
            .attr("href", url)
            .children_from(label),
    )
}

pub fn column_list(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    Some(
        RenderedNode::element("div")
            .class(Some("column-list"))
            .class(ctx.class_for(BlockKind::ColumnList))
            .children_from(ctx.render_children(block.children())),
    )
}

pub fn column(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    Some(
        RenderedNode::element("div")
            .class(Some("column"))
            .class(ctx.class_for(BlockKind::Column))
            .children_from(ctx.render_children(block.children())),
    )
}

pub fn table(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let block = node.block()?;
    let Block::Table(table) = block else {
        return None;
    };
    let mut rows = ctx.render_children(block.children()).into_iter();
    let mut element = RenderedNode::element("table").class(ctx.class_for(BlockKind::Table));

    if table.has_column_header {
        if let Some(header) = rows.next() {
            element = element.child(RenderedNode::element("thead").child(promote_cells(header, |_| true)));
        }
    }
    let body_rows = rows.map(|row| {
        if table.has_row_header {
            promote_cells(row, |index| index == 0)
        } else {
            row
        }
    });
    Some(element.child(RenderedNode::element("tbody").children_from(body_rows)))
}

/// Turns the selected `<td>` cells of a row into `<th>`.
fn promote_cells(row: RenderedNode, is_header: impl Fn(usize) -> bool) -> RenderedNode {
    match row {
        RenderedNode::Element {
            tag,
            key,
            attributes,
            children,
        } => RenderedNode::Element {
            tag,
            key,
            attributes,
            children: children
                .into_iter()
                .enumerate()
                .map(|(index, cell)| {
                    if is_header(index) {
                        cell.retagged("th")
                    } else {
                        cell
                    }
                })
                .collect(),
        },
        other => other,
    }
}

pub fn table_row(node: &GroupedBlock<'_>, ctx: &RenderContext) -> Option<RenderedNode> {
    let Block::TableRow(row) = node.block()? else {
        return None;
    };
    let cells = row
        .cells
        .iter()
        .map(|cell| RenderedNode::element("td").children_from(ctx.render_rich_text(cell)));
    Some(
        RenderedNode::element("tr")
            .class(ctx.class_for(BlockKind::TableRow))
            .children_from(cells),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CalloutBlock, MediaBlock, TableBlock, TableRowBlock};
    use crate::render::node::nodes_to_html;
    use crate::render::{render_blocks, RenderOverrides};
    use crate::model::BlockCommon;
    use crate::types::{BlockId, RichTextItem};

    fn html(blocks: &[Block]) -> String {
        nodes_to_html(&render_blocks(blocks, None, &RenderOverrides::none()))
    }

    #[test]
    fn lists_wrap_their_items() {
        let blocks = vec![
            Block::bulleted_item("a", "a"),
            Block::bulleted_item("b", "b"),
            Block::numbered_item("one", "one"),
        ];
        assert_eq!(
            html(&blocks),
            "<ul data-block-id=\"list-a\"><li data-block-id=\"a\">a</li><li data-block-id=\"b\">b</li></ul>\
             <ol data-block-id=\"list-one\"><li data-block-id=\"one\">one</li></ol>"
        );
    }

    #[test]
    fn nested_list_items_are_grouped_inside_parent_item() {
        let parent = Block::bulleted_item("p", "parent")
            .with_children(vec![Block::numbered_item("c1", "c1"), Block::numbered_item("c2", "c2")]);
        let rendered = html(&[parent]);
        assert!(rendered.contains("<li data-block-id=\"p\">parent<ol data-block-id=\"list-c1\">"));
        assert!(rendered.contains("<li data-block-id=\"c2\">c2</li></ol></li></ul>"));
    }

    #[test]
    fn headings_carry_slug_ids() {
        assert_eq!(
            html(&[Block::heading(2, "h", "Getting Started")]),
            "<h2 data-block-id=\"h\" id=\"getting-started\">Getting Started</h2>"
        );
    }

    #[test]
    fn media_and_icons_with_script_urls_are_dropped() {
        let image = Block::Image(MediaBlock {
            common: BlockCommon::new(BlockId::from_raw("img")),
            source: Some(FileObject::External {
                url: "javascript:alert(1)".into(),
            }),
            caption: Vec::new(),
        });
        assert_eq!(html(&[image]), "");

        let callout = Block::Callout(CalloutBlock {
            common: BlockCommon::new(BlockId::from_raw("c")),
            content: TextBlockContent::plain("careful"),
            icon: Some(Icon::External {
                url: "javascript:alert(1)".into(),
            }),
        });
        let rendered = html(&[callout]);
        assert!(rendered.contains("careful"));
        assert!(!rendered.contains("<img"));
    }

    #[test]
    fn image_without_url_renders_nothing() {
        let broken = Block::Image(MediaBlock {
            common: BlockCommon::new(BlockId::from_raw("img")),
            source: None,
            caption: Vec::new(),
        });
        assert_eq!(html(&[broken, Block::divider("d")]), "<hr data-block-id=\"d\">");
    }

    #[test]
    fn image_caption_becomes_alt_and_figcaption() {
        let image = Block::Image(MediaBlock {
            common: BlockCommon::new(BlockId::from_raw("img")),
            source: Some(FileObject::External {
                url: "https://cdn/x.png".to_string(),
            }),
            caption: vec![RichTextItem::plain_text("A cat")],
        });
        assert_eq!(
            html(&[image]),
            "<figure data-block-id=\"img\"><img src=\"https://cdn/x.png\" alt=\"A cat\" loading=\"lazy\">\
             <figcaption>A cat</figcaption></figure>"
        );
    }

    #[test]
    fn code_prefers_prepared_markup() {
        let mut block = Block::code("c", "rust", "a<b");
        assert_eq!(
            html(&[block.clone()]),
            "<pre data-block-id=\"c\"><code class=\"language-rust\">a&lt;b</code></pre>"
        );
        if let Block::Code(code) = &mut block {
            code.highlighted = Some("<span class=\"line\">a&lt;b</span>".to_string());
        }
        assert!(html(&[block]).contains("<code class=\"language-rust\"><span class=\"line\">"));
    }

    #[test]
    fn toggle_renders_children_in_details() {
        let toggle = Block::toggle("t", "More", vec![Block::paragraph("p", "inside")]);
        assert_eq!(
            html(&[toggle]),
            "<details data-block-id=\"t\"><summary>More</summary><p data-block-id=\"p\">inside</p></details>"
        );
    }

    #[test]
    fn columns_render_nested_containers() {
        let layout = Block::column_list(
            "cl",
            vec![
                Block::column("c1", vec![Block::paragraph("l", "left")]),
                Block::column("c2", vec![Block::paragraph("r", "right")]),
            ],
        );
        let rendered = html(&[layout]);
        assert!(rendered.starts_with("<div data-block-id=\"cl\" class=\"column-list\">"));
        assert!(rendered.contains("<div data-block-id=\"c2\" class=\"column\"><p data-block-id=\"r\">right</p></div>"));
    }

    #[test]
    fn tables_promote_header_cells() {
        let row = |id: &str, a: &str, b: &str| {
            Block::TableRow(TableRowBlock {
                common: BlockCommon::new(BlockId::from_raw(id)),
                cells: vec![vec![RichTextItem::plain_text(a)], vec![RichTextItem::plain_text(b)]],
            })
        };
        let table = Block::Table(TableBlock {
            common: BlockCommon::new(BlockId::from_raw("t"))
                .with_children(vec![row("r1", "Name", "Qty"), row("r2", "Gin", "50ml")]),
            table_width: 2,
            has_column_header: true,
            has_row_header: false,
        });
        let rendered = html(&[table]);
        assert!(rendered.contains("<thead><tr data-block-id=\"r1\"><th>Name</th><th>Qty</th></tr></thead>"));
        assert!(rendered.contains("<tbody><tr data-block-id=\"r2\"><td>Gin</td><td>50ml</td></tr></tbody>"));
    }

    #[test]
    fn to_do_marks_checked_items() {
        let rendered = html(&[Block::to_do("t", "done", true)]);
        assert!(rendered.contains("<input type=\"checkbox\" disabled=\"\" checked=\"\">"));
    }

    #[test]
    fn bookmark_without_caption_shows_url() {
        assert_eq!(
            html(&[Block::bookmark("b", "https://rust-lang.org")]),
            "<a data-block-id=\"b\" class=\"bookmark\" href=\"https://rust-lang.org\">https://rust-lang.org</a>"
        );
    }

    #[test]
    fn bookmark_with_script_url_renders_nothing() {
        assert_eq!(html(&[Block::bookmark("b", "javascript:alert(1)")]), "");
    }
}
