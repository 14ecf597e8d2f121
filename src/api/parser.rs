// src/api/parser.rs
//! Conversion of Notion API responses into the domain model.
//!
//! Unknown block types become `Block::Unsupported` carrying their tag, and
//! missing or malformed payload fields fall back to empty values. Only a
//! response that is not a block/page at all is an error.

use super::client::ApiResponse;
use super::responses::{
    ErrorBody, PaginatedResponse, WireBlock, WireIcon, WirePage, WirePayload, WireProperty,
    WireRichText,
};
use crate::error::{AppError, NotionErrorCode};
use crate::model::*;
use crate::types::{
    Annotations, BlockId, Color, Link, PageId, PropertyName, RichTextItem, RichTextType,
};
use indexmap::IndexMap;
use serde_json::Value;

/// Deserializes a successful response or maps the error body.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if !result.status.is_success() {
        return Err(parse_error(&result));
    }
    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse(format!("{} (from {})", e, result.url))
    })
}

fn parse_error(result: &ApiResponse<String>) -> AppError {
    match serde_json::from_str::<ErrorBody>(&result.data) {
        Ok(body) => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&body.code),
            message: body.message,
            status: result.status,
        },
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(result.status.as_u16()),
            message: format!("HTTP {} from {}", result.status, result.url),
            status: result.status,
        },
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    let page: WirePage = parse_api_response(result)?;
    Ok(convert_page(page))
}

pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: PaginatedResponse<WireBlock> = parse_api_response(result)?;
    Ok(PaginatedResponse {
        object: response.object,
        results: response.results.into_iter().map(convert_block).collect(),
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, AppError> {
    let response: PaginatedResponse<WirePage> = parse_api_response(result)?;
    Ok(PaginatedResponse {
        object: response.object,
        results: response.results.into_iter().map(convert_page).collect(),
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Parses one block object.
pub fn parse_block(json: &str) -> Result<Block, AppError> {
    let wire: WireBlock = serde_json::from_str(json)?;
    Ok(convert_block(wire))
}

/// Parses a JSON array of block objects.
pub fn parse_blocks(json: &str) -> Result<Vec<Block>, AppError> {
    let wire: Vec<WireBlock> = serde_json::from_str(json)?;
    Ok(wire.into_iter().map(convert_block).collect())
}

/// Parses a page dump: a page object with its block tree inlined under
/// `blocks`, each block's children under `children`.
pub fn parse_page_dump(json: &str) -> Result<Page, AppError> {
    let wire: WirePage = serde_json::from_str(json)?;
    Ok(convert_page(wire))
}

pub fn convert_page(wire: WirePage) -> Page {
    let mut title = String::new();
    let mut properties = IndexMap::with_capacity(wire.properties.len());
    for (name, property) in wire.properties {
        let value = convert_property(&name, property);
        if let PropertyValue::Title(items) = &value {
            title = crate::types::flatten_plain_text(items);
        }
        properties.insert(PropertyName::new(name), value);
    }

    Page {
        id: PageId::from_raw(wire.id),
        title,
        url: wire.url,
        properties,
        blocks: wire.blocks.into_iter().map(convert_block).collect(),
    }
}

fn convert_property(name: &str, property: WireProperty) -> PropertyValue {
    let value = property
        .values
        .get(&property.property_type)
        .cloned()
        .unwrap_or(Value::Null);

    match property.property_type.as_str() {
        "title" => PropertyValue::Title(rich_text_from_value(value)),
        "rich_text" => PropertyValue::RichText(rich_text_from_value(value)),
        "select" | "status" => PropertyValue::Select(option_name(&value)),
        "multi_select" => PropertyValue::MultiSelect(
            value
                .as_array()
                .map(|options| options.iter().filter_map(option_name).collect())
                .unwrap_or_default(),
        ),
        "checkbox" => PropertyValue::Checkbox(value.as_bool().unwrap_or(false)),
        "number" => PropertyValue::Number(value.as_f64()),
        "date" => PropertyValue::Date(
            value
                .get("start")
                .and_then(Value::as_str)
                .and_then(|start| parse_date(name, start)),
        ),
        "url" => PropertyValue::Url(value.as_str().map(str::to_string)),
        other => PropertyValue::Other(other.to_string()),
    }
}

fn option_name(value: &Value) -> Option<String> {
    value.get("name").and_then(Value::as_str).map(str::to_string)
}

/// Accepts both plain dates and full timestamps.
fn parse_date(property: &str, start: &str) -> Option<chrono::NaiveDate> {
    let date_part = start.get(..10).unwrap_or(start);
    match chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            log::warn!("Ignoring unparseable date '{}' in {}: {}", start, property, e);
            None
        }
    }
}

fn rich_text_from_value(value: Value) -> Vec<RichTextItem> {
    match serde_json::from_value::<Vec<WireRichText>>(value) {
        Ok(items) => convert_rich_text(items),
        Err(e) => {
            log::debug!("Unreadable rich text: {}", e);
            Vec::new()
        }
    }
}

pub fn convert_rich_text(items: Vec<WireRichText>) -> Vec<RichTextItem> {
    items.into_iter().map(convert_span).collect()
}

fn convert_span(wire: WireRichText) -> RichTextItem {
    let text_type = match wire.text_type.as_str() {
        "equation" => RichTextType::Equation {
            expression: wire
                .equation
                .map(|eq| eq.expression)
                .unwrap_or_else(|| wire.plain_text.clone()),
        },
        "mention" => RichTextType::Mention {
            mention_type: wire
                .mention
                .as_ref()
                .and_then(|m| m.get("type"))
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
        },
        _ => {
            let text = wire.text.unwrap_or_default();
            RichTextType::Text {
                content: if text.content.is_empty() {
                    wire.plain_text.clone()
                } else {
                    text.content
                },
                link: text.link.map(|link| Link { url: link.url }),
            }
        }
    };

    RichTextItem {
        text_type,
        annotations: Annotations {
            bold: wire.annotations.bold,
            italic: wire.annotations.italic,
            strikethrough: wire.annotations.strikethrough,
            underline: wire.annotations.underline,
            code: wire.annotations.code,
            color: Color::from_wire(&wire.annotations.color),
        },
        plain_text: wire.plain_text,
        href: wire.href,
    }
}

fn payload_of(wire: &WireBlock) -> WirePayload {
    match wire.payloads.get(&wire.block_type) {
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            log::warn!(
                "Malformed {} payload on block {}: {}; using empty payload",
                wire.block_type,
                wire.id,
                e
            );
            WirePayload::default()
        }),
        None => WirePayload::default(),
    }
}

fn text_content(payload: &mut WirePayload) -> TextBlockContent {
    TextBlockContent {
        rich_text: convert_rich_text(std::mem::take(&mut payload.rich_text)),
        color: payload
            .color
            .as_deref()
            .map(Color::from_wire)
            .unwrap_or_default(),
    }
}

fn file_object(payload: &mut WirePayload) -> Option<FileObject> {
    if let Some(external) = payload.external.take() {
        return Some(FileObject::External { url: external.url });
    }
    payload.file.take().map(|file| FileObject::File {
        url: file.url,
        expiry_time: file.expiry_time,
    })
}

fn icon(wire: WireIcon) -> Option<Icon> {
    match wire.icon_type.as_str() {
        "emoji" => wire.emoji.map(Icon::Emoji),
        "external" => wire.external.map(|e| Icon::External { url: e.url }),
        "file" => wire.file.map(|f| Icon::File { url: f.url }),
        _ => None,
    }
}

/// Converts one wire block and its inlined children.
pub fn convert_block(wire: WireBlock) -> Block {
    let kind: BlockKind = wire.block_type.parse().unwrap_or(BlockKind::Unsupported);
    let mut payload = payload_of(&wire);
    let WireBlock {
        id,
        block_type,
        has_children,
        archived,
        children,
        ..
    } = wire;

    let common = BlockCommon {
        id: BlockId::from_raw(id),
        children: children.into_iter().map(convert_block).collect(),
        has_children,
        archived,
    };

    match kind {
        BlockKind::Paragraph => Block::Paragraph(ParagraphBlock {
            common,
            content: text_content(&mut payload),
        }),
        BlockKind::Heading1 | BlockKind::Heading2 | BlockKind::Heading3 => {
            let heading = HeadingBlock {
                common,
                content: text_content(&mut payload),
                is_toggleable: payload.is_toggleable,
                anchor: None,
            };
            match kind {
                BlockKind::Heading1 => Block::Heading1(heading),
                BlockKind::Heading2 => Block::Heading2(heading),
                _ => Block::Heading3(heading),
            }
        }
        BlockKind::BulletedListItem => Block::BulletedListItem(ListItemBlock {
            common,
            content: text_content(&mut payload),
        }),
        BlockKind::NumberedListItem => Block::NumberedListItem(ListItemBlock {
            common,
            content: text_content(&mut payload),
        }),
        BlockKind::ToDo => Block::ToDo(ToDoBlock {
            common,
            content: text_content(&mut payload),
            checked: payload.checked,
        }),
        BlockKind::Toggle => Block::Toggle(ToggleBlock {
            common,
            content: text_content(&mut payload),
        }),
        BlockKind::Quote => Block::Quote(QuoteBlock {
            common,
            content: text_content(&mut payload),
        }),
        BlockKind::Callout => Block::Callout(CalloutBlock {
            common,
            icon: payload.icon.take().and_then(icon),
            content: text_content(&mut payload),
        }),
        BlockKind::Code => Block::Code(CodeBlock {
            common,
            language: payload
                .language
                .take()
                .unwrap_or_else(|| "plain text".to_string()),
            caption: convert_rich_text(std::mem::take(&mut payload.caption)),
            content: text_content(&mut payload),
            highlighted: None,
        }),
        BlockKind::Equation => Block::Equation(EquationBlock {
            common,
            expression: payload.expression.take().unwrap_or_default(),
        }),
        BlockKind::Divider => Block::Divider(BareBlock { common }),
        BlockKind::Breadcrumb => Block::Breadcrumb(BareBlock { common }),
        BlockKind::TableOfContents => Block::TableOfContents(BareBlock { common }),
        BlockKind::ColumnList => Block::ColumnList(BareBlock { common }),
        BlockKind::Column => Block::Column(BareBlock { common }),
        BlockKind::Image | BlockKind::Video | BlockKind::File | BlockKind::Pdf => {
            let media = MediaBlock {
                common,
                source: file_object(&mut payload),
                caption: convert_rich_text(std::mem::take(&mut payload.caption)),
            };
            match kind {
                BlockKind::Image => Block::Image(media),
                BlockKind::Video => Block::Video(media),
                BlockKind::File => Block::File(media),
                _ => Block::Pdf(media),
            }
        }
        BlockKind::Bookmark | BlockKind::Embed | BlockKind::LinkPreview => {
            let link = LinkBlock {
                common,
                url: payload.url.take(),
                caption: convert_rich_text(std::mem::take(&mut payload.caption)),
            };
            match kind {
                BlockKind::Bookmark => Block::Bookmark(link),
                BlockKind::Embed => Block::Embed(link),
                _ => Block::LinkPreview(link),
            }
        }
        BlockKind::ChildPage => Block::ChildPage(ChildPageBlock {
            common,
            title: payload.title.take().unwrap_or_default(),
        }),
        BlockKind::LinkToPage => Block::LinkToPage(LinkToPageBlock {
            common,
            page_id: payload.page_id.take().map(PageId::from_raw),
        }),
        BlockKind::Table => Block::Table(TableBlock {
            common,
            table_width: payload.table_width,
            has_column_header: payload.has_column_header,
            has_row_header: payload.has_row_header,
        }),
        BlockKind::TableRow => Block::TableRow(TableRowBlock {
            common,
            cells: std::mem::take(&mut payload.cells)
                .into_iter()
                .map(convert_rich_text)
                .collect(),
        }),
        BlockKind::Synced => Block::Synced(SyncedBlock {
            common,
            synced_from: payload
                .synced_from
                .take()
                .and_then(|from| from.block_id)
                .map(BlockId::from_raw),
        }),
        BlockKind::Unsupported | BlockKind::BulletedList | BlockKind::NumberedList => {
            log::debug!("Unsupported block type '{}'", block_type);
            Block::Unsupported(UnsupportedBlock { common, block_type })
        }
    }
}
