// src/lib.rs
//! notion2html library: renders Notion block trees into HTML pages.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `PipelineConfig`, `PageKind`
//! - **Domain model**: `Page`, `Block`, `BlockKind`, `PresentationProperties`
//! - **Transform**: `group_blocks`, `partition`, `prepare_blocks`
//! - **Rendering**: `render_blocks`, `RenderContext`, `HandlerRegistry`
//! - **Pages**: `compose_article`, `compose_deck`, `compose_recipe`
//! - **API client**: `NotionHttpClient`, `resolve_block_tree`, parsers

pub mod analytics;
pub mod api;
pub mod config;
pub mod constants;
pub mod error;
mod error_recovery;
pub mod model;
pub mod output;
pub mod pages;
pub mod pipeline;
pub mod render;
pub mod transform;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, ContentOrigin, PageKind, PipelineConfig};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, BlockKind, Page, PresentationProperties, PropertyValue, Theme, Transition,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, Color, DatabaseId, NotionId, PageId, PropertyName,
    RichTextItem,
};

// --- Transform ---
pub use crate::transform::{
    group_blocks, group_nodes, partition, prepare_blocks, CodeHighlighter, GroupedBlock,
    HiddenHeadingMatch, ListKind, MarkerLevels, PartitionConfig, PlainHighlighter, Section,
    SubSection,
};

// --- Rendering ---
pub use crate::render::{
    nodes_to_html, render_blocks, BlockHandler, ClassMap, HandlerRegistry, RenderContext,
    RenderOverrides, RenderedNode,
};

// --- Pages ---
pub use crate::pages::{
    compose_article, compose_deck, compose_recipe, Article, ArticleKind, Deck, Document, Recipe,
    Slide,
};

// --- API Client ---
pub use crate::api::{fetch_page_tree, resolve_block_tree, NotionHttpClient, NotionRepository};

// --- Pipeline Traits ---
pub use crate::pipeline::{ContentSource, DocumentDelivery, NotionToHtml, PageComposer};
