//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details.
//! Everything fetched here is fully resolved before the transform runs.

pub mod client;
mod pagination;
pub mod parser;
mod responses;
mod tree;

use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::{DatabaseId, NotionId};
use serde_json::Value;

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError>;

    /// One level of children, all pages of the listing.
    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError>;

    /// Rows of a database, optionally filtered and sorted with Notion's
    /// query JSON.
    async fn query_rows(
        &self,
        database: &DatabaseId,
        filter: Option<Value>,
        sorts: Vec<Value>,
    ) -> Result<Vec<Page>, AppError>;
}

pub use client::NotionHttpClient;
pub use pagination::{fetch_all_pages, PaginationResult};
pub use responses::PaginatedResponse;
pub use tree::{fetch_page_tree, resolve_block_tree, resolve_block_tree_bounded};
