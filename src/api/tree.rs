// src/api/tree.rs
//! Resolves a page's complete block tree before it enters the transform.
//!
//! The list-children endpoint only returns one level. Every block reporting
//! `has_children` gets its own request, issued concurrently with its
//! siblings; a semaphore shared by the whole tree caps how many requests
//! are in flight. Transform code never sees a partially loaded tree.

use super::NotionRepository;
use crate::constants::NOTION_MAX_CONCURRENT_REQUESTS;
use crate::error::AppError;
use crate::model::{Block, Page};
use crate::types::NotionId;
use futures::future::{try_join_all, BoxFuture};
use futures::FutureExt;
use tokio::sync::Semaphore;

/// Fetches the page and its block tree down to `max_depth` levels.
pub async fn fetch_page_tree(
    repo: &dyn NotionRepository,
    id: &NotionId,
    max_depth: u8,
) -> Result<Page, AppError> {
    let page = repo.retrieve_page(id).await?;
    let blocks = resolve_block_tree(repo, id, max_depth).await?;
    log::info!("Fetched '{}' with {} top-level blocks", page.title, blocks.len());
    Ok(page.with_blocks(blocks))
}

/// Fetches the children of `parent` and, recursively, their children.
///
/// Blocks below `max_depth` keep `has_children` but no loaded children.
/// Child pages are never descended into; they are separate documents.
pub async fn resolve_block_tree(
    repo: &dyn NotionRepository,
    parent: &NotionId,
    max_depth: u8,
) -> Result<Vec<Block>, AppError> {
    resolve_block_tree_bounded(repo, parent, max_depth, NOTION_MAX_CONCURRENT_REQUESTS).await
}

/// [`resolve_block_tree`] with at most `max_in_flight` children requests
/// running at any moment, across all levels.
pub async fn resolve_block_tree_bounded(
    repo: &dyn NotionRepository,
    parent: &NotionId,
    max_depth: u8,
    max_in_flight: usize,
) -> Result<Vec<Block>, AppError> {
    let limit = Semaphore::new(max_in_flight.max(1));
    resolve_level(repo, &limit, parent.clone(), 1, max_depth).await
}

fn resolve_level<'a>(
    repo: &'a dyn NotionRepository,
    limit: &'a Semaphore,
    parent: NotionId,
    depth: u8,
    max_depth: u8,
) -> BoxFuture<'a, Result<Vec<Block>, AppError>> {
    async move {
        let blocks = {
            // The semaphore is never closed, so acquiring cannot fail.
            let _permit = limit.acquire().await.ok();
            repo.retrieve_children(&parent).await?
        };
        log::debug!(
            "Loaded {} children of {} at depth {}",
            blocks.len(),
            parent,
            depth
        );

        if depth >= max_depth {
            if blocks.iter().any(needs_children) {
                log::warn!(
                    "Depth limit {} reached below {}; deeper blocks are left unloaded",
                    max_depth,
                    parent
                );
            }
            return Ok(blocks);
        }

        try_join_all(blocks.into_iter().map(|block| async move {
            if !needs_children(&block) {
                return Ok(block);
            }
            let children =
                resolve_level(repo, limit, children_source(&block), depth + 1, max_depth).await?;
            Ok::<_, AppError>(block.with_children(children))
        }))
        .await
    }
    .boxed()
}

fn needs_children(block: &Block) -> bool {
    block.has_children() && block.children().is_empty() && !matches!(block, Block::ChildPage(_))
}

/// A synced reference block lists the original block's children.
fn children_source(block: &Block) -> NotionId {
    match block {
        Block::Synced(synced) => synced
            .synced_from
            .as_ref()
            .map(NotionId::from)
            .unwrap_or_else(|| NotionId::from(block.id())),
        _ => NotionId::from(block.id()),
    }
}
