// src/api/pagination.rs
//! Cursor pagination over Notion list endpoints.

use super::responses::PaginatedResponse;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;

/// Items collected across all fetched pages.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
}

/// Follows `next_cursor` until the endpoint reports no more results.
///
/// `fetch_fn` receives the page size and the cursor of the previous page
/// (`None` for the first request). `max_pages` caps the number of requests.
pub async fn fetch_all_pages<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let response = fetch_fn(NOTION_API_PAGE_SIZE as u32, cursor).await?;
        pages_fetched += 1;

        cursor = response.next_cursor;
        all_items.extend(response.results);

        if !response.has_more || cursor.is_none() {
            break;
        }
    }

    log::trace!("Fetched {} items in {} requests", all_items.len(), pages_fetched);
    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
    })
}
