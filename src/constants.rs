// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Maximum nesting depth when resolving a page's block tree.
pub const NOTION_MAX_FETCH_DEPTH: u8 = 50;

/// Children requests allowed in flight at once while resolving one tree.
///
/// Notion rate-limits integrations to about three requests per second on
/// average; bursts above this mostly come back as 429s.
pub const NOTION_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Notion API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Attempts made for a request that fails with a transient error.
pub const NOTION_RETRY_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles on every further attempt.
pub const NOTION_RETRY_BASE_DELAY_MS: u64 = 500;

// ---------------------------------------------------------------------------
// Rendering boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when recursively rendering container blocks.
///
/// The fetch depth already bounds real trees; this guards hand-built ones.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 100;

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters of HTML per block, used to pre-allocate output.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;
