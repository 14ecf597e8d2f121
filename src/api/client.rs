// src/api/client.rs
//! Thin HTTP client for the Notion API.
//!
//! Handles authentication headers, request logging and transient-error
//! retries. Parsing lives in `parser`.

use super::pagination::fetch_all_pages;
use super::parser::{parse_blocks_pagination, parse_page_response, parse_pages_pagination};
use crate::constants::{
    NOTION_API_BASE_URL, NOTION_API_VERSION, NOTION_RETRY_ATTEMPTS, NOTION_RETRY_BASE_DELAY_MS,
};
use crate::error::AppError;
use crate::error_recovery::retry_with_backoff;
use crate::model::{Block, Page};
use crate::types::{ApiKey, DatabaseId, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, NOTION_API_BASE_URL)
    }

    /// Same as [`new`](Self::new) against another endpoint.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );
        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to `endpoint` (a path below the base URL).
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    async fn get_text(&self, endpoint: &str, query: &[(&str, String)]) -> Result<ApiResponse<String>, AppError> {
        let response = self.get(endpoint, query).await?;
        extract_response_text(response).await
    }

    async fn post_text(&self, endpoint: &str, body: &Value) -> Result<ApiResponse<String>, AppError> {
        let response = self.post(endpoint, body).await?;
        extract_response_text(response).await
    }
}

/// Retries `operation` on rate limits and server errors.
async fn with_retries<T, F, Fut>(operation: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    retry_with_backoff(
        operation,
        NOTION_RETRY_ATTEMPTS,
        Duration::from_millis(NOTION_RETRY_BASE_DELAY_MS),
        Duration::from_secs(10),
    )
    .await
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, AppError> {
        let endpoint = format!("pages/{}", id.to_hyphenated());
        let endpoint = endpoint.as_str();
        with_retries(|| async move {
            let result = self.get_text(endpoint, &[]).await?;
            parse_page_response(result)
        })
        .await
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let result = fetch_all_pages(
            |page_size, cursor| {
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let (endpoint, query) = (endpoint.as_str(), query.as_slice());
                    with_retries(|| async move {
                        let result = self.get_text(endpoint, query).await?;
                        parse_blocks_pagination(result)
                    })
                    .await
                }
            },
            None,
        )
        .await?;
        Ok(result.items)
    }

    async fn query_rows(
        &self,
        database: &DatabaseId,
        filter: Option<Value>,
        sorts: Vec<Value>,
    ) -> Result<Vec<Page>, AppError> {
        let endpoint = format!("databases/{}/query", NotionId::from(database).to_hyphenated());
        let result = fetch_all_pages(
            |page_size, cursor| {
                let endpoint = endpoint.clone();
                let body = query_body(page_size, cursor, filter.as_ref(), &sorts);
                async move {
                    let (endpoint, body) = (endpoint.as_str(), &body);
                    with_retries(|| async move {
                        let result = self.post_text(endpoint, body).await?;
                        parse_pages_pagination(result)
                    })
                    .await
                }
            },
            None,
        )
        .await?;
        Ok(result.items)
    }
}

/// Request body of a database query.
pub(super) fn query_body(
    page_size: u32,
    cursor: Option<String>,
    filter: Option<&Value>,
    sorts: &[Value],
) -> Value {
    let mut body = serde_json::json!({ "page_size": page_size });
    if let Some(cursor) = cursor {
        body["start_cursor"] = Value::String(cursor);
    }
    if let Some(filter) = filter {
        body["filter"] = filter.clone();
    }
    if !sorts.is_empty() {
        body["sorts"] = Value::Array(sorts.to_vec());
    }
    body
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Reads the response body as text, keeping status and URL.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
