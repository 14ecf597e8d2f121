// src/error_recovery.rs
//! Retry with exponential backoff for API operations.

use crate::error::AppError;
use std::time::Duration;

/// Retries an async operation with exponential backoff.
///
/// Only errors reporting [`AppError::is_retryable`] are retried; anything
/// else is returned immediately. `max_attempts` of zero is treated as one.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut delay = initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < max_attempts && e.is_retryable() => {
                log::warn!(
                    "Attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotionErrorCode;
    use std::cell::Cell;

    fn rate_limited() -> AppError {
        AppError::NotionService {
            code: NotionErrorCode::RateLimited,
            message: "slow down".to_string(),
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
        }
    }

    #[tokio::test]
    async fn retries_transient_errors_then_succeeds() {
        let calls = Cell::new(0);
        let result = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                let outcome = if calls.get() < 3 { Err(rate_limited()) } else { Ok(42) };
                async move { outcome }
            },
            3,
            Duration::from_millis(1),
            Duration::from_millis(2),
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = Cell::new(0);
        let result: Result<(), _> = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                async { Err(rate_limited()) }
            },
            2,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .await;

        assert!(result.unwrap_err().is_retryable());
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), _> = retry_with_backoff(
            || {
                calls.set(calls.get() + 1);
                async { Err(AppError::InvalidId("nope".into())) }
            },
            5,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .await;

        assert!(matches!(result, Err(AppError::InvalidId(_))));
        assert_eq!(calls.get(), 1);
    }
}
