//! Backoff for backend calls that never reached the server.
//!
//! Only connection failures and timeouts are retried. A request that could
//! not be built, a redirect loop, a body error or any HTTP status goes back
//! to the caller on the first attempt; the backend either saw the request or
//! never will.

use std::time::Duration;

/// Retries after the first attempt.
const MAX_RETRIES: u32 = 3;

/// First backoff; doubles per retry (200ms, 400ms, 800ms).
const BASE_DELAY: Duration = Duration::from_millis(200);

/// Whether `err` means the request did not get through.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

/// Send a request built by `f`, retrying transient failures with backoff.
///
/// `f` is called once per attempt and must build a fresh request each time;
/// multipart bodies cannot be replayed.
pub(crate) async fn retry_send<F, Fut>(endpoint: &str, f: F) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut retries = 0;
    loop {
        let err = match f().await {
            Ok(resp) => return Ok(resp),
            Err(err) => err,
        };
        if !is_transient(&err) {
            tracing::debug!(endpoint, error = %err, "backend request failed; not retryable");
            return Err(err);
        }
        if retries == MAX_RETRIES {
            tracing::warn!(endpoint, attempts = retries + 1, error = %err, "backend unreachable; giving up");
            return Err(err);
        }

        let delay = BASE_DELAY * 2u32.pow(retries);
        retries += 1;
        tracing::warn!(endpoint, retry = retries, ?delay, error = %err, "backend unreachable; retrying");
        tokio::time::sleep(delay).await;
    }
}
