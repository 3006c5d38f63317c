use core::future::Future;
use std::time::Duration;

use rand::Rng;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{BankwireError, RetryConfig};

const BODY_EXCERPT_CHARS: usize = 512;

/// Add up to `jitter_percent` of random delay on top of `base_ms`.
#[must_use]
pub fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms + rng.random_range(0..jitter_range)
}

/// Run `op` until it succeeds, fails permanently, or attempts run out.
///
/// Only `TransientNetwork` failures (connection errors, timeouts, 5xx, 429)
/// are retried, with exponential backoff and jitter between attempts. Any
/// other error propagates immediately. A transient error that survives the
/// last attempt is returned as `Upstream`.
///
/// # Errors
/// Returns the first permanent error, or the last transient one converted
/// to `BankwireError::Upstream`.
pub async fn with_retry<T, F, Fut>(policy: &RetryConfig, mut op: F) -> Result<T, BankwireError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BankwireError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if e.is_transient() && attempt + 1 < attempts => {
                let wait = jitter_wait(policy.base_delay_ms(attempt), policy.jitter_percent);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "bankwire::http",
                    attempt = attempt + 1,
                    wait_ms = wait,
                    error = %e,
                    "transient failure, retrying"
                );
                tokio::time::sleep(Duration::from_millis(wait)).await;
                attempt += 1;
            }
            Err(e) => return Err(e.into_terminal()),
        }
    }
}

/// Fetch every page of an offset-paginated listing.
///
/// `fetch_page(offset, count)` is called with increasing offsets until a
/// page returns fewer than `page_size` items. Pages are fetched strictly in
/// sequence and each fetch is wrapped in [`with_retry`].
///
/// # Errors
/// Returns the first page error after retries; no partial result is returned.
pub async fn paginate<T, F, Fut>(
    policy: &RetryConfig,
    page_size: usize,
    mut fetch_page: F,
) -> Result<Vec<T>, BankwireError>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, BankwireError>>,
{
    let page_size = page_size.max(1);
    let mut items = Vec::new();
    let mut offset = 0usize;
    loop {
        let page = with_retry(policy, || fetch_page(offset, page_size)).await?;
        let returned = page.len();
        items.extend(page);
        if returned < page_size {
            break;
        }
        offset += returned;
    }
    Ok(items)
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPage<T> {
    /// Items of this page.
    pub items: Vec<T>,
    /// Opaque cursor for the next page.
    pub next_cursor: Option<String>,
    /// Whether the upstream reports more pages.
    pub has_more: bool,
}

/// Fetch every page of a cursor-paginated listing.
///
/// Follows `next_cursor` until the upstream reports no more pages.
///
/// # Errors
/// Returns the first page error after retries; no partial result is returned.
/// A page that reports more data without handing out a new cursor (missing,
/// empty or repeated) fails the listing with `Transform`.
pub async fn paginate_cursor<T, F, Fut>(
    provider: &str,
    policy: &RetryConfig,
    mut fetch_page: F,
) -> Result<Vec<T>, BankwireError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>, BankwireError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = with_retry(policy, || fetch_page(cursor.clone())).await?;
        items.extend(page.items);
        if !page.has_more {
            break;
        }
        match page.next_cursor {
            Some(next) if !next.is_empty() && cursor.as_deref() != Some(next.as_str()) => {
                cursor = Some(next);
            }
            _ => {
                return Err(BankwireError::transform(
                    provider,
                    "has_more without a new cursor",
                ));
            }
        }
    }
    Ok(items)
}

/// Map an HTTP status to an error, or `None` for success.
#[must_use]
pub fn classify_status(provider: &str, status: StatusCode, body: &str) -> Option<BankwireError> {
    if status.is_success() {
        return None;
    }
    let msg = excerpt(body, status);
    let code = Some(status.as_u16());
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Some(BankwireError::transient(provider, code, msg))
    } else {
        Some(BankwireError::upstream(provider, code, msg))
    }
}

/// Map a transport-level reqwest failure.
#[must_use]
pub fn map_transport_error(provider: &str, err: &reqwest::Error) -> BankwireError {
    if err.is_decode() {
        BankwireError::transform(provider, err.to_string())
    } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        BankwireError::transient(provider, err.status().map(|s| s.as_u16()), err.to_string())
    } else {
        BankwireError::upstream(provider, err.status().map(|s| s.as_u16()), err.to_string())
    }
}

/// Send a request and decode a JSON body.
///
/// # Errors
/// Transport failures, 5xx and 429 map to `TransientNetwork`; other non-2xx
/// statuses to `Upstream`; undecodable bodies to `Transform`.
pub async fn send_json<T: DeserializeOwned>(
    provider: &str,
    req: RequestBuilder,
) -> Result<T, BankwireError> {
    let body = send_checked(provider, req).await?;
    let bytes = body
        .bytes()
        .await
        .map_err(|e| map_transport_error(provider, &e))?;
    serde_json::from_slice(&bytes).map_err(|e| BankwireError::transform(provider, e.to_string()))
}

/// Send a request and discard the body of a successful response.
///
/// # Errors
/// Same mapping as [`send_json`], without the decode step.
pub async fn send_empty(provider: &str, req: RequestBuilder) -> Result<(), BankwireError> {
    send_checked(provider, req).await.map(|_| ())
}

/// Send a request that is never retried and decode a JSON body.
///
/// Used for calls with side effects (session exchange, consent creation,
/// item removal) where a second attempt is unsafe.
///
/// # Errors
/// Same mapping as [`send_json`], except that transient failures surface as
/// `Upstream`.
pub async fn send_json_once<T: DeserializeOwned>(
    provider: &str,
    req: RequestBuilder,
) -> Result<T, BankwireError> {
    send_json(provider, req)
        .await
        .map_err(BankwireError::into_terminal)
}

/// Send a request that is never retried and discard the body.
///
/// # Errors
/// Same mapping as [`send_json_once`].
pub async fn send_empty_once(provider: &str, req: RequestBuilder) -> Result<(), BankwireError> {
    send_empty(provider, req)
        .await
        .map_err(BankwireError::into_terminal)
}

async fn send_checked(provider: &str, req: RequestBuilder) -> Result<Response, BankwireError> {
    let resp = req
        .send()
        .await
        .map_err(|e| map_transport_error(provider, &e))?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(classify_status(provider, status, &body)
        .unwrap_or_else(|| BankwireError::upstream(provider, Some(status.as_u16()), body)))
}

fn excerpt(body: &str, status: StatusCode) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status.to_string();
    }
    trimmed.chars().take(BODY_EXCERPT_CHARS).collect()
}
