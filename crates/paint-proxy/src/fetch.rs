//! Timeout-bounded remote fetch with a body size cap.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use futures_util::StreamExt;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("timed out after {0} ms")]
    Timeout(u64),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("body exceeds {0} bytes")]
    TooLarge(usize),
}

#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// GET `url`, reading at most `max_bytes` of body.
///
/// The timeout covers the whole exchange, body included; on expiry the
/// in-flight request is dropped.
pub async fn fetch_with_timeout(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    max_bytes: usize,
) -> Result<Fetched, FetchError> {
    match tokio::time::timeout(timeout, fetch(client, url, max_bytes)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout.as_millis() as u64)),
    }
}

async fn fetch(client: &reqwest::Client, url: &str, max_bytes: usize) -> Result<Fetched, FetchError> {
    let res = client.get(url).send().await?;
    let status = res.status();
    let headers = res.headers().clone();
    let body = read_body_up_to(res, max_bytes).await?;
    Ok(Fetched {
        status,
        headers,
        body,
    })
}

/// Collect the body, giving up as soon as it grows past `max_bytes`.
pub async fn read_body_up_to(res: reqwest::Response, max_bytes: usize) -> Result<Bytes, FetchError> {
    if res.content_length().is_some_and(|n| n > max_bytes as u64) {
        return Err(FetchError::TooLarge(max_bytes));
    }

    let mut buf: Vec<u8> = Vec::new();
    let mut stream = res.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if buf.len() + chunk.len() > max_bytes {
            return Err(FetchError::TooLarge(max_bytes));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}
