// AssetLookup - platform/http.rs
//
// One-shot HTTP(S) download of a CSV source.
// Blocking client: callers run this on the loader thread, never the UI thread.
// No retries; a failed fetch is reported once and the user can Reload.

use crate::util::constants;
use crate::util::error::FetchError;
use std::io::Read;
use std::time::Duration;

/// Download `url` and return the body as text.
///
/// Non-success statuses are errors. Bodies larger than `max_bytes` are
/// rejected: up front from Content-Length when the server sends it, and
/// otherwise by reading at most `max_bytes + 1` bytes of the body.
pub fn fetch_text(url: &str, timeout: Duration, max_bytes: u64) -> Result<String, FetchError> {
    let request_err = |source: reqwest::Error| FetchError::Request {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(format!(
            "{}/{}",
            constants::APP_NAME,
            constants::APP_VERSION
        ))
        .build()
        .map_err(request_err)?;

    tracing::debug!(url, timeout_secs = timeout.as_secs(), "HTTP GET");

    let response = client.get(url).send().map_err(request_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if let Some(len) = response.content_length() {
        if len > max_bytes {
            return Err(FetchError::TooLarge {
                size: len,
                max: max_bytes,
            });
        }
    }

    // Content-Length is optional (chunked responses); cap the read itself.
    let mut body = Vec::new();
    response
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
    if body.len() as u64 > max_bytes {
        tracing::warn!(url, max_bytes, "Response body exceeds size limit; aborting");
        return Err(FetchError::TooLarge {
            size: body.len() as u64,
            max: max_bytes,
        });
    }

    tracing::debug!(url, bytes = body.len(), "HTTP body received");
    Ok(String::from_utf8_lossy(&body).into_owned())
}
