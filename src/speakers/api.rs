//! Client for the transcription server's speaker name store.
//!
//! The store is a small REST surface: one collection of id-to-name entries
//! that can be fetched whole, written one entry at a time, and deleted one
//! entry or all at once.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::http_client::{self, RetryConfig};
use crate::speakers::SpeakerId;

/// Size cap for a name snapshot response.
pub const MAX_SNAPSHOT_RESPONSE_BYTES: usize = 64 * 1024;
const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;
const ERROR_DETAIL_MAX_CHARS: usize = 200;

/// Snapshot fetches are idempotent, so transient failures are retried.
const SNAPSHOT_RETRY: RetryConfig = RetryConfig {
    max_attempts: 3,
    base_delay: Duration::from_millis(250),
    max_delay: Duration::from_secs(2),
};

/// Errors surfaced by the speaker store client.
#[derive(Debug, Error)]
pub enum SpeakerStoreError {
    /// The configured base URL could not be turned into a request URL.
    #[error("Invalid server base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// The server answered with a client error status.
    #[error("Server rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    /// The server answered with a server error status.
    #[error("Server failed (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },
    /// The request never completed.
    #[error("Could not reach the server: {0}")]
    Transport(String),
    /// The response body was not the expected JSON.
    #[error("Malformed server response: {0}")]
    Json(String),
}

#[derive(Debug, Deserialize)]
struct SnapshotWire {
    #[serde(default)]
    speakers: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct StoreNameWire<'a> {
    speaker_id: u32,
    name: &'a str,
}

/// Fetch every stored name.
pub fn fetch_all(base_url: &str) -> Result<BTreeMap<SpeakerId, String>, SpeakerStoreError> {
    let url = collection_url(base_url)?;
    http_client::retry_with_backoff(SNAPSHOT_RETRY, || fetch_snapshot(&url), retryable)
}

/// Store one name. Callers validate that `name` is non-empty.
pub fn store_name(base_url: &str, id: SpeakerId, name: &str) -> Result<(), SpeakerStoreError> {
    let url = collection_url(base_url)?;
    let payload = StoreNameWire {
        speaker_id: id.get(),
        name,
    };
    match http_client::agent().post(url.as_str()).send_json(payload) {
        Ok(_) => Ok(()),
        Err(err) => Err(request_error(err)),
    }
}

/// Delete one stored name. The server treats unknown identifiers as already
/// deleted, so this succeeds either way.
pub fn remove_name(base_url: &str, id: SpeakerId) -> Result<(), SpeakerStoreError> {
    let url = entry_url(base_url, id)?;
    match http_client::agent().delete(url.as_str()).call() {
        Ok(_) => Ok(()),
        Err(err) => Err(request_error(err)),
    }
}

/// Delete every stored name.
pub fn clear_names(base_url: &str) -> Result<(), SpeakerStoreError> {
    let url = collection_url(base_url)?;
    match http_client::agent().delete(url.as_str()).call() {
        Ok(_) => Ok(()),
        Err(err) => Err(request_error(err)),
    }
}

fn fetch_snapshot(url: &Url) -> Result<BTreeMap<SpeakerId, String>, SpeakerStoreError> {
    let response = http_client::agent()
        .get(url.as_str())
        .call()
        .map_err(request_error)?;
    let body = http_client::read_response_bytes(response, MAX_SNAPSHOT_RESPONSE_BYTES)
        .map_err(|err| SpeakerStoreError::Transport(err.to_string()))?;
    let wire: SnapshotWire =
        serde_json::from_slice(&body).map_err(|err| SpeakerStoreError::Json(err.to_string()))?;
    Ok(convert_snapshot(wire))
}

/// Entries with non-numeric keys, a zero identifier, or a blank name are
/// dropped instead of failing the whole snapshot.
fn convert_snapshot(wire: SnapshotWire) -> BTreeMap<SpeakerId, String> {
    wire.speakers
        .into_iter()
        .filter_map(|(key, name)| {
            let id = key.trim().parse::<u32>().ok().and_then(SpeakerId::new)?;
            let name = name.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some((id, name))
        })
        .collect()
}

fn request_error(err: ureq::Error) -> SpeakerStoreError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = http_client::read_response_bytes(response, MAX_ERROR_BODY_BYTES)
                .unwrap_or_default();
            let message = extract_error_detail(&body);
            if (500..600).contains(&status) {
                SpeakerStoreError::ServerError { status, message }
            } else {
                SpeakerStoreError::Rejected { status, message }
            }
        }
        other => SpeakerStoreError::Transport(other.to_string()),
    }
}

/// Pull the `detail` field out of an error body when present; otherwise fall
/// back to a truncated copy of the raw text.
fn extract_error_detail(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(text)) => return text.clone(),
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
    }
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "no further detail".to_string();
    }
    trimmed.chars().take(ERROR_DETAIL_MAX_CHARS).collect()
}

fn retryable(err: &SpeakerStoreError) -> bool {
    matches!(
        err,
        SpeakerStoreError::Transport(_) | SpeakerStoreError::ServerError { .. }
    )
}

fn parse_base(base_url: &str) -> Result<Url, SpeakerStoreError> {
    let mut url = Url::parse(base_url).map_err(|err| invalid_base(base_url, &err.to_string()))?;
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}

fn collection_url(base_url: &str) -> Result<Url, SpeakerStoreError> {
    parse_base(base_url)?
        .join("api/speakers")
        .map_err(|err| invalid_base(base_url, &err.to_string()))
}

fn entry_url(base_url: &str, id: SpeakerId) -> Result<Url, SpeakerStoreError> {
    let mut url = collection_url(base_url)?;
    url.path_segments_mut()
        .map_err(|()| invalid_base(base_url, "URL cannot carry path segments"))?
        .push(&id.to_string());
    Ok(url)
}

fn invalid_base(base_url: &str, reason: &str) -> SpeakerStoreError {
    SpeakerStoreError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    }
}
