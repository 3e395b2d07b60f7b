//! Activity feed sources.
//!
//! # Responsibility
//! - Define the `EventFeed` seam the heatmap service pulls records through.
//! - Provide the GitHub public-events client and a local JSON file source.
//!
//! # Invariants
//! - A feed issues at most one request per call; no retries.
//! - Malformed individual records are skipped, never reported as errors.
//! - A payload that is not a JSON array is an error.

pub mod file;
pub mod github;

use crate::model::event::DecodedEvents;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;

pub use file::FileEventFeed;
pub use github::GithubEventFeed;

pub type FeedResult<T> = Result<T, FeedError>;

/// Failure to obtain a usable event payload.
#[derive(Debug)]
pub enum FeedError {
    /// Network or client-level failure.
    Transport(reqwest::Error),
    /// Upstream answered with a non-success status.
    Status { status: u16, body: String },
    /// Local source could not be read.
    Io(std::io::Error),
    /// Body was not valid JSON.
    Json(serde_json::Error),
    /// Body was JSON but not an array of events.
    UnexpectedPayload(String),
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "event feed request failed: {err}"),
            Self::Status { status, body } => {
                write!(f, "event feed returned HTTP {status}: {body}")
            }
            Self::Io(err) => write!(f, "event feed could not be read: {err}"),
            Self::Json(err) => write!(f, "event feed is not valid JSON: {err}"),
            Self::UnexpectedPayload(kind) => {
                write!(f, "event feed must be a JSON array, got {kind}")
            }
        }
    }
}

impl Error for FeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Status { .. } | Self::UnexpectedPayload(_) => None,
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<std::io::Error> for FeedError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Source of activity records for one heatmap build.
pub trait EventFeed {
    /// Short identifier used in logs (`github`, `file`).
    fn source_name(&self) -> &'static str;

    /// Fetches and decodes one batch of records.
    fn fetch_events(&self) -> impl Future<Output = FeedResult<DecodedEvents>> + Send;
}

/// Feed chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredFeed {
    Github(GithubEventFeed),
    File(FileEventFeed),
}

impl EventFeed for ConfiguredFeed {
    fn source_name(&self) -> &'static str {
        match self {
            Self::Github(feed) => feed.source_name(),
            Self::File(feed) => feed.source_name(),
        }
    }

    async fn fetch_events(&self) -> FeedResult<DecodedEvents> {
        match self {
            Self::Github(feed) => feed.fetch_events().await,
            Self::File(feed) => feed.fetch_events().await,
        }
    }
}

pub(crate) fn decode_payload(payload: &serde_json::Value) -> FeedResult<DecodedEvents> {
    crate::model::event::decode_events(payload)
        .ok_or_else(|| FeedError::UnexpectedPayload(json_kind(payload).to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
