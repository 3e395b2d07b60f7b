//! Local JSON file feed.
//!
//! Reads the same array shape the events API returns, for offline renders
//! and fixtures.

use crate::feed::{decode_payload, EventFeed, FeedResult};
use crate::model::event::DecodedEvents;
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileEventFeed {
    path: PathBuf,
}

impl FileEventFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventFeed for FileEventFeed {
    fn source_name(&self) -> &'static str {
        "file"
    }

    async fn fetch_events(&self) -> FeedResult<DecodedEvents> {
        let raw = std::fs::read_to_string(&self.path)?;
        let payload: Value = serde_json::from_str(&raw)?;
        let decoded = decode_payload(&payload)?;
        debug!(
            "event=feed_read module=feed status=ok source=file records={} skipped={}",
            decoded.records.len(),
            decoded.skipped
        );
        Ok(decoded)
    }
}
