//! GitHub public-events client.
//!
//! Issues a single `GET /users/{user}/events/public` per fetch. The token is
//! optional and only ever comes from configuration.

use crate::feed::{decode_payload, EventFeed, FeedError, FeedResult};
use crate::model::event::DecodedEvents;
use log::{debug, warn};
use serde_json::Value;
use std::time::Duration;

/// Default REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Largest page size the events endpoint accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// `User-Agent` sent with every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("heatgrid/", env!("CARGO_PKG_VERSION"));

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Client for one user's public event stream.
#[derive(Debug, Clone)]
pub struct GithubEventFeed {
    client: reqwest::Client,
    api_base: String,
    username: String,
    token: Option<String>,
    per_page: u32,
}

impl GithubEventFeed {
    /// Creates a client against `api_base` (e.g. [`DEFAULT_API_BASE`]).
    ///
    /// `per_page` is clamped to `1..=MAX_PER_PAGE`.
    ///
    /// # Errors
    /// - Returns [`FeedError::Transport`] when the HTTP client cannot be
    ///   built (e.g. TLS backend initialization fails).
    pub fn try_new(
        api_base: impl Into<String>,
        username: impl Into<String>,
        token: Option<String>,
        per_page: u32,
    ) -> FeedResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.into(),
            username: username.into(),
            token: token.filter(|value| !value.trim().is_empty()),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fully qualified endpoint URL without query string.
    pub fn events_url(&self) -> String {
        format!(
            "{}/users/{}/events/public",
            self.api_base.trim_end_matches('/'),
            self.username.trim()
        )
    }
}

impl EventFeed for GithubEventFeed {
    fn source_name(&self) -> &'static str {
        "github"
    }

    async fn fetch_events(&self) -> FeedResult<DecodedEvents> {
        let url = self.events_url();
        debug!(
            "event=feed_request module=feed status=start source=github user={} auth={}",
            self.username,
            self.has_token()
        );

        let mut request = self
            .client
            .get(url.as_str())
            .query(&[("per_page", self.per_page)])
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = truncate(body.trim(), MAX_ERROR_BODY_CHARS);
            warn!(
                "event=feed_request module=feed status=error source=github http_status={}",
                status.as_u16()
            );
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.json::<Value>().await?;
        let decoded = decode_payload(&payload)?;
        debug!(
            "event=feed_request module=feed status=ok source=github records={} skipped={}",
            decoded.records.len(),
            decoded.skipped
        );
        Ok(decoded)
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    let mut out: String = value.chars().take(max_chars).collect();
    if value.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{GithubEventFeed, MAX_PER_PAGE};

    #[test]
    fn events_url_trims_trailing_slash() {
        let feed = GithubEventFeed::try_new("https://example.test/", "octocat", None, 30)
            .expect("client builds");
        assert_eq!(
            feed.events_url(),
            "https://example.test/users/octocat/events/public"
        );
    }

    #[test]
    fn blank_token_is_treated_as_absent() {
        let feed = GithubEventFeed::try_new("https://example.test", "octocat", Some("  ".into()), 0)
            .expect("client builds");
        assert!(!feed.has_token());
        assert_eq!(feed.per_page, 1);

        let feed = GithubEventFeed::try_new("https://example.test", "octocat", None, 1_000)
            .expect("client builds");
        assert_eq!(feed.per_page, MAX_PER_PAGE);
    }
}
