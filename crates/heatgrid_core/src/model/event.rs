//! Activity feed event model.
//!
//! # Responsibility
//! - Define the record shape consumed from public activity feeds.
//! - Own the fixed allow-list of event kinds that count as contributions.
//!
//! # Invariants
//! - Decoding is per-record and lenient: a malformed record is skipped,
//!   never fails the whole batch.
//! - `created_at` is always a UTC instant once decoded.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Activity kinds counted toward a day's contribution total.
///
/// Wire names match the GitHub events API `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Push,
    Create,
    Delete,
    Fork,
    Issues,
    IssueComment,
    PullRequest,
    PullRequestReview,
    PullRequestReviewComment,
    CommitComment,
    Watch,
    Release,
    Public,
    Member,
    /// Wiki page edits.
    Gollum,
}

const CONTRIBUTION_KINDS: [EventKind; 15] = [
    EventKind::Push,
    EventKind::Create,
    EventKind::Delete,
    EventKind::Fork,
    EventKind::Issues,
    EventKind::IssueComment,
    EventKind::PullRequest,
    EventKind::PullRequestReview,
    EventKind::PullRequestReviewComment,
    EventKind::CommitComment,
    EventKind::Watch,
    EventKind::Release,
    EventKind::Public,
    EventKind::Member,
    EventKind::Gollum,
];

impl EventKind {
    /// Returns every allow-listed kind in declaration order.
    pub fn all() -> &'static [EventKind] {
        &CONTRIBUTION_KINDS
    }

    /// Parses a wire `type` string. Returns `None` for kinds outside the
    /// allow-list.
    pub fn from_wire(value: &str) -> Option<Self> {
        let kind = match value {
            "PushEvent" => Self::Push,
            "CreateEvent" => Self::Create,
            "DeleteEvent" => Self::Delete,
            "ForkEvent" => Self::Fork,
            "IssuesEvent" => Self::Issues,
            "IssueCommentEvent" => Self::IssueComment,
            "PullRequestEvent" => Self::PullRequest,
            "PullRequestReviewEvent" => Self::PullRequestReview,
            "PullRequestReviewCommentEvent" => Self::PullRequestReviewComment,
            "CommitCommentEvent" => Self::CommitComment,
            "WatchEvent" => Self::Watch,
            "ReleaseEvent" => Self::Release,
            "PublicEvent" => Self::Public,
            "MemberEvent" => Self::Member,
            "GollumEvent" => Self::Gollum,
            _ => return None,
        };
        Some(kind)
    }

    /// Wire name used by the events API.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Push => "PushEvent",
            Self::Create => "CreateEvent",
            Self::Delete => "DeleteEvent",
            Self::Fork => "ForkEvent",
            Self::Issues => "IssuesEvent",
            Self::IssueComment => "IssueCommentEvent",
            Self::PullRequest => "PullRequestEvent",
            Self::PullRequestReview => "PullRequestReviewEvent",
            Self::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            Self::CommitComment => "CommitCommentEvent",
            Self::Watch => "WatchEvent",
            Self::Release => "ReleaseEvent",
            Self::Public => "PublicEvent",
            Self::Member => "MemberEvent",
            Self::Gollum => "GollumEvent",
        }
    }
}

/// One activity record as delivered by the feed.
///
/// `kind` keeps the raw wire string so records outside the allow-list can
/// still be carried around and logged; counting goes through
/// [`EventRecord::contribution_kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Read from the feed's `type` field.
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn new(kind: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            kind: kind.into(),
            created_at,
        }
    }

    /// Returns the allow-listed kind, or `None` when this record does not
    /// count as a contribution.
    pub fn contribution_kind(&self) -> Option<EventKind> {
        EventKind::from_wire(self.kind.as_str())
    }

    /// Whether this record counts toward a day's total.
    pub fn is_contribution(&self) -> bool {
        self.contribution_kind().is_some()
    }

    /// Calendar date (UTC) this record is bucketed under.
    pub fn utc_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Decodes one feed object.
    ///
    /// Returns `None` when `type` is missing or not a string, or when
    /// `created_at` is missing or not an RFC 3339 timestamp.
    ///
    /// RFC 3339 requires an offset, so a naive timestamp such as
    /// `2024-01-10T12:00:00` is rejected rather than assumed to be UTC.
    /// The GitHub feed always sends `Z`; hand-written event files must too.
    pub fn from_value(value: &Value) -> Option<Self> {
        let kind = value.get("type")?.as_str()?;
        let created_at = value.get("created_at")?.as_str()?;
        let created_at = DateTime::parse_from_rfc3339(created_at.trim()).ok()?;
        Some(Self::new(kind, created_at.with_timezone(&Utc)))
    }
}

/// Outcome of decoding a feed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedEvents {
    pub records: Vec<EventRecord>,
    /// Number of array entries dropped as malformed.
    pub skipped: usize,
}

/// Decodes a feed array, skipping malformed entries.
///
/// Returns `None` when `payload` is not a JSON array.
pub fn decode_events(payload: &Value) -> Option<DecodedEvents> {
    let items = payload.as_array()?;
    let mut decoded = DecodedEvents::default();
    for item in items {
        match EventRecord::from_value(item) {
            Some(record) => decoded.records.push(record),
            None => decoded.skipped += 1,
        }
    }
    Some(decoded)
}
