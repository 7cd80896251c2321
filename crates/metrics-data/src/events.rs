//! Typed schema for GitHub commit-search results.
//!
//! Raw events are validated once at deserialization instead of being probed
//! with ad-hoc nested lookups downstream.

use chrono::NaiveDate;
use metrics_core::models::DATE_FORMAT;
use serde::Deserialize;

/// One page (or file) of commit-search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResults {
    /// Matched events. An absent `items` key is treated as empty.
    #[serde(default)]
    pub items: Vec<RawEvent>,
}

/// A single commit-search event.
///
/// `repository` and `author` are required; a document containing an event
/// without them fails deserialization as a whole.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub repository: Repository,
    pub author: Author,
    #[serde(default)]
    pub commit: Option<Commit>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub date: Option<String>,
}

impl RawEvent {
    /// The event timestamp: the nested commit-author date when present,
    /// falling back to the top-level creation time.
    pub fn timestamp(&self) -> Option<&str> {
        self.commit
            .as_ref()
            .and_then(|c| c.author.as_ref())
            .and_then(|a| a.date.as_deref())
            .or(self.created_at.as_deref())
    }

    /// The calendar day of the event: the text preceding the first `'T'` of
    /// the timestamp, parsed as `YYYY-MM-DD`. Empty or unparseable days
    /// yield `None`.
    pub fn day(&self) -> Option<NaiveDate> {
        let timestamp = self.timestamp()?;
        let day = timestamp.split('T').next().unwrap_or("");
        NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
