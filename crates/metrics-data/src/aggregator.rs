//! Distinct-contributor aggregation over commit-search events.
//!
//! Collapses raw events into one data point per (repository, day) carrying
//! the number of distinct contributors active that day.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::NaiveDate;
use metrics_core::models::DataPoint;
use metrics_core::{MetricsError, Result};
use tracing::debug;

use crate::events::{RawEvent, SearchResults};

/// Metric name emitted for distinct-contributor counts.
pub const ACTIVE_USERS_METRIC: &str = "active_users";

// ── ActiveUsersAggregator ─────────────────────────────────────────────────────

/// Accumulates distinct contributor logins per (repository, day).
///
/// Set membership makes the aggregation insensitive to event order and to
/// duplicated events. The accumulator is local to one aggregation call;
/// nothing is shared across invocations.
#[derive(Debug, Default)]
pub struct ActiveUsersAggregator {
    users_by_repo_day: BTreeMap<(String, NaiveDate), HashSet<String>>,
}

impl ActiveUsersAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a batch of events.
    ///
    /// Events without a usable calendar day are skipped silently; a bad
    /// timestamp is a data-quality wrinkle, not an error.
    pub fn add_events(&mut self, events: &[RawEvent]) {
        let mut skipped = 0usize;
        for event in events {
            let Some(day) = event.day() else {
                skipped += 1;
                continue;
            };
            self.users_by_repo_day
                .entry((event.repository.full_name.clone(), day))
                .or_default()
                .insert(event.author.login.clone());
        }
        if skipped > 0 {
            debug!("Skipped {} events without a usable timestamp", skipped);
        }
    }

    /// Emit one data point per (repository, day) key.
    ///
    /// BTreeMap iteration yields keys ascending, so the output is sorted
    /// lexicographically by repository and chronologically by day.
    pub fn finish(self) -> Vec<DataPoint> {
        self.users_by_repo_day
            .into_iter()
            .map(|((repo, day), users)| DataPoint {
                name: ACTIVE_USERS_METRIC.to_string(),
                date: day,
                value: users.len() as f64,
                metadata: BTreeMap::from([("repo".to_string(), repo)]),
            })
            .collect()
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Aggregate one batch of events into distinct-contributor counts.
pub fn aggregate_active_users(events: &[RawEvent]) -> Vec<DataPoint> {
    let mut aggregator = ActiveUsersAggregator::new();
    aggregator.add_events(events);
    aggregator.finish()
}

/// Aggregate a search-results JSON file from disk.
///
/// The document must be a JSON object; an absent `items` key is treated as
/// empty, which yields an empty (valid) result.
pub fn load_active_users(path: &Path) -> Result<Vec<DataPoint>> {
    let content = std::fs::read_to_string(path).map_err(|source| MetricsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let results: SearchResults = serde_json::from_str(&content)?;
    Ok(aggregate_active_users(&results.items))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
