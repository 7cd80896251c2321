//! Paginated GitHub commit-search client and pagination driver.
//!
//! The transport is a trait seam so the pagination loop can be exercised
//! against scripted pages without a network.

use std::time::Duration;

use async_trait::async_trait;
use metrics_core::models::DataPoint;
use metrics_core::{MetricsError, Result};
use tracing::debug;

use crate::aggregator::{aggregate_active_users, ActiveUsersAggregator};
use crate::events::{RawEvent, SearchResults};

/// Items requested per search page.
pub const PAGE_SIZE: u32 = 100;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("codex-metrics/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ── Transport seam ────────────────────────────────────────────────────────────

/// One page of commit-search results.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub items: Vec<RawEvent>,
    /// Whether the response advertised a further page.
    pub has_next: bool,
}

/// Abstraction over the paginated search endpoint.
#[async_trait]
pub trait SearchTransport {
    /// Fetch one page of results.
    ///
    /// `Ok(None)` signals the terminal status: the query has no (more) valid
    /// results and pagination stops cleanly. Any other non-success status is
    /// a hard failure.
    async fn fetch_page(&self, query: &str, page: u32) -> Result<Option<SearchPage>>;
}

/// How distinct-contributor counts are combined across pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMerge {
    /// Aggregate every page independently and concatenate the results.
    ///
    /// A contributor whose events for one (repository, day) are split across
    /// two pages is counted on both, reproducing the behavior of counting
    /// page by page.
    #[default]
    PerPage,
    /// Pool events into a single aggregation across all pages, so each
    /// contributor is counted once per (repository, day).
    Merged,
}

// ── GithubSearchClient ────────────────────────────────────────────────────────

/// HTTP client for the GitHub commit-search endpoint.
pub struct GithubSearchClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubSearchClient {
    /// Build a client against the public GitHub API.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Build a client against an explicit base URL (used for testing against
    /// local servers).
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        // GitHub rejects requests without a User-Agent.
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MetricsError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
        })
    }
}

#[async_trait]
impl SearchTransport for GithubSearchClient {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<Option<SearchPage>> {
        let url = format!("{}/search/commits", self.base_url);
        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .query(&[
                ("q", query.to_string()),
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MetricsError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            // Invalid query or results exhausted: a clean stop.
            return Ok(None);
        }
        if !status.is_success() {
            return Err(MetricsError::Fetch {
                page,
                status: status.as_u16(),
            });
        }

        let has_next = has_next_link(
            response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|value| value.to_str().ok()),
        );

        let results: SearchResults = response
            .json()
            .await
            .map_err(|e| MetricsError::Transport(e.to_string()))?;

        Ok(Some(SearchPage {
            items: results.items,
            has_next,
        }))
    }
}

/// Whether a `Link` response header advertises a `rel="next"` segment.
fn has_next_link(header: Option<&str>) -> bool {
    header.is_some_and(|value| {
        value
            .split(',')
            .any(|segment| segment.contains("rel=\"next\""))
    })
}

// ── Pagination driver ─────────────────────────────────────────────────────────

/// Drive `transport` page by page starting at page 1, aggregating each
/// page's items before the next request is issued.
///
/// Termination: a terminal status (`Ok(None)`) or a page without a "next"
/// indicator. Failure is all-or-nothing: a hard error on page N discards the
/// data points already aggregated from pages 1..N.
pub async fn fetch_all_pages<T: SearchTransport>(
    transport: &T,
    query: &str,
    merge: PageMerge,
) -> Result<Vec<DataPoint>> {
    let mut points: Vec<DataPoint> = Vec::new();
    let mut pooled = ActiveUsersAggregator::new();
    let mut page = 1u32;

    loop {
        let Some(result) = transport.fetch_page(query, page).await? else {
            break;
        };
        debug!("Page {}: {} items", page, result.items.len());

        match merge {
            PageMerge::PerPage => points.extend(aggregate_active_users(&result.items)),
            PageMerge::Merged => pooled.add_events(&result.items),
        }

        if !result.has_next {
            break;
        }
        page += 1;
    }

    if merge == PageMerge::Merged {
        points = pooled.finish();
    }
    Ok(points)
}

/// Search GitHub commits for `query` and aggregate distinct contributors.
pub async fn fetch_active_users(
    query: &str,
    token: Option<&str>,
    merge: PageMerge,
) -> Result<Vec<DataPoint>> {
    let client = GithubSearchClient::new(token.map(str::to_string))?;
    fetch_all_pages(&client, query, merge).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
