//! Data ingestion layer for the Codex metrics dashboard.
//!
//! Responsible for parsing JSON/CSV metric files, aggregating GitHub
//! commit-search events into distinct-contributor counts per repository and
//! day, and driving the paginated search endpoint.

pub mod aggregator;
pub mod events;
pub mod fetcher;
pub mod reader;

pub use metrics_core as core;
