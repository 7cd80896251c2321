//! Core domain types for the Codex metrics dashboard.
//!
//! Defines the [`DataPoint`] time-series record every ingestion path
//! normalizes into, the shared raw-record parsing step, the crate-wide
//! error type and the CLI settings surface.

pub mod error;
pub mod models;
pub mod settings;

pub use error::{MetricsError, Result};
pub use models::DataPoint;
