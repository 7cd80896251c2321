//! Terminal UI layer for the Codex metrics dashboard.
//!
//! Provides themes, the active-users chart view, and the main application
//! event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod themes;

pub use metrics_core as core;
