use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// GitHub activity metrics in the terminal
#[derive(Parser, Debug, Clone)]
#[command(
    name = "codex-metrics",
    about = "GitHub activity metrics in the terminal",
    version
)]
pub struct Settings {
    /// Commit search query
    #[arg(long, default_value = "codex")]
    pub query: String,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Aggregate a local search-results JSON file instead of querying the API
    #[arg(long)]
    pub events_file: Option<PathBuf>,

    /// Render a metrics file (.json or .csv) directly
    #[arg(long, conflicts_with = "events_file")]
    pub metrics_file: Option<PathBuf>,

    /// Merge contributor sets across result pages before counting
    #[arg(long)]
    pub merge_pages: bool,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments (and the `GITHUB_TOKEN` environment variable) and
    /// resolve flag interactions.
    pub fn load() -> Self {
        Self::resolve(Self::parse())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<std::ffi::OsString>) -> Self {
        Self::resolve(Self::parse_from(args))
    }

    /// Apply the `--debug` override.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_settings_default_values() {
        // Parse with only the binary name (no flags) to get all defaults.
        let settings = Settings::parse_from(["codex-metrics"]);

        assert_eq!(settings.query, "codex");
        assert!(settings.events_file.is_none());
        assert!(settings.metrics_file.is_none());
        assert!(!settings.merge_pages);
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_explicit_query() {
        let settings = Settings::parse_from(["codex-metrics", "--query", "tokio"]);
        assert_eq!(settings.query, "tokio");
    }

    #[test]
    fn test_settings_cli_token() {
        let settings = Settings::parse_from(["codex-metrics", "--token", "ghp_abc"]);
        assert_eq!(settings.token, Some("ghp_abc".to_string()));
    }

    #[test]
    fn test_settings_cli_events_file() {
        let settings = Settings::parse_from(["codex-metrics", "--events-file", "/tmp/events.json"]);
        assert_eq!(settings.events_file, Some(PathBuf::from("/tmp/events.json")));
    }

    #[test]
    fn test_settings_cli_metrics_file_conflicts_with_events_file() {
        let result = Settings::try_parse_from([
            "codex-metrics",
            "--metrics-file",
            "/tmp/metrics.csv",
            "--events-file",
            "/tmp/events.json",
        ]);
        assert!(result.is_err(), "conflicting source flags must be rejected");
    }

    #[test]
    fn test_settings_cli_merge_pages_flag() {
        let settings = Settings::parse_from(["codex-metrics", "--merge-pages"]);
        assert!(settings.merge_pages);
    }

    #[test]
    fn test_settings_cli_rejects_unknown_theme() {
        let result = Settings::try_parse_from(["codex-metrics", "--theme", "neon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_args_debug_overrides_log_level() {
        let settings =
            Settings::load_from_args(vec!["codex-metrics".into(), "--debug".into()]);
        assert_eq!(settings.log_level, "DEBUG");
        assert!(settings.debug);
    }

    #[test]
    fn test_load_from_args_explicit_log_level_kept_without_debug() {
        let settings = Settings::load_from_args(vec![
            "codex-metrics".into(),
            "--log-level".into(),
            "WARNING".into(),
        ]);
        assert_eq!(settings.log_level, "WARNING");
    }
}
