mod bootstrap;

use anyhow::Result;
use metrics_core::settings::Settings;
use metrics_data::aggregator::load_active_users;
use metrics_data::fetcher::{fetch_active_users, PageMerge};
use metrics_data::reader::{parse_csv_file, parse_json_file};
use metrics_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Codex Metrics v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Query: {}, Theme: {}", settings.query, settings.theme);

    // Source selection: an explicit metrics file renders as-is, an events
    // file aggregates locally, otherwise the commit-search API is queried.
    let points = if let Some(path) = &settings.metrics_file {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => parse_csv_file(path)?,
            _ => parse_json_file(path)?,
        }
    } else if let Some(path) = &settings.events_file {
        load_active_users(path)?
    } else {
        let merge = if settings.merge_pages {
            PageMerge::Merged
        } else {
            PageMerge::PerPage
        };
        fetch_active_users(&settings.query, settings.token.as_deref(), merge).await?
    };

    tracing::info!("Loaded {} data points", points.len());

    let app = App::new(&settings.theme);
    app.run_chart(points).await?;

    Ok(())
}
