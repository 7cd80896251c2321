//! Active-users line chart grouped by repository.
//!
//! The view receives the already-aggregated data points; grouping by the
//! `repo` metadata key, per-series date sorting and axis bounds all happen
//! here, outside the ingestion core.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use metrics_core::models::DataPoint;

use crate::themes::Theme;

// ── ChartData ─────────────────────────────────────────────────────────────────

/// One repository's line: (day offset, value) pairs sorted by date.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub repo: String,
    pub points: Vec<(f64, f64)>,
}

/// Prepared chart geometry: one series per repository plus axis bounds.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub series: Vec<Series>,
    /// Earliest date across all points; x values are day offsets from it.
    pub start: NaiveDate,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    /// Group `points` by their `repo` metadata key (missing key groups under
    /// the empty string), sort each series by date, and map dates to day
    /// offsets from the earliest date.
    ///
    /// Returns `None` when `points` is empty.
    pub fn from_points(points: &[DataPoint]) -> Option<Self> {
        let start = points.iter().map(|p| p.date).min()?;

        let mut by_repo: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for point in points {
            let repo = point.metadata.get("repo").cloned().unwrap_or_default();
            by_repo.entry(repo).or_default().push((point.date, point.value));
        }

        let mut max_x = 0.0f64;
        let mut max_y = 0.0f64;
        let series: Vec<Series> = by_repo
            .into_iter()
            .map(|(repo, mut entries)| {
                entries.sort_by_key(|(date, _)| *date);
                let points: Vec<(f64, f64)> = entries
                    .into_iter()
                    .map(|(date, value)| {
                        let x = (date - start).num_days() as f64;
                        max_x = max_x.max(x);
                        max_y = max_y.max(value);
                        (x, value)
                    })
                    .collect();
                Series { repo, points }
            })
            .collect();

        Some(Self {
            series,
            start,
            x_bounds: [0.0, max_x.max(1.0)],
            y_bounds: [0.0, max_y.max(1.0) * 1.1],
        })
    }

    /// Axis labels for the date axis: the first and last day shown.
    fn x_labels(&self) -> Vec<String> {
        let end = self.start + chrono::Duration::days(self.x_bounds[1] as i64);
        vec![self.start.to_string(), end.to_string()]
    }

    /// Axis labels for the user-count axis.
    fn y_labels(&self) -> Vec<String> {
        vec!["0".to_string(), format!("{:.0}", self.y_bounds[1])]
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Draw the active-users chart with one line per repository.
pub fn render_chart(frame: &mut Frame, area: Rect, data: &ChartData, theme: &Theme) {
    let datasets: Vec<Dataset> = data
        .series
        .iter()
        .enumerate()
        .map(|(index, series)| {
            Dataset::default()
                .name(series.repo.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.series_style(index))
                .data(&series.points)
        })
        .collect();

    let x_labels: Vec<Line> = data
        .x_labels()
        .into_iter()
        .map(|label| Line::from(Span::styled(label, theme.axis_label)))
        .collect();
    let y_labels: Vec<Line> = data
        .y_labels()
        .into_iter()
        .map(|label| Line::from(Span::styled(label, theme.axis_label)))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(" Active Users by Repository ", theme.title)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme.axis))
                .style(theme.axis)
                .bounds(data.x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Users", theme.axis))
                .style(theme.axis)
                .bounds(data.y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Placeholder shown when aggregation produced no data points.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No data available", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Try a broader search query or a different input file.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(" Codex Metrics ", theme.title)),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
