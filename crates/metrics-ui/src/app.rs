//! Main application state and TUI event loop.
//!
//! [`App`] owns the theme and drives the chart view until the user quits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use metrics_core::models::DataPoint;

use crate::chart_view::{self, ChartData};
use crate::themes::Theme;

/// Root application state for the metrics TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application with the given theme name.
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            should_quit: false,
        }
    }

    /// Render `points` as the active-users chart and wait for `q` / `Ctrl+C`.
    ///
    /// An empty `points` list is a valid outcome and shows the no-data view.
    pub async fn run_chart(self, points: Vec<DataPoint>) -> io::Result<()> {
        let chart_data = ChartData::from_points(&points);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                match &chart_data {
                    Some(data) => chart_view::render_chart(frame, area, data, &self.theme),
                    None => chart_view::render_no_data(frame, area, &self.theme),
                }
            })?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        _ => {}
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
