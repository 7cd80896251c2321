use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Series palette shared by the dark and light themes.
///
/// Deep blue, coral, soft yellow, muted teal, darker blue – the dashboard's
/// original colorway.
const SERIES_PALETTE: [Color; 5] = [
    Color::Rgb(0x23, 0x69, 0xBD),
    Color::Rgb(0xF2, 0x5F, 0x5C),
    Color::Rgb(0xFF, 0xE0, 0x66),
    Color::Rgb(0x70, 0xC1, 0xB3),
    Color::Rgb(0x24, 0x7B, 0xA0),
];

/// ANSI-only palette for the classic theme.
const CLASSIC_PALETTE: [Color; 5] = [
    Color::Blue,
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
];

/// Complete theme definition carrying all UI styles used by the chart view.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Chrome ───────────────────────────────────────────────────────────────
    pub title: Style,
    pub border: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub warning: Style,

    // ── Chart ────────────────────────────────────────────────────────────────
    pub axis: Style,
    pub axis_label: Style,
    /// Line colours cycled per repository series.
    pub series: [Color; 5],
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            warning: Style::default().fg(Color::Yellow),

            axis: Style::default().fg(Color::Gray),
            axis_label: Style::default().fg(Color::DarkGray),
            series: SERIES_PALETTE,
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            warning: Style::default().fg(Color::Yellow),

            axis: Style::default().fg(Color::DarkGray),
            axis_label: Style::default().fg(Color::Gray),
            series: SERIES_PALETTE,
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan),
            border: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            warning: Style::default().fg(Color::Yellow),

            axis: Style::default().fg(Color::White),
            axis_label: Style::default().fg(Color::Gray),
            series: CLASSIC_PALETTE,
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Return the line style for the series at `index`, cycling the palette.
    pub fn series_style(&self, index: usize) -> Style {
        Style::default().fg(self.series[index % self.series.len()])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
