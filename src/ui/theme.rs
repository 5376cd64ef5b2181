//! Colours resolved from the theme configuration.

use crate::config::ThemeConfig;
use crate::state::Trend;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Resolved styles used by the widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Table header row.
    pub header: Style,
    /// Rows with a positive change.
    pub gain: Style,
    /// Rows with a negative change.
    pub loss: Style,
    /// Borders, labels and key hints.
    pub accent: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let color = |value: &str, fallback: &str| {
            parse_color(value)
                .or_else(|| parse_color(fallback))
                .unwrap_or(Color::Reset)
        };

        Self {
            header: Style::default()
                .bg(color(&config.header_bg, &defaults.header_bg))
                .add_modifier(Modifier::BOLD),
            gain: Style::default().fg(color(&config.gain, &defaults.gain)),
            loss: Style::default().fg(color(&config.loss, &defaults.loss)),
            accent: color(&config.accent, &defaults.accent),
        }
    }

    /// Style for a quote row.
    pub fn tone(&self, trend: Trend) -> Style {
        match trend {
            Trend::Up => self.gain,
            Trend::Down => self.loss,
            Trend::Flat => Style::default(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn parse_color(value: &str) -> Option<Color> {
    match Color::from_str(value.trim()) {
        Ok(color) => Some(color),
        Err(_) => {
            tracing::warn!("Unknown theme colour '{}'", value);
            None
        }
    }
}
