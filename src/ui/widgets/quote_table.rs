//! Quote table widget.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::state::{Quote, Store, Trend};
use crate::ui::Theme;
use crate::ui::format::{format_cash, format_percentage, or_missing};

/// Column titles, in display order.
pub const HEADERS: [&str; 7] = ["Symbol", "Current", "Change", "Change%", "High", "Low", "Open"];

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRow {
    pub cells: [String; 7],
    pub trend: Trend,
}

impl QuoteRow {
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            cells: [
                quote.symbol.to_string(),
                or_missing(quote.price, format_cash),
                or_missing(quote.change, format_cash),
                or_missing(quote.change_percent, format_percentage),
                or_missing(quote.day_high, format_cash),
                or_missing(quote.day_low, format_cash),
                or_missing(quote.open, format_cash),
            ],
            trend: quote.trend(),
        }
    }
}

/// Quote table widget.
pub struct QuoteTable;

impl QuoteTable {
    /// Rows for the current snapshot, in snapshot order.
    pub fn rows(store: &Store) -> Vec<QuoteRow> {
        store.view.snapshot.quotes.iter().map(QuoteRow::from_quote).collect()
    }

    /// Render the quote table.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, theme: &Theme) {
        let header = Row::new(HEADERS.map(right)).style(theme.header);

        let rows = Self::rows(store).into_iter().map(|row| {
            let tone = theme.tone(row.trend);
            Row::new(row.cells.into_iter().map(right)).style(tone)
        });

        let widths = [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ];

        let block = Block::default()
            .title(format!(" Watchlist ({}) ", store.view.symbols.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(area);

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default();
        state.select(store.app.selected);

        frame.render_stateful_widget(table, area, &mut state);

        if store.view.snapshot.is_empty() {
            render_placeholder(frame, inner, store);
        }
    }
}

fn right<'a>(text: impl Into<String>) -> Cell<'a> {
    Cell::from(Line::from(text.into()).alignment(Alignment::Right))
}

fn render_placeholder(frame: &mut Frame, inner: Rect, store: &Store) {
    // Leave the header row visible.
    if inner.height < 3 {
        return;
    }
    let message = if store.view.symbols.is_empty() {
        "No symbols tracked. Press a to add some."
    } else {
        "Waiting for quotes..."
    };
    let area = Rect {
        y: inner.y + 2,
        height: 1,
        ..inner
    };
    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
    frame.render_widget(paragraph, area);
}
