//! Quote and snapshot state.

use crate::watchlist::{Symbol, Watchlist};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a quote's change since the previous close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trend {
    Up,
    Down,
    /// Zero or unknown change.
    #[default]
    Flat,
}

/// Market data for one symbol at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol the quote belongs to.
    pub symbol: Symbol,
    /// Current price.
    pub price: Option<Decimal>,
    /// Absolute change since previous close.
    pub change: Option<Decimal>,
    /// Percent change since previous close.
    pub change_percent: Option<Decimal>,
    /// Day high.
    pub day_high: Option<Decimal>,
    /// Day low.
    pub day_low: Option<Decimal>,
    /// Day open.
    pub open: Option<Decimal>,
}

impl Quote {
    /// Create a quote with no market data.
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            price: None,
            change: None,
            change_percent: None,
            day_high: None,
            day_low: None,
            open: None,
        }
    }

    /// Direction of the absolute change.
    pub fn trend(&self) -> Trend {
        match self.change.map(|c| c.cmp(&Decimal::ZERO)) {
            Some(Ordering::Greater) => Trend::Up,
            Some(Ordering::Less) => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

/// Quotes from the most recent successful refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Quotes in watchlist order.
    pub quotes: Vec<Quote>,
    /// When the refresh completed.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Build a snapshot from a fetch result.
    ///
    /// Quotes are matched to the watchlist by symbol and laid out in
    /// watchlist order. Quotes for untracked symbols and repeated quotes
    /// for the same symbol are dropped.
    pub fn from_quotes(watchlist: &Watchlist, quotes: Vec<Quote>, fetched_at: DateTime<Utc>) -> Self {
        let mut slots: Vec<Option<Quote>> = vec![None; watchlist.len()];
        for quote in quotes {
            if let Some(index) = watchlist.position(&quote.symbol) {
                if slots[index].is_none() {
                    slots[index] = Some(quote);
                }
            }
        }

        Self {
            quotes: slots.into_iter().flatten().collect(),
            fetched_at: Some(fetched_at),
        }
    }

    /// Look up the quote for a symbol.
    pub fn get(&self, symbol: &Symbol) -> Option<&Quote> {
        self.quotes.iter().find(|q| &q.symbol == symbol)
    }

    /// Drop the row for a symbol. Returns `true` if a row was removed.
    pub fn remove(&mut self, symbol: &Symbol) -> bool {
        let before = self.quotes.len();
        self.quotes.retain(|q| &q.symbol != symbol);
        self.quotes.len() != before
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
