//! Watchlist model and persistence.
//!
//! A [`Watchlist`] is an ordered set of [`Symbol`]s. Order is insertion
//! order and doubles as display order.

mod store;

pub use store::{FileWatchlistStore, WatchlistStore};

#[cfg(test)]
pub use store::MockWatchlistStore;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Symbols used when no watchlist has been saved yet.
pub const DEFAULT_SYMBOLS: [&str; 3] = ["ORCL", "AAPL", "IBM"];

/// A normalized (trimmed, uppercase) ticker symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalize raw user or file input into a symbol.
    ///
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = crate::Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::parse(&value).ok_or_else(|| crate::Error::invalid_input("empty symbol"))
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Split prompt text on whitespace into normalized symbols.
pub fn parse_symbols(text: &str) -> Vec<Symbol> {
    text.split_whitespace().filter_map(Symbol::parse).collect()
}

/// Ordered list of unique symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<Symbol>,
}

impl Watchlist {
    /// Build a watchlist from raw names, normalizing and dropping blanks
    /// and duplicates while keeping first-seen order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut watchlist = Self::default();
        for name in names {
            if let Some(symbol) = Symbol::parse(name.as_ref()) {
                watchlist.push(symbol);
            }
        }
        watchlist
    }

    /// The built-in default watchlist.
    pub fn with_defaults() -> Self {
        Self::from_names(DEFAULT_SYMBOLS)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    /// Append a symbol unless it is already tracked.
    ///
    /// Returns `true` when the watchlist changed.
    pub fn push(&mut self, symbol: Symbol) -> bool {
        if self.contains(&symbol) {
            false
        } else {
            self.symbols.push(symbol);
            true
        }
    }

    /// Remove the first entry equal to `symbol`.
    ///
    /// Returns `true` when the watchlist changed.
    pub fn remove(&mut self, symbol: &Symbol) -> bool {
        match self.symbols.iter().position(|s| s == symbol) {
            Some(index) => {
                self.symbols.remove(index);
                true
            }
            None => false,
        }
    }

    /// Position of a symbol in display order.
    pub fn position(&self, symbol: &Symbol) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }
}
