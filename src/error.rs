//! Error types for the tickertape application.

use thiserror::Error;

/// The main error type for tickertape.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// HTTP transport errors while talking to a quote source
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An error payload reported by the quote source itself
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or unwritable watchlist file
    #[error("Watchlist error: {0}")]
    Watchlist(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new upstream error.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new watchlist error.
    pub fn watchlist(msg: impl Into<String>) -> Self {
        Self::Watchlist(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Check if this error is recoverable (the next refresh may succeed).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Upstream(_) | Self::Serialization(_) | Self::Channel(_)
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::upstream("Invalid symbols").is_recoverable());
        assert!(Error::channel("closed").is_recoverable());
        assert!(!Error::watchlist("bad toml").is_recoverable());
        assert!(!Error::config("missing").is_recoverable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::upstream("Invalid symbols").to_string(),
            "Upstream error: Invalid symbols"
        );
        assert_eq!(
            Error::terminal("stream closed").to_string(),
            "Terminal error: stream closed"
        );
    }
}
