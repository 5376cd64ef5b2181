//! Quote source integration.
//!
//! This module provides the [`QuoteSource`] capability the refresh
//! coordinator polls, plus HTTP implementations for Yahoo Finance and
//! CoinGecko.

mod coingecko;
mod converter;
mod yahoo;

pub use coingecko::CoinGeckoClient;
use converter::DataConverter;
pub use yahoo::YahooClient;

use crate::config::{ApiConfig, Provider};
use crate::error::{Error, Result};
use crate::state::Quote;
use crate::watchlist::Symbol;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches current quotes for a set of symbols.
///
/// The returned quotes need not follow the order of `symbols`, and symbols
/// the upstream does not know may be missing from the result. An `Err`
/// means none of the data is usable.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>>;
}

/// Builder for the configured quote source.
pub struct QuoteSourceBuilder {
    config: ApiConfig,
}

impl QuoteSourceBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the quote source for the configured provider.
    pub fn build(self) -> Result<Arc<dyn QuoteSource>> {
        let client = http_client(&self.config)?;
        let base_url = self.config.base_url();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(Error::config(format!(
                "Invalid base_url: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        tracing::info!(
            "Using {:?} quote source at {} (timeout {}s)",
            self.config.provider,
            base_url,
            self.config.timeout().as_secs()
        );

        Ok(match self.config.provider {
            Provider::Yahoo => Arc::new(YahooClient::new(client, base_url)),
            Provider::CoinGecko => Arc::new(CoinGeckoClient::new(client, base_url)),
        })
    }
}

impl Default for QuoteSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn http_client(config: &ApiConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()?)
}

/// Join symbols for a comma separated query parameter.
fn join_symbols(symbols: &[Symbol], lowercase: bool) -> String {
    symbols
        .iter()
        .map(|s| {
            if lowercase {
                s.as_str().to_lowercase()
            } else {
                s.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_symbols() {
        let symbols: Vec<Symbol> = ["aapl", "ibm"].iter().filter_map(|s| Symbol::parse(s)).collect();
        assert_eq!(join_symbols(&symbols, false), "AAPL,IBM");
        assert_eq!(join_symbols(&symbols, true), "aapl,ibm");
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        let config = ApiConfig {
            base_url: Some("ftp://example.com".to_string()),
            ..ApiConfig::default()
        };
        assert!(matches!(
            QuoteSourceBuilder::new().config(config).build(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builder_accepts_both_providers() {
        for provider in [Provider::Yahoo, Provider::CoinGecko] {
            let config = ApiConfig {
                provider,
                ..ApiConfig::default()
            };
            assert!(QuoteSourceBuilder::new().config(config).build().is_ok());
        }
    }
}
