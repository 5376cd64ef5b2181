//! CoinGecko market client.
//!
//! Symbols are CoinGecko coin ids (`bitcoin`, `ethereum`). The watchlist
//! stores them uppercased; they are lowercased again on the wire.

use super::{DataConverter, QuoteSource, join_symbols};
use crate::error::{Error, Result};
use crate::state::Quote;
use crate::watchlist::Symbol;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// One row of `GET /coins/markets`.
#[derive(Debug, Deserialize)]
pub(super) struct CoinMarket {
    pub id: String,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default)]
    pub high_24h: Option<Decimal>,
    #[serde(default)]
    pub low_24h: Option<Decimal>,
    #[serde(default)]
    pub price_change_24h: Option<Decimal>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
}

/// Quote source backed by the CoinGecko markets endpoint.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// CoinGecko rejects pages above this size.
    pub const MAX_PER_PAGE: usize = 250;

    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Decode a markets response body.
    pub fn decode(body: &str) -> Result<Vec<Quote>> {
        let value: Value = serde_json::from_str(body)?;

        if let Some(message) = error_message(&value) {
            return Err(Error::upstream(message));
        }

        let markets: Vec<CoinMarket> = serde_json::from_value(value)?;
        Ok(markets
            .into_iter()
            .filter_map(DataConverter::convert_coin_market)
            .collect())
    }
}

#[async_trait]
impl QuoteSource for CoinGeckoClient {
    async fn fetch_quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>> {
        if symbols.len() > Self::MAX_PER_PAGE {
            return Err(Error::invalid_input(format!(
                "CoinGecko accepts at most {} coins per request",
                Self::MAX_PER_PAGE
            )));
        }

        let url = format!("{}/coins/markets", self.base_url);
        let ids = join_symbols(symbols, true);
        let per_page = symbols.len().max(1).to_string();
        debug!("GET {} ids={}", url, ids);

        let body = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("ids", ids.as_str()),
                ("per_page", per_page.as_str()),
                ("sparkline", "false"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::decode(&body)
    }
}

/// Error payloads come as `{"error": "..."}` or
/// `{"status": {"error_message": "..."}}`.
fn error_message(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if let Some(error) = object.get("error") {
        return Some(
            error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string()),
        );
    }
    object
        .get("status")
        .and_then(|status| status.get("error_message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decode_markets() {
        let body = r#"[
            {
                "id": "bitcoin",
                "symbol": "btc",
                "current_price": 64000.5,
                "high_24h": 65000,
                "low_24h": 62000,
                "price_change_24h": 1000.5,
                "price_change_percentage_24h": 1.588,
                "roi": null
            },
            {
                "id": "dogecoin",
                "current_price": 0.12,
                "high_24h": null,
                "low_24h": null,
                "price_change_24h": null,
                "price_change_percentage_24h": null
            }
        ]"#;

        let quotes = CoinGeckoClient::decode(body).unwrap();
        assert_eq!(quotes.len(), 2);

        let btc = &quotes[0];
        assert_eq!(btc.symbol.as_str(), "BITCOIN");
        assert_eq!(btc.price, Some(dec!(64000.5)));
        assert_eq!(btc.change, Some(dec!(1000.5)));
        assert_eq!(btc.open, Some(dec!(63000)));
        assert_eq!(btc.day_high, Some(dec!(65000)));

        let doge = &quotes[1];
        assert_eq!(doge.price, Some(dec!(0.12)));
        assert_eq!(doge.open, None);
        assert_eq!(doge.change, None);
    }

    #[test]
    fn test_decode_error_payloads() {
        assert!(matches!(
            CoinGeckoClient::decode(r#"{"error": "invalid vs_currency"}"#),
            Err(Error::Upstream(m)) if m == "invalid vs_currency"
        ));
        assert!(matches!(
            CoinGeckoClient::decode(r#"{"status": {"error_code": 429, "error_message": "Throttled"}}"#),
            Err(Error::Upstream(m)) if m == "Throttled"
        ));
    }

    #[test]
    fn test_decode_unexpected_shape() {
        assert!(matches!(
            CoinGeckoClient::decode(r#"{"data": []}"#),
            Err(Error::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_oversized_request() {
        let client = CoinGeckoClient::new(reqwest::Client::new(), "http://localhost:1");
        let symbols: Vec<Symbol> = (0..=CoinGeckoClient::MAX_PER_PAGE)
            .filter_map(|i| Symbol::parse(&format!("coin{}", i)))
            .collect();

        assert!(matches!(
            client.fetch_quotes(&symbols).await,
            Err(Error::InvalidInput(_))
        ));
    }
}
