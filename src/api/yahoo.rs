//! Yahoo Finance quote client.

use super::{DataConverter, QuoteSource, join_symbols};
use crate::error::{Error, Result};
use crate::state::Quote;
use crate::watchlist::Symbol;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// `GET /v7/finance/quote` response envelope.
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponse,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Option<Vec<YahooQuote>>,
    #[serde(default)]
    error: Option<Value>,
}

/// The subset of a Yahoo quote row the dashboard displays.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct YahooQuote {
    pub symbol: String,
    #[serde(default)]
    pub regular_market_price: Option<Decimal>,
    #[serde(default)]
    pub regular_market_change: Option<Decimal>,
    #[serde(default)]
    pub regular_market_change_percent: Option<Decimal>,
    #[serde(default)]
    pub regular_market_day_high: Option<Decimal>,
    #[serde(default)]
    pub regular_market_day_low: Option<Decimal>,
    #[serde(default)]
    pub regular_market_open: Option<Decimal>,
}

/// Quote source backed by the Yahoo Finance quote endpoint.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Decode a quote response body.
    pub fn decode(body: &str) -> Result<Vec<Quote>> {
        let envelope: QuoteEnvelope = serde_json::from_str(body)?;
        let response = envelope.quote_response;

        if let Some(error) = response.error.filter(|e| !e.is_null()) {
            return Err(Error::upstream(error_message(&error)));
        }

        Ok(response
            .result
            .unwrap_or_default()
            .into_iter()
            .filter_map(DataConverter::convert_yahoo_quote)
            .collect())
    }
}

#[async_trait]
impl QuoteSource for YahooClient {
    async fn fetch_quotes(&self, symbols: &[Symbol]) -> Result<Vec<Quote>> {
        let url = format!("{}/v7/finance/quote", self.base_url);
        let joined = join_symbols(symbols, false);
        debug!("GET {} symbols={}", url, joined);

        let body = self
            .client
            .get(&url)
            .query(&[("symbols", joined.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Self::decode(&body)
    }
}

/// Yahoo reports errors either as a bare string or as an object with a
/// `description`.
fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(fields) => fields
            .get("description")
            .or_else(|| fields.get("message"))
            .or_else(|| fields.get("code"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}
