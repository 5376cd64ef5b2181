//! Data conversion utilities for API responses.

use super::coingecko::CoinMarket;
use super::yahoo::YahooQuote;
use crate::state::Quote;
use crate::watchlist::Symbol;

/// Converts API responses to internal state types.
pub struct DataConverter;

impl DataConverter {
    /// Convert a Yahoo quote row. Rows without a symbol are dropped.
    pub(super) fn convert_yahoo_quote(quote: YahooQuote) -> Option<Quote> {
        Some(Quote {
            symbol: Symbol::parse(&quote.symbol)?,
            price: quote.regular_market_price,
            change: quote.regular_market_change,
            change_percent: quote.regular_market_change_percent,
            day_high: quote.regular_market_day_high,
            day_low: quote.regular_market_day_low,
            open: quote.regular_market_open,
        })
    }

    /// Convert a CoinGecko market row.
    ///
    /// CoinGecko has no session open; the price 24h ago stands in for it.
    pub(super) fn convert_coin_market(market: CoinMarket) -> Option<Quote> {
        let open = match (market.current_price, market.price_change_24h) {
            (Some(price), Some(change)) => Some(price - change),
            _ => None,
        };

        Some(Quote {
            symbol: Symbol::parse(&market.id)?,
            price: market.current_price,
            change: market.price_change_24h,
            change_percent: market.price_change_percentage_24h,
            day_high: market.high_24h,
            day_low: market.low_24h,
            open,
        })
    }
}
