//! Market data types for the Revolut X REST API.

use serde::{Deserialize, Serialize};

/// Default depth for GET /public/order-book.
pub const DEFAULT_ORDER_BOOK_DEPTH: u32 = 50;

/// Default level count for GET /market-data/order-book.
pub const DEFAULT_ORDER_BOOK_LIMIT: u32 = 50;

/// Query parameters for GET /public/candles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandlesParams {
    /// Trading pair, e.g. `BTC-EUR` (required)
    pub symbol: String,
    /// Candle granularity, e.g. `GRANULARITY_ONE_MINUTE` (required)
    pub timeframe: String,
    /// Start timestamp (milliseconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// End timestamp (milliseconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

impl CandlesParams {
    /// Create new params with required symbol and timeframe.
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            ..Default::default()
        }
    }

    /// Set start timestamp.
    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    /// Set end timestamp.
    pub fn with_end(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }

    /// Set time range.
    pub fn with_time_range(mut self, start: i64, end: i64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::QueryParams;

    #[test]
    fn test_candles_params() {
        let params = CandlesParams::new("BTC-EUR", "GRANULARITY_ONE_HOUR").with_time_range(1000, 2000);

        assert_eq!(params.symbol, "BTC-EUR");
        assert_eq!(params.timeframe, "GRANULARITY_ONE_HOUR");
        assert_eq!(params.start, Some(1000));
        assert_eq!(params.end, Some(2000));
    }

    #[test]
    fn test_candles_query_order() {
        let params = CandlesParams::new("ETH-EUR", "GRANULARITY_FIVE_MINUTES").with_end(99);
        let query = QueryParams::from_serializable(&params).unwrap();
        assert_eq!(
            query.encode().unwrap(),
            "symbol=ETH-EUR&timeframe=GRANULARITY_FIVE_MINUTES&end=99"
        );
    }
}
