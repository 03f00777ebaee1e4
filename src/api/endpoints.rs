//! Endpoint methods on [`RevolutXClient`].
//!
//! Each method is a single [`RevolutXClient::send`] call returning the decoded
//! JSON payload.

use serde_json::Value;

use crate::api::client::RevolutXClient;
use crate::api::request::{HttpMethod, QueryParams};
use crate::api::response::Outcome;
use crate::api::types::*;

impl RevolutXClient {
    // =========================================================================
    // Account endpoints
    // =========================================================================

    /// Get all account balances.
    pub async fn get_balances(&self) -> Outcome {
        self.send(HttpMethod::Get, "/balances", None, None).await
    }

    /// Get all tradable currency pairs and their configuration.
    pub async fn get_currency_pairs(&self) -> Outcome {
        self.send(HttpMethod::Get, "/configuration/pairs", None, None).await
    }

    // =========================================================================
    // Order endpoints
    // =========================================================================

    /// Get all active orders.
    pub async fn get_active_orders(&self) -> Outcome {
        self.send(HttpMethod::Get, "/orders/active", None, None).await
    }

    /// Place a limit or market order.
    ///
    /// `order` is sent verbatim, e.g.
    /// `{"client_order_id": "...", "symbol": "BTC-EUR", "side": "buy", "order_configuration": {...}}`.
    pub async fn place_order(&self, order: &Value) -> Outcome {
        self.send(HttpMethod::Post, "/orders", None, Some(order)).await
    }

    /// Cancel all active orders, optionally only those for `symbol`.
    pub async fn cancel_all_orders(&self, symbol: Option<&str>) -> Outcome {
        let mut params = QueryParams::new();
        if let Some(symbol) = symbol {
            params.push("symbol", symbol);
        }
        self.send(HttpMethod::Delete, "/orders", Some(&params), None).await
    }

    // =========================================================================
    // Trade endpoints
    // =========================================================================

    /// Get the account's executed trades.
    pub async fn get_trades(&self, params: &TradesParams) -> Outcome {
        let query = QueryParams::from_serializable(params)?;
        self.send(HttpMethod::Get, "/trades", Some(&query), None).await
    }

    // =========================================================================
    // Market data endpoints
    // =========================================================================

    /// Get candles for `pair` at `timeframe`.
    pub async fn get_candles(&self, pair: &str, timeframe: &str) -> Outcome {
        let endpoint = format!(
            "/market-data/candles?pair={}&timeframe={}",
            urlencoding::encode(pair),
            urlencoding::encode(timeframe)
        );
        self.send(HttpMethod::Get, &endpoint, None, None).await
    }

    /// Get the authenticated order book for `pair`.
    ///
    /// `limit` defaults to [`DEFAULT_ORDER_BOOK_LIMIT`].
    pub async fn get_order_book(&self, pair: &str, limit: Option<u32>) -> Outcome {
        let endpoint = format!(
            "/market-data/order-book?pair={}&limit={}",
            urlencoding::encode(pair),
            limit.unwrap_or(DEFAULT_ORDER_BOOK_LIMIT)
        );
        self.send(HttpMethod::Get, &endpoint, None, None).await
    }

    // =========================================================================
    // Public market data endpoints
    // =========================================================================

    /// Get historical OHLCV candles.
    pub async fn get_public_candles(&self, params: &CandlesParams) -> Outcome {
        let query = QueryParams::from_serializable(params)?;
        self.send(HttpMethod::Get, "/public/candles", Some(&query), None).await
    }

    /// Get the most recent trades for `symbol`.
    pub async fn get_last_trades(&self, symbol: &str) -> Outcome {
        let params = QueryParams::new().with("symbol", symbol);
        self.send(HttpMethod::Get, "/public/last-trades", Some(&params), None).await
    }

    /// Get the public order book for `symbol`.
    ///
    /// `depth` defaults to [`DEFAULT_ORDER_BOOK_DEPTH`].
    pub async fn get_public_order_book(&self, symbol: &str, depth: Option<u32>) -> Outcome {
        let params = QueryParams::new()
            .with("symbol", symbol)
            .with("depth", depth.unwrap_or(DEFAULT_ORDER_BOOK_DEPTH));
        self.send(HttpMethod::Get, "/public/order-book", Some(&params), None).await
    }

    /// Get the latest buy and sell prices for `symbol`.
    pub async fn get_quote(&self, symbol: &str) -> Outcome {
        let params = QueryParams::new().with("symbol", symbol);
        self.send(HttpMethod::Get, "/public/quote", Some(&params), None).await
    }
}
