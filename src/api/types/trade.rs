//! Trade-related types for the Revolut X REST API.

use serde::{Deserialize, Serialize};

/// Default page size for GET /trades.
pub const DEFAULT_TRADES_LIMIT: u32 = 100;

/// Query parameters for GET /trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradesParams {
    /// Filter by trading pair, e.g. `BTC-EUR`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Max results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Filter by order ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl Default for TradesParams {
    fn default() -> Self {
        Self {
            symbol: None,
            limit: Some(DEFAULT_TRADES_LIMIT),
            order_id: None,
        }
    }
}

impl TradesParams {
    /// Create params with the default limit and no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set symbol filter.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Set result limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Drop the limit and use the server default.
    pub fn without_limit(mut self) -> Self {
        self.limit = None;
        self
    }

    /// Set order ID filter.
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}
