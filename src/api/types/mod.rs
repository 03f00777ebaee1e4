//! Query parameter types for the Revolut X REST API.
//!
//! Responses are returned as raw JSON; only request parameters are typed.

pub mod market_data;
pub mod trade;

// Re-export all types for convenience
pub use market_data::*;
pub use trade::*;
