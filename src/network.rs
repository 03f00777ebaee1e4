//! Network constants for the Revolut X SDK.

use std::time::Duration;

/// Default REST API base URL for Revolut X.
pub const DEFAULT_API_URL: &str = "https://revx.revolut.com";

/// Version prefix every signed path starts with.
pub const API_PREFIX: &str = "/api/1.0";

/// Per-call timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
