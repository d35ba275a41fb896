//! `lastUpdated` values for generated `maven-metadata.xml` files.

use chrono::{DateTime, Utc};

/// Environment variable that pins the timestamp for reproducible runs.
pub const MOCK_ENV: &str = "MOCK_NEXUS";

/// Timestamp used while [`MOCK_ENV`] is set.
pub const MOCK_TIMESTAMP: &str = "11111111111111";

/// Current `lastUpdated` value in `yyyymmddHHMMss` form (UTC), or
/// [`MOCK_TIMESTAMP`] when `MOCK_NEXUS` is set to a non-empty value.
pub fn last_updated() -> String {
    let mocked = std::env::var(MOCK_ENV)
        .map(|v| !v.is_empty())
        .unwrap_or(false);
    if mocked {
        MOCK_TIMESTAMP.to_string()
    } else {
        format_timestamp(Utc::now())
    }
}

/// Format an instant the way Maven writes `lastUpdated`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}
