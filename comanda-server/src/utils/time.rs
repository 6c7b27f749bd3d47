//! Time helpers
//!
//! Repositories only ever see `i64` unix millis; formatting for API
//! output happens at the handler edge.

use chrono::{DateTime, Utc};

/// Current wall-clock time as unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Unix millis → RFC 3339 string (UTC), for API responses
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_formatting() {
        assert_eq!(millis_to_rfc3339(0), "1970-01-01T00:00:00+00:00");
        assert_eq!(millis_to_rfc3339(1_700_000_000_000), "2023-11-14T22:13:20+00:00");
    }
}
