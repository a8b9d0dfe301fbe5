//! Shared helpers for integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use dutyboard::HttpPersistence;
use dutyboard::config::ApiConfig;
use wiremock::MockServer;

/// Client pointed at `{mock}/api`.
pub(crate) fn persistence_for(server: &MockServer) -> HttpPersistence {
    HttpPersistence::new(&ApiConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_secs: 5,
    })
}

/// A local timestamp on Monday 2024-06-03.
pub(crate) fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid reference time")
}
