use std::collections::HashMap;

use reqwest::Method;
use serde::Serialize;

use crate::api::{ApiError, RevoltClient};

/// One synced settings entry: last-modified timestamp (ms) and raw JSON.
pub type SyncedEntry = (i64, String);

#[derive(Debug, Serialize)]
struct FetchSettings<'a> {
    keys: &'a [&'a str],
}

impl RevoltClient {
    /// Fetch synced settings documents by key. Missing keys are absent
    /// from the returned map.
    pub async fn fetch_synced_settings(
        &self,
        keys: &[&str],
    ) -> Result<HashMap<String, SyncedEntry>, ApiError> {
        let req = self
            .authed(Method::POST, "/sync/settings/fetch")?
            .json(&FetchSettings { keys });
        self.send_json(req).await
    }

    /// Store one synced settings document.
    pub async fn set_synced_setting(
        &self,
        key: &str,
        value: &str,
        timestamp_ms: i64,
    ) -> Result<(), ApiError> {
        let body = HashMap::from([(key, value)]);
        let req = self
            .authed(Method::POST, "/sync/settings/set")?
            .query(&[("timestamp", timestamp_ms)])
            .json(&body);
        self.send_empty(req).await
    }
}
