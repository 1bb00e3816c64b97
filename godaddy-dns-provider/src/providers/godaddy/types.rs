//! GoDaddy API 类型定义

use serde::Deserialize;

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Decode `body`, tolerating empty or non-JSON payloads.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
