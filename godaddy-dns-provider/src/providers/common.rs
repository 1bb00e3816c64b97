//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(
    provider_name: &str,
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider_name.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// 去掉域名末尾的点并转为小写
pub fn normalize_domain_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_lowercase()
}
