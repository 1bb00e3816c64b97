//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;
use std::time::Duration;

use godaddy_dns_provider::{
    ClientConfig, Credentials, DnsApi, DnsRecord, GodaddyProvider, RecordType, RetryPolicy,
    create_provider,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Retry policy with millisecond units so rate-limit tests finish quickly.
pub const FAST_RETRY: RetryPolicy = RetryPolicy {
    max_retries: 3,
    unit: Duration::from_millis(1),
};

/// 指向 mock server 的 Provider
pub fn mock_provider(base_url: &str) -> GodaddyProvider {
    mock_provider_with_retry(base_url, FAST_RETRY)
}

pub fn mock_provider_with_retry(base_url: &str, retry: RetryPolicy) -> GodaddyProvider {
    let credentials = Credentials::new(Some("test-key".into()), Some("test-secret".into()))
        .unwrap_or_else(|e| panic!("test credentials rejected: {e}"));
    let config = ClientConfig::new(credentials)
        .with_base_url(base_url)
        .with_retry(retry);
    GodaddyProvider::new(config).unwrap_or_else(|e| panic!("failed to build provider: {e}"))
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: Arc<dyn DnsApi>,
    pub domain: String,
}

impl TestContext {
    /// 创建 GoDaddy 测试上下文（读取 `GODADDY_*` 与 `TEST_DOMAIN`）
    pub fn godaddy() -> Option<Self> {
        let domain = env::var("TEST_DOMAIN").ok()?;
        let config = ClientConfig::from_env().ok()?;
        let provider = create_provider(config).ok()?;

        Some(Self { provider, domain })
    }

    /// 创建一条测试 TXT 记录并返回
    pub async fn create_test_record(&self) -> Option<DnsRecord> {
        let record = DnsRecord::new(
            RecordType::Txt,
            generate_test_record_name(),
            "integration-test",
            600,
        );
        self.provider
            .add_record(&self.domain, &record)
            .await
            .ok()
            .map(|()| record)
    }

    /// 清理测试记录组
    pub async fn cleanup_group(&self, record_type: RecordType, name: &str) {
        let _ = self
            .provider
            .delete_record_group(&self.domain, record_type, name)
            .await;
    }

    /// 查找并清理所有测试记录（以 _test- 开头的 TXT 记录组）
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self
            .provider
            .list_records_by_type(&self.domain, RecordType::Txt)
            .await
        {
            for record in records {
                if record.name.starts_with("_test-") {
                    self.cleanup_group(RecordType::Txt, &record.name).await;
                }
            }
        }
    }
}
