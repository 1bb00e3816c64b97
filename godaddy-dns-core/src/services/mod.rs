//! 业务逻辑服务层

mod domain_service;
mod record_service;

pub use domain_service::DomainService;
pub use record_service::RecordService;

use std::sync::Arc;

use godaddy_dns_provider::{DnsApi, ProviderError};

use crate::error::{CoreError, OperationContext};
use crate::types::DuplicatePolicy;

/// 服务上下文 - 持有所有依赖
///
/// 调用方创建此上下文并注入 registrar API 实现（测试时注入 mock）。
pub struct ServiceContext {
    /// Registrar API
    api: Arc<dyn DnsApi>,
    /// 重复记录处理策略
    duplicate_policy: DuplicatePolicy,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(api: Arc<dyn DnsApi>) -> Self {
        Self {
            api,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// 获取 API 实例
    pub fn api(&self) -> &Arc<dyn DnsApi> {
        &self.api
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// 处理 Provider 错误：按是否预期分级记录日志并附加操作上下文
    pub fn handle_provider_error(&self, context: OperationContext, err: ProviderError) -> CoreError {
        if err.is_expected() {
            log::warn!("{context}: {err}");
        } else {
            log::error!("{context}: {err}");
        }
        CoreError::Provider {
            context,
            source: err,
        }
    }
}
