//! 域名管理服务

use std::sync::Arc;

use godaddy_dns_provider::{
    DomainContactSet, DomainContacts, DomainDetail, DomainSummary, ProviderError,
};

use crate::error::{CoreError, CoreResult, OperationContext};
use crate::services::ServiceContext;
use crate::types::DomainSettings;
use crate::types::domain::changed_contacts;

/// 域名管理服务
pub struct DomainService {
    ctx: Arc<ServiceContext>,
}

impl DomainService {
    /// 创建域名服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出账号下的所有域名
    pub async fn list_domains(&self) -> CoreResult<Vec<DomainSummary>> {
        match self.ctx.api().list_domains().await {
            Ok(domains) => Ok(domains),
            Err(e) => Err(self
                .ctx
                .handle_provider_error(OperationContext::domain("list_domains", "*"), e)),
        }
    }

    /// 获取域名详情
    pub async fn get_domain(&self, domain: &str) -> CoreResult<DomainDetail> {
        self.fetch(OperationContext::domain("get_domain", domain))
            .await
    }

    /// 更新域名设置
    ///
    /// Only settings that differ from the registrar's current state are sent; when
    /// nothing differs no write request is made. Returns the domain as the registrar
    /// reports it afterwards.
    pub async fn update_domain(
        &self,
        domain: &str,
        settings: &DomainSettings,
    ) -> CoreResult<DomainDetail> {
        let context = OperationContext::domain("update_domain", domain);
        let current = self.fetch(context.clone()).await?;

        let update = settings.domain_changes(&current);
        let contacts = settings.contact_changes(&DomainContactSet {
            contact_admin: current.contact_admin.clone(),
            contact_billing: current.contact_billing.clone(),
            contact_registrant: current.contact_registrant.clone(),
            contact_tech: current.contact_tech.clone(),
        });

        if update.is_empty() && contacts.is_empty() {
            log::debug!("{context}: already up to date");
            return Ok(current);
        }

        let api = self.ctx.api();
        if !update.is_empty() {
            api.update_domain(domain, &update)
                .await
                .map_err(|e| self.ctx.handle_provider_error(context.clone(), e))?;
        }
        if !contacts.is_empty() {
            api.update_contacts(domain, &contacts)
                .await
                .map_err(|e| self.ctx.handle_provider_error(context.clone(), e))?;
        }

        log::info!("{context}: settings updated");
        self.fetch(context).await
    }

    /// 获取域名联系人
    pub async fn get_contacts(&self, domain: &str) -> CoreResult<DomainContactSet> {
        let context = OperationContext::domain("get_contacts", domain);
        match self.ctx.api().get_contacts(domain).await {
            Ok(contacts) => Ok(contacts),
            Err(e) => Err(self.not_found_or(context, e)),
        }
    }

    /// 更新域名联系人，仅提交有变化的联系人。返回是否发送了写请求。
    pub async fn update_contacts(&self, domain: &str, desired: &DomainContacts) -> CoreResult<bool> {
        let context = OperationContext::domain("update_contacts", domain);
        let current = match self.ctx.api().get_contacts(domain).await {
            Ok(contacts) => contacts,
            Err(e) => return Err(self.not_found_or(context, e)),
        };

        let changes = changed_contacts(desired, &current);
        if changes.is_empty() {
            log::debug!("{context}: contacts unchanged");
            return Ok(false);
        }

        match self.ctx.api().update_contacts(domain, &changes).await {
            Ok(()) => Ok(true),
            Err(e) => Err(self.ctx.handle_provider_error(context, e)),
        }
    }

    async fn fetch(&self, context: OperationContext) -> CoreResult<DomainDetail> {
        match self.ctx.api().get_domain(&context.domain).await {
            Ok(detail) => Ok(detail),
            Err(e) => Err(self.not_found_or(context, e)),
        }
    }

    /// 404 映射为 `DomainNotFound`，其他错误交给 `handle_provider_error`
    fn not_found_or(&self, context: OperationContext, err: ProviderError) -> CoreError {
        if err.is_not_found() {
            log::warn!("{context}: {err}");
            CoreError::DomainNotFound { context }
        } else {
            self.ctx.handle_provider_error(context, err)
        }
    }
}
