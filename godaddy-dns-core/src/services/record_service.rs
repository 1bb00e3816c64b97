//! DNS 记录管理服务
//!
//! The registrar only reads and writes whole record groups (every record sharing a
//! type and name). This service layers single-record create/update/delete on top of
//! that by reading the group, editing it locally and writing the result back.
//!
//! Two writers editing the same group concurrently can overwrite each other: the
//! read-modify-write is not atomic on the registrar side.

use std::sync::Arc;

use godaddy_dns_provider::{DnsRecord, ProviderError, RecordType, validate_record};

use crate::error::{CoreError, CoreResult, OperationContext};
use crate::services::ServiceContext;
use crate::types::{DuplicatePolicy, ImportId, ImportedRecord, RecordKey};

/// DNS 记录管理服务
pub struct RecordService {
    ctx: Arc<ServiceContext>,
}

impl RecordService {
    /// 创建记录服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 读取整个记录组。组不存在时返回空列表；域名不存在时返回 provider 错误。
    pub async fn read_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> CoreResult<Vec<DnsRecord>> {
        let context = OperationContext::group("read_group", domain, record_type, name);
        match self
            .ctx
            .api()
            .get_record_group(domain, record_type, name)
            .await
        {
            Ok(records) => Ok(records),
            Err(e) => Err(self.ctx.handle_provider_error(context, e)),
        }
    }

    /// Alias of [`read_group`](Self::read_group).
    pub async fn list_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> CoreResult<Vec<DnsRecord>> {
        self.read_group(domain, record_type, name).await
    }

    /// 读取单条记录，不存在时返回 `None`
    pub async fn read_record(&self, key: &RecordKey) -> CoreResult<Option<DnsRecord>> {
        let context = OperationContext::group("read_record", &key.domain, key.record_type, &key.name);
        let group = self.fetch_group(&context, &key.domain, key.record_type, &key.name).await?;
        Ok(group.into_iter().find(|r| r.data == key.data))
    }

    /// 列出域名下的记录
    ///
    /// Type and name together read one group, type alone reads every group of that
    /// type, and otherwise the whole zone is read and optionally filtered by name.
    pub async fn list_records(
        &self,
        domain: &str,
        record_type: Option<RecordType>,
        name: Option<&str>,
    ) -> CoreResult<Vec<DnsRecord>> {
        let api = self.ctx.api();
        let result = match (record_type, name) {
            (Some(t), Some(n)) => api.get_record_group(domain, t, n).await,
            (Some(t), None) => api.list_records_by_type(domain, t).await,
            (None, name) => api.list_records(domain).await.map(|records| match name {
                Some(n) => records.into_iter().filter(|r| r.name == n).collect(),
                None => records,
            }),
        };

        result.map_err(|e| {
            let context = OperationContext {
                operation: "list_records",
                domain: domain.to_string(),
                record_type,
                name: name.map(str::to_string),
            };
            self.ctx.handle_provider_error(context, e)
        })
    }

    /// 创建 DNS 记录
    ///
    /// Appends `record` to its group. With [`DuplicatePolicy::Reject`] or
    /// [`DuplicatePolicy::Skip`] the group is read first and a record with the same
    /// data fails or short-circuits the call.
    pub async fn create_record(&self, domain: &str, record: &DnsRecord) -> CoreResult<RecordKey> {
        let context =
            OperationContext::group("create_record", domain, record.record_type, &record.name);
        validate(&context, record)?;

        let policy = self.ctx.duplicate_policy();
        if policy != DuplicatePolicy::Allow {
            let group = self
                .fetch_group(&context, domain, record.record_type, &record.name)
                .await?;
            if group.iter().any(|r| r.data == record.data) {
                if policy == DuplicatePolicy::Reject {
                    return Err(CoreError::DuplicateRecord {
                        context,
                        data: record.data.clone(),
                    });
                }
                log::info!("{context}: '{}' already present, skipped", record.data);
                return Ok(RecordKey::of(domain, record));
            }
        }

        self.ctx
            .api()
            .add_record(domain, record)
            .await
            .map_err(|e| self.ctx.handle_provider_error(context.clone(), e))?;

        log::debug!("{context}: created '{}'", record.data);
        Ok(RecordKey::of(domain, record))
    }

    /// 更新 DNS 记录
    ///
    /// Replaces the record addressed by `key` with `record` inside the same group,
    /// keeping every sibling untouched. Moving a record to another type or name is
    /// a delete plus a create and is rejected here.
    pub async fn update_record(&self, key: &RecordKey, record: &DnsRecord) -> CoreResult<RecordKey> {
        let context =
            OperationContext::group("update_record", &key.domain, key.record_type, &key.name);
        if record.record_type != key.record_type || record.name != key.name {
            return Err(CoreError::GroupMismatch {
                context,
                record_type: record.record_type,
                name: record.name.clone(),
            });
        }
        validate(&context, record)?;

        let mut group = self
            .fetch_group(&context, &key.domain, key.record_type, &key.name)
            .await?;
        let Some(index) = group.iter().position(|r| r.data == key.data) else {
            return Err(CoreError::RecordNotFound {
                context,
                data: key.data.clone(),
            });
        };

        let duplicate = record.data != key.data
            && group
                .iter()
                .enumerate()
                .any(|(i, r)| i != index && r.data == record.data);

        match (duplicate, self.ctx.duplicate_policy()) {
            (true, DuplicatePolicy::Reject) => {
                return Err(CoreError::DuplicateRecord {
                    context,
                    data: record.data.clone(),
                });
            }
            (true, DuplicatePolicy::Skip) => {
                // the sibling already carries the new data
                group.remove(index);
            }
            _ => group[index] = record.clone(),
        }

        self.write_group(&context, &key.domain, key.record_type, &key.name, &group)
            .await?;

        log::debug!("{context}: '{}' -> '{}'", key.data, record.data);
        Ok(RecordKey::of(&key.domain, record))
    }

    /// 删除 DNS 记录
    ///
    /// Removes every record in the group whose data equals `key.data`. Deleting a
    /// record that no longer exists succeeds.
    pub async fn delete_record(&self, key: &RecordKey) -> CoreResult<()> {
        let context =
            OperationContext::group("delete_record", &key.domain, key.record_type, &key.name);

        let group = self
            .fetch_group(&context, &key.domain, key.record_type, &key.name)
            .await?;
        let (removed, remaining): (Vec<_>, Vec<_>) =
            group.into_iter().partition(|r| r.data == key.data);

        if removed.is_empty() {
            log::warn!("{context}: '{}' already absent", key.data);
            return Ok(());
        }

        self.write_group(&context, &key.domain, key.record_type, &key.name, &remaining)
            .await
            .or_else(|e| match e {
                CoreError::Provider { ref source, .. } if source.is_not_found() => {
                    log::warn!("{context}: group disappeared during delete");
                    Ok(())
                }
                e => Err(e),
            })?;

        log::debug!(
            "{context}: deleted {} record(s), {} left",
            removed.len(),
            remaining.len()
        );
        Ok(())
    }

    /// 导入记录
    ///
    /// `domain/type/name` reads the group, which must hold exactly one record.
    /// `domain/type/name/data` is returned as-is without contacting the registrar.
    pub async fn import(&self, id: &str) -> CoreResult<ImportedRecord> {
        let (domain, record_type, name) = match ImportId::parse(id)? {
            ImportId::Record(key) => return Ok(ImportedRecord { key, record: None }),
            ImportId::Group {
                domain,
                record_type,
                name,
            } => (domain, record_type, name),
        };

        let context = OperationContext::group("import_record", &domain, record_type, &name);
        let mut group = self.fetch_group(&context, &domain, record_type, &name).await?;

        match group.len() {
            0 => Err(CoreError::EmptyGroup { context }),
            1 => {
                let record = group.remove(0);
                Ok(ImportedRecord {
                    key: RecordKey::of(&domain, &record),
                    record: Some(record),
                })
            }
            count => Err(CoreError::AmbiguousImport {
                domain,
                record_type,
                name,
                count,
            }),
        }
    }

    /// Read a group, treating a 404 as an empty group.
    async fn fetch_group(
        &self,
        context: &OperationContext,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> CoreResult<Vec<DnsRecord>> {
        match self
            .ctx
            .api()
            .get_record_group(domain, record_type, name)
            .await
        {
            Ok(records) => Ok(records),
            Err(ProviderError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(self.ctx.handle_provider_error(context.clone(), e)),
        }
    }

    /// Write `records` as the full group; an empty list deletes it.
    async fn write_group(
        &self,
        context: &OperationContext,
        domain: &str,
        record_type: RecordType,
        name: &str,
        records: &[DnsRecord],
    ) -> CoreResult<()> {
        let api = self.ctx.api();
        let result = if records.is_empty() {
            api.delete_record_group(domain, record_type, name).await
        } else {
            api.replace_record_group(domain, record_type, name, records)
                .await
        };
        result.map_err(|e| self.ctx.handle_provider_error(context.clone(), e))
    }
}

fn validate(context: &OperationContext, record: &DnsRecord) -> CoreResult<()> {
    validate_record(record).map_err(|source| CoreError::Validation {
        context: context.clone(),
        source,
    })
}
