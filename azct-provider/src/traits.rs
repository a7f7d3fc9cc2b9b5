use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    BlobDetail, Certificate, Container, KeyEntry, Resource, ResourceGroup, ResourceTypeSummary,
    Secret, Subscription, UserInfo, VaultKey,
};

/// 资源查询范围
///
/// 管理面的列表请求总是限定在某个订阅内，可选地再限定资源组和资源类型。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceScope {
    /// 订阅 ID
    pub subscription_id: String,
    /// 资源组名称（`None` 表示整个订阅）
    pub resource_group: Option<String>,
    /// 资源类型键（`None` 表示所有类型）
    pub resource_type: Option<String>,
}

impl ResourceScope {
    /// 整个订阅
    pub fn subscription(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: None,
            resource_type: None,
        }
    }

    /// 限定资源组
    #[must_use]
    pub fn in_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = Some(resource_group.into());
        self
    }

    /// 限定资源类型
    #[must_use]
    pub fn of_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// 资源是否落在此范围内（资源组、类型均不区分大小写）
    pub fn contains(&self, resource: &Resource) -> bool {
        let group_ok = self
            .resource_group
            .as_deref()
            .is_none_or(|rg| rg.eq_ignore_ascii_case(&resource.resource_group));
        let type_ok = self
            .resource_type
            .as_deref()
            .is_none_or(|t| t.eq_ignore_ascii_case(&resource.resource_type));
        group_ok && type_ok
    }
}

/// 存储账号定位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccountRef {
    /// 订阅 ID
    pub subscription_id: String,
    /// 资源组名称
    pub resource_group: String,
    /// 存储账号名称
    pub account: String,
}

/// 资源清单提供者 Trait
///
/// 浏览器核心通过此 trait 获取全部数据。实现方负责认证、分页、重试与超时；
/// 核心只等待结果或错误，不做任何重试。
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// 提供者标识符（用于错误与日志）
    fn id(&self) -> &'static str;

    /// 获取当前登录身份
    async fn current_user(&self) -> Result<UserInfo>;

    /// 获取订阅列表
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    /// 获取订阅下的资源组列表
    async fn list_resource_groups(&self, subscription_id: &str) -> Result<Vec<ResourceGroup>>;

    /// 获取范围内的资源列表
    async fn list_resources(&self, scope: &ResourceScope) -> Result<Vec<Resource>>;

    /// 获取范围内按类型聚合的资源数量
    ///
    /// 默认实现拉取完整资源列表后在本地聚合，结果按类型键排序。
    /// 提供者可覆写以使用服务端聚合查询。
    async fn resource_type_summary(
        &self,
        scope: &ResourceScope,
    ) -> Result<Vec<ResourceTypeSummary>> {
        let resources = self.list_resources(scope).await?;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for resource in resources {
            *counts.entry(resource.resource_type).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(resource_type, count)| ResourceTypeSummary {
                resource_type,
                count,
            })
            .collect())
    }

    // ============ 对象存储 ============

    /// 获取存储账号下的容器列表
    async fn list_containers(&self, account: &StorageAccountRef) -> Result<Vec<Container>>;

    /// 获取容器内的扁平 key 列表
    ///
    /// `prefix` 为空字符串时返回全部 key。返回的是扁平列表，不做目录折叠。
    async fn list_keys(
        &self,
        account: &StorageAccountRef,
        container: &str,
        prefix: &str,
    ) -> Result<Vec<KeyEntry>>;

    /// 获取单个 blob 详情
    async fn get_blob_detail(
        &self,
        account: &StorageAccountRef,
        container: &str,
        key: &str,
    ) -> Result<BlobDetail>;

    // ============ 密钥保管库 ============

    /// 获取 vault 中的 secret 列表（不含值）
    async fn list_secrets(&self, vault_url: &str) -> Result<Vec<Secret>>;

    /// 获取 secret 详情
    async fn get_secret(&self, vault_url: &str, name: &str) -> Result<Secret>;

    /// 获取 secret 的当前值
    async fn get_secret_value(&self, vault_url: &str, name: &str) -> Result<String>;

    /// 获取 vault 中的 key 列表
    async fn list_vault_keys(&self, vault_url: &str) -> Result<Vec<VaultKey>>;

    /// 获取 key 详情
    async fn get_vault_key(&self, vault_url: &str, name: &str) -> Result<VaultKey>;

    /// 获取 vault 中的证书列表
    async fn list_certificates(&self, vault_url: &str) -> Result<Vec<Certificate>>;

    /// 获取证书详情
    async fn get_certificate(&self, vault_url: &str, name: &str) -> Result<Certificate>;
}
