//! 视图定义

use serde::Serialize;

/// 视图枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ViewKind {
    /// 订阅列表
    #[default]
    Subscriptions,
    /// 订阅下的资源组
    ResourceGroups,
    /// 资源组内按类型聚合的数量
    ResourceTypesSummary,
    /// 资源组内的全部资源
    ResourceList,
    /// 按类型过滤的资源
    ResourceTypeFiltered,
    /// 存储账号的容器列表
    StorageExplorer,
    /// 容器内的虚拟目录
    BlobBrowser,
    /// Key Vault 条目类型
    VaultExplorer,
    /// Key Vault secrets
    VaultSecrets,
    /// Key Vault keys
    VaultKeys,
    /// Key Vault certificates
    VaultCertificates,
    /// 已注册资源类型菜单
    Menu,
}

impl ViewKind {
    /// 获取视图名称
    pub fn title(self) -> &'static str {
        match self {
            Self::Subscriptions => "Subscriptions",
            Self::ResourceGroups => "Resource Groups",
            Self::ResourceTypesSummary => "Resource List",
            Self::ResourceList | Self::ResourceTypeFiltered => "Resources",
            Self::StorageExplorer => "Storage Explorer",
            Self::BlobBrowser => "Blobs",
            Self::VaultExplorer => "Key Vault Explorer",
            Self::VaultSecrets => "Secrets",
            Self::VaultKeys => "Keys",
            Self::VaultCertificates => "Certificates",
            Self::Menu => "Resource Types Menu",
        }
    }

    /// 是否是 Key Vault 条目视图
    pub fn is_vault_item_view(self) -> bool {
        matches!(
            self,
            Self::VaultSecrets | Self::VaultKeys | Self::VaultCertificates
        )
    }
}
