//! 类型定义模块

mod column;
mod snapshot;

pub use column::{Alignment, Column, ColumnWidth};
pub use snapshot::{KeyHint, StatusSummary, ViewSnapshot};

// Re-export provider 库的公共类型
pub use azct_provider::{
    BlobDetail, Certificate, Container, KeyEntry, PropertyValue, PublicAccess, Resource,
    ResourceGroup, ResourceTypeSummary, Secret, Subscription, UserInfo, VaultItemAttributes,
    VaultKey,
};
