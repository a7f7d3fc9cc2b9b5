//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::BTreeMap;

use azct_provider::{
    Container, Inventory, KeyEntry, PropertyValue, PublicAccess, Resource, ResourceGroup, Secret,
    Subscription, UserInfo, VaultItemAttributes, VaultKey,
};

pub const SUB_ID: &str = "00000000-0000-0000-0000-000000000001";
pub const VAULT_URL: &str = "https://kv-app.vault.azure.net/";

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
}

pub fn resource(rg: &str, resource_type: &str, name: &str) -> Resource {
    Resource {
        id: format!("/subscriptions/{SUB_ID}/resourceGroups/{rg}/providers/{resource_type}/{name}"),
        name: name.to_string(),
        resource_type: resource_type.to_string(),
        location: "westeurope".to_string(),
        resource_group: rg.to_string(),
        tags: BTreeMap::new(),
        properties: BTreeMap::new(),
    }
}

/// 构建一份包含存储账号与 Key Vault 的示例清单
pub fn sample_inventory() -> Inventory {
    let mut vault = resource("rg-app", "Microsoft.KeyVault/vaults", "kv-app");
    vault
        .properties
        .insert("vaultUri".to_string(), PropertyValue::from(VAULT_URL));

    Inventory::new()
        .with_user(UserInfo {
            name: "Dev User".to_string(),
            email: "dev@example.com".to_string(),
            tenant_id: "tenant-1".to_string(),
        })
        .with_subscription(Subscription {
            id: SUB_ID.to_string(),
            name: "dev".to_string(),
            display_name: "Development".to_string(),
            state: "Enabled".to_string(),
            tenant_id: "tenant-1".to_string(),
        })
        .with_resource_group(
            SUB_ID,
            ResourceGroup {
                name: "rg-app".to_string(),
                location: "westeurope".to_string(),
                tags: BTreeMap::new(),
            },
        )
        .with_resource(
            SUB_ID,
            resource("rg-app", "Microsoft.Storage/storageAccounts", "stapp"),
        )
        .with_resource(
            SUB_ID,
            resource("rg-app", "Microsoft.Storage/storageAccounts", "stlogs"),
        )
        .with_resource(SUB_ID, vault)
        .with_resource(SUB_ID, resource("rg-other", "Microsoft.Web/sites", "web"))
        .with_container(
            "stapp",
            Container {
                name: "data".to_string(),
                last_modified: None,
                etag: String::new(),
                public_access: PublicAccess::None,
                metadata: BTreeMap::new(),
            },
        )
        .with_keys(
            "stapp",
            "data",
            ["a.txt", "folder1/c.txt", "folder1/sub/d.txt"]
                .into_iter()
                .map(KeyEntry::new),
        )
        .with_secret(
            VAULT_URL,
            Secret {
                name: "db-password".to_string(),
                value: Some("hunter2".to_string()),
                content_type: "text/plain".to_string(),
                attributes: VaultItemAttributes {
                    enabled: true,
                    ..VaultItemAttributes::default()
                },
            },
        )
        .with_vault_key(
            VAULT_URL,
            VaultKey {
                name: "signing".to_string(),
                key_type: "RSA".to_string(),
                attributes: VaultItemAttributes::default(),
            },
        )
}
