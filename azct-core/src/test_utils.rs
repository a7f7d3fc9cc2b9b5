//! 测试辅助模块
//!
//! 提供示例清单和便捷的测试工厂方法。

use std::collections::BTreeMap;
use std::sync::Arc;

use azct_provider::{
    Certificate, Container, InMemoryProvider, Inventory, KeyEntry, PropertyValue, PublicAccess,
    Resource, ResourceGroup, Secret, Subscription, UserInfo, VaultItemAttributes, VaultKey,
};

use crate::browser::Browser;
use crate::handlers::{KEY_VAULT_TYPE, STORAGE_ACCOUNT_TYPE};
use crate::registry::HandlerRegistry;
use crate::traits::BrowserConfig;

pub const SUB_ID: &str = "sub-1";
pub const SUB_NAME: &str = "Test";
pub const RG: &str = "rg1";
pub const VAULT_URL: &str = "https://kv-app.vault.azure.net/";

pub fn resource(rg: &str, resource_type: &str, name: &str) -> Resource {
    Resource {
        id: format!("/subscriptions/{SUB_ID}/resourceGroups/{rg}/providers/{resource_type}/{name}"),
        name: name.to_string(),
        resource_type: resource_type.to_string(),
        location: "westeurope".to_string(),
        resource_group: rg.to_string(),
        ..Default::default()
    }
}

fn enabled(enabled: bool) -> VaultItemAttributes {
    VaultItemAttributes {
        enabled,
        ..Default::default()
    }
}

/// One subscription, two groups, two storage accounts (one with a nested
/// container) and a vault holding one enabled and one disabled secret.
pub fn sample_inventory() -> Inventory {
    let mut vault = resource(RG, KEY_VAULT_TYPE, "kv-app");
    vault
        .properties
        .insert("vaultUri".to_string(), PropertyValue::from(VAULT_URL));

    let group = |name: &str| ResourceGroup {
        name: name.to_string(),
        location: "westeurope".to_string(),
        tags: BTreeMap::new(),
    };

    Inventory::new()
        .with_user(UserInfo {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            tenant_id: "tenant-1".to_string(),
        })
        .with_subscription(Subscription {
            id: SUB_ID.to_string(),
            name: "test".to_string(),
            display_name: SUB_NAME.to_string(),
            state: "Enabled".to_string(),
            tenant_id: "tenant-1".to_string(),
        })
        .with_resource_group(SUB_ID, group(RG))
        .with_resource_group(SUB_ID, group("rg2"))
        .with_resource(SUB_ID, resource(RG, STORAGE_ACCOUNT_TYPE, "stapp"))
        .with_resource(SUB_ID, vault)
        .with_resource(SUB_ID, resource(RG, "Microsoft.Web/sites", "web"))
        .with_resource(SUB_ID, resource("rg2", STORAGE_ACCOUNT_TYPE, "stlogs"))
        .with_container(
            "stapp",
            Container {
                name: "data".to_string(),
                public_access: PublicAccess::Blob,
                ..Default::default()
            },
        )
        .with_container(
            "stlogs",
            Container {
                name: "logs".to_string(),
                ..Default::default()
            },
        )
        .with_keys(
            "stapp",
            "data",
            [
                "a.txt",
                "b.txt",
                "folder1/c.txt",
                "folder1/sub/d.txt",
                "folder2/e.txt",
            ]
            .into_iter()
            .map(|key| KeyEntry {
                size: Some(2048),
                ..KeyEntry::new(key)
            }),
        )
        .with_secret(
            VAULT_URL,
            Secret {
                name: "db-password".to_string(),
                value: Some("hunter2".to_string()),
                content_type: "text/plain".to_string(),
                attributes: enabled(true),
            },
        )
        .with_secret(
            VAULT_URL,
            Secret {
                name: "old-token".to_string(),
                value: Some("expired".to_string()),
                content_type: String::new(),
                attributes: enabled(false),
            },
        )
        .with_vault_key(
            VAULT_URL,
            VaultKey {
                name: "signing".to_string(),
                key_type: "RSA".to_string(),
                attributes: enabled(true),
            },
        )
        .with_certificate(
            VAULT_URL,
            Certificate {
                name: "tls".to_string(),
                subject: "CN=app.example.com".to_string(),
                attributes: enabled(true),
                ..Default::default()
            },
        )
}

/// Browser over [`sample_inventory`] with the built-in handlers. The
/// provider is returned too so tests can inject failures.
pub fn create_test_browser(config: BrowserConfig) -> (Arc<InMemoryProvider>, Browser) {
    create_test_browser_with(HandlerRegistry::with_builtin_handlers(), config)
}

/// Same as [`create_test_browser`] with a caller-built registry.
pub fn create_test_browser_with(
    registry: HandlerRegistry,
    config: BrowserConfig,
) -> (Arc<InMemoryProvider>, Browser) {
    let provider = Arc::new(InMemoryProvider::new(sample_inventory()));
    let browser = Browser::new(provider.clone(), Arc::new(registry), config);
    (provider, browser)
}
