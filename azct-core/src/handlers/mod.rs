//! Built-in resource handlers

pub mod detail;
mod default;
mod key_vault;
mod storage;

pub use default::DefaultHandler;
pub use key_vault::KeyVaultHandler;
pub use storage::StorageAccountHandler;

use azct_provider::{PropertyValue, Resource, resource_group_from_id};

/// Type key of storage accounts.
pub const STORAGE_ACCOUNT_TYPE: &str = "Microsoft.Storage/storageAccounts";

/// Type key of secrets vaults.
pub const KEY_VAULT_TYPE: &str = "Microsoft.KeyVault/vaults";

/// Data-plane URL of a vault: the `vaultUri` property, else derived from
/// the vault name.
pub fn vault_url_for(resource: &Resource) -> String {
    resource
        .properties
        .get("vaultUri")
        .and_then(|value| match value {
            PropertyValue::String(url) if !url.is_empty() => Some(url.clone()),
            _ => None,
        })
        .unwrap_or_else(|| format!("https://{}.vault.azure.net/", resource.name))
}

/// Resource group owning `resource`, falling back to its id.
pub(crate) fn owning_group(resource: &Resource) -> String {
    if resource.resource_group.is_empty() {
        resource_group_from_id(&resource.id)
            .unwrap_or_default()
            .to_string()
    } else {
        resource.resource_group.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault(name: &str) -> Resource {
        Resource {
            name: name.to_string(),
            resource_type: KEY_VAULT_TYPE.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_vault_url_from_property() {
        let mut resource = vault("kv-app");
        resource.properties.insert(
            "vaultUri".to_string(),
            PropertyValue::from("https://custom.vault.example/"),
        );
        assert_eq!(vault_url_for(&resource), "https://custom.vault.example/");
    }

    #[test]
    fn test_vault_url_derived_from_name() {
        assert_eq!(vault_url_for(&vault("kv-app")), "https://kv-app.vault.azure.net/");
    }

    #[test]
    fn test_owning_group_from_id() {
        let resource = Resource {
            id: "/subscriptions/s/resourceGroups/rg-x/providers/Microsoft.Storage/storageAccounts/a"
                .to_string(),
            ..Default::default()
        };
        assert_eq!(owning_group(&resource), "rg-x");
    }
}
