//! In-memory resource provider
//!
//! A complete [`ResourceProvider`] backed by a static [`Inventory`]. Used for
//! demos, offline development and tests. Any operation can be made to fail
//! with [`InMemoryProvider::set_failure`].

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{ProviderError, Result};
use crate::traits::{ResourceProvider, ResourceScope, StorageAccountRef};
use crate::types::{
    BlobDetail, Certificate, Container, KeyEntry, Resource, ResourceGroup, Secret, Subscription,
    UserInfo, VaultKey,
};

const PROVIDER_ID: &str = "memory";

/// Provider operations, used to address injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CurrentUser,
    ListSubscriptions,
    ListResourceGroups,
    ListResources,
    ListContainers,
    ListKeys,
    GetBlobDetail,
    ListSecrets,
    GetSecret,
    GetSecretValue,
    ListVaultKeys,
    GetVaultKey,
    ListCertificates,
    GetCertificate,
}

/// Static inventory served by [`InMemoryProvider`].
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    user: UserInfo,
    subscriptions: Vec<Subscription>,
    /// subscription id -> groups
    resource_groups: HashMap<String, Vec<ResourceGroup>>,
    /// subscription id -> resources
    resources: HashMap<String, Vec<Resource>>,
    /// account name -> containers
    containers: HashMap<String, Vec<Container>>,
    /// (account, container) -> flat keys
    keys: HashMap<(String, String), Vec<KeyEntry>>,
    /// vault url -> secrets, values included
    secrets: HashMap<String, Vec<Secret>>,
    vault_keys: HashMap<String, Vec<VaultKey>>,
    certificates: HashMap<String, Vec<Certificate>>,
}

fn vault_key(url: &str) -> String {
    url.trim_end_matches('/').to_ascii_lowercase()
}

impl Inventory {
    /// Empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(mut self, user: UserInfo) -> Self {
        self.user = user;
        self
    }

    #[must_use]
    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    #[must_use]
    pub fn with_resource_group(mut self, subscription_id: &str, group: ResourceGroup) -> Self {
        self.resource_groups
            .entry(subscription_id.to_string())
            .or_default()
            .push(group);
        self
    }

    #[must_use]
    pub fn with_resource(mut self, subscription_id: &str, resource: Resource) -> Self {
        self.resources
            .entry(subscription_id.to_string())
            .or_default()
            .push(resource);
        self
    }

    #[must_use]
    pub fn with_container(mut self, account: &str, container: Container) -> Self {
        self.containers
            .entry(account.to_string())
            .or_default()
            .push(container);
        self
    }

    #[must_use]
    pub fn with_keys(
        mut self,
        account: &str,
        container: &str,
        keys: impl IntoIterator<Item = KeyEntry>,
    ) -> Self {
        self.keys
            .entry((account.to_string(), container.to_string()))
            .or_default()
            .extend(keys);
        self
    }

    #[must_use]
    pub fn with_secret(mut self, vault_url: &str, secret: Secret) -> Self {
        self.secrets
            .entry(vault_key(vault_url))
            .or_default()
            .push(secret);
        self
    }

    #[must_use]
    pub fn with_vault_key(mut self, vault_url: &str, key: VaultKey) -> Self {
        self.vault_keys
            .entry(vault_key(vault_url))
            .or_default()
            .push(key);
        self
    }

    #[must_use]
    pub fn with_certificate(mut self, vault_url: &str, certificate: Certificate) -> Self {
        self.certificates
            .entry(vault_key(vault_url))
            .or_default()
            .push(certificate);
        self
    }
}

/// In-memory [`ResourceProvider`].
pub struct InMemoryProvider {
    inventory: RwLock<Inventory>,
    /// 如果存在，对应操作返回此错误（用于测试失败路径）
    failures: RwLock<HashMap<Operation, ProviderError>>,
}

impl InMemoryProvider {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: RwLock::new(inventory),
            failures: RwLock::new(HashMap::new()),
        }
    }

    /// Make `operation` fail with `error`, or succeed again with `None`.
    pub async fn set_failure(&self, operation: Operation, error: Option<ProviderError>) {
        let mut failures = self.failures.write().await;
        match error {
            Some(e) => {
                failures.insert(operation, e);
            }
            None => {
                failures.remove(&operation);
            }
        }
    }

    /// Replace the served inventory.
    pub async fn replace_inventory(&self, inventory: Inventory) {
        *self.inventory.write().await = inventory;
    }

    async fn check(&self, operation: Operation) -> Result<()> {
        match self.failures.read().await.get(&operation) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new(Inventory::default())
    }
}

fn not_found(resource: impl Into<String>) -> ProviderError {
    ProviderError::ResourceNotFound {
        provider: PROVIDER_ID.to_string(),
        resource: resource.into(),
        raw_message: None,
    }
}

fn find_named<'a, T>(
    items: Option<&'a Vec<T>>,
    name: &str,
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    items?.iter().find(|item| name_of(item) == name)
}

#[async_trait]
impl ResourceProvider for InMemoryProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn current_user(&self) -> Result<UserInfo> {
        self.check(Operation::CurrentUser).await?;
        Ok(self.inventory.read().await.user.clone())
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.check(Operation::ListSubscriptions).await?;
        Ok(self.inventory.read().await.subscriptions.clone())
    }

    async fn list_resource_groups(&self, subscription_id: &str) -> Result<Vec<ResourceGroup>> {
        self.check(Operation::ListResourceGroups).await?;
        let inventory = self.inventory.read().await;
        if !inventory.subscriptions.iter().any(|s| s.id == subscription_id) {
            return Err(not_found(subscription_id));
        }
        Ok(inventory
            .resource_groups
            .get(subscription_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_resources(&self, scope: &ResourceScope) -> Result<Vec<Resource>> {
        self.check(Operation::ListResources).await?;
        let inventory = self.inventory.read().await;
        Ok(inventory
            .resources
            .get(&scope.subscription_id)
            .map(|all| all.iter().filter(|r| scope.contains(r)).cloned().collect())
            .unwrap_or_default())
    }

    async fn list_containers(&self, account: &StorageAccountRef) -> Result<Vec<Container>> {
        self.check(Operation::ListContainers).await?;
        self.inventory
            .read()
            .await
            .containers
            .get(&account.account)
            .cloned()
            .ok_or_else(|| not_found(&account.account))
    }

    async fn list_keys(
        &self,
        account: &StorageAccountRef,
        container: &str,
        prefix: &str,
    ) -> Result<Vec<KeyEntry>> {
        self.check(Operation::ListKeys).await?;
        let inventory = self.inventory.read().await;
        let keys = inventory
            .keys
            .get(&(account.account.clone(), container.to_string()))
            .ok_or_else(|| not_found(format!("{}/{container}", account.account)))?;
        Ok(keys
            .iter()
            .filter(|k| k.key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get_blob_detail(
        &self,
        account: &StorageAccountRef,
        container: &str,
        key: &str,
    ) -> Result<BlobDetail> {
        self.check(Operation::GetBlobDetail).await?;
        let inventory = self.inventory.read().await;
        let entry = find_named(
            inventory
                .keys
                .get(&(account.account.clone(), container.to_string())),
            key,
            |k| k.key.as_str(),
        )
        .ok_or_else(|| not_found(format!("{}/{container}/{key}", account.account)))?;

        let display_name = key
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(key)
            .to_string();
        Ok(BlobDetail {
            name: entry.key.clone(),
            display_name,
            size: entry.size.unwrap_or_default(),
            content_type: entry.content_type.clone().unwrap_or_default(),
            last_modified: entry.last_modified,
            etag: String::new(),
            metadata: BTreeMap::new(),
        })
    }

    async fn list_secrets(&self, vault_url: &str) -> Result<Vec<Secret>> {
        self.check(Operation::ListSecrets).await?;
        let inventory = self.inventory.read().await;
        Ok(inventory
            .secrets
            .get(&vault_key(vault_url))
            .map(|secrets| {
                secrets
                    .iter()
                    .map(|s| Secret {
                        value: None,
                        ..s.clone()
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_secret(&self, vault_url: &str, name: &str) -> Result<Secret> {
        self.check(Operation::GetSecret).await?;
        let inventory = self.inventory.read().await;
        find_named(inventory.secrets.get(&vault_key(vault_url)), name, |s| s.name.as_str())
            .map(|s| Secret {
                value: None,
                ..s.clone()
            })
            .ok_or_else(|| not_found(name))
    }

    async fn get_secret_value(&self, vault_url: &str, name: &str) -> Result<String> {
        self.check(Operation::GetSecretValue).await?;
        let inventory = self.inventory.read().await;
        find_named(inventory.secrets.get(&vault_key(vault_url)), name, |s| s.name.as_str())
            .and_then(|s| s.value.clone())
            .ok_or_else(|| not_found(name))
    }

    async fn list_vault_keys(&self, vault_url: &str) -> Result<Vec<VaultKey>> {
        self.check(Operation::ListVaultKeys).await?;
        Ok(self
            .inventory
            .read()
            .await
            .vault_keys
            .get(&vault_key(vault_url))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_vault_key(&self, vault_url: &str, name: &str) -> Result<VaultKey> {
        self.check(Operation::GetVaultKey).await?;
        let inventory = self.inventory.read().await;
        find_named(inventory.vault_keys.get(&vault_key(vault_url)), name, |k| k.name.as_str())
            .cloned()
            .ok_or_else(|| not_found(name))
    }

    async fn list_certificates(&self, vault_url: &str) -> Result<Vec<Certificate>> {
        self.check(Operation::ListCertificates).await?;
        Ok(self
            .inventory
            .read()
            .await
            .certificates
            .get(&vault_key(vault_url))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_certificate(&self, vault_url: &str, name: &str) -> Result<Certificate> {
        self.check(Operation::GetCertificate).await?;
        let inventory = self.inventory.read().await;
        find_named(inventory.certificates.get(&vault_key(vault_url)), name, |c| c.name.as_str())
            .cloned()
            .ok_or_else(|| not_found(name))
    }
}
