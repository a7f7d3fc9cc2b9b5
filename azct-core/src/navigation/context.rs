//! 选择上下文

use azct_provider::{ResourceScope, StorageAccountRef};
use serde::Serialize;

/// Everything the user has drilled into so far.
///
/// Fields describe a path from the root: a forward transition writes its own
/// inputs and clears everything below them, so no view ever reads a value
/// left behind by a sibling branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionContext {
    pub subscription_id: Option<String>,
    pub subscription_name: Option<String>,
    pub resource_group: Option<String>,
    pub resource_type: Option<String>,
    pub storage_account: Option<String>,
    /// Resource group owning `storage_account`; differs from
    /// `resource_group` when the account was reached through the menu.
    pub storage_resource_group: Option<String>,
    pub container: Option<String>,
    /// Current folder prefix inside `container`, empty at the root.
    pub prefix: String,
    pub vault_name: Option<String>,
    pub vault_url: Option<String>,
}

impl SelectionContext {
    pub(crate) fn clear_subscription_and_below(&mut self) {
        self.subscription_id = None;
        self.subscription_name = None;
        self.clear_group_and_below();
    }

    pub(crate) fn clear_group_and_below(&mut self) {
        self.resource_group = None;
        self.clear_type_and_below();
    }

    pub(crate) fn clear_type_and_below(&mut self) {
        self.resource_type = None;
        self.clear_storage();
        self.clear_vault();
    }

    pub(crate) fn clear_storage(&mut self) {
        self.storage_account = None;
        self.storage_resource_group = None;
        self.clear_container();
    }

    pub(crate) fn clear_container(&mut self) {
        self.container = None;
        self.prefix.clear();
    }

    pub(crate) fn clear_vault(&mut self) {
        self.vault_name = None;
        self.vault_url = None;
    }

    /// Management-plane scope for the current selection.
    pub fn resource_scope(&self) -> Option<ResourceScope> {
        let mut scope = ResourceScope::subscription(self.subscription_id.as_deref()?);
        scope.resource_group.clone_from(&self.resource_group);
        scope.resource_type.clone_from(&self.resource_type);
        Some(scope)
    }

    /// The selected storage account, if one is selected.
    pub fn storage_ref(&self) -> Option<StorageAccountRef> {
        Some(StorageAccountRef {
            subscription_id: self.subscription_id.clone()?,
            resource_group: self
                .storage_resource_group
                .clone()
                .or_else(|| self.resource_group.clone())?,
            account: self.storage_account.clone()?,
        })
    }
}
