//! 导航状态机

use azct_provider::strip_provider_prefix;

use super::{SelectionContext, ViewKind};
use crate::hierarchy;

/// Current view, detail overlay flag and selection context.
///
/// Forward transitions (`navigate_to_*`) write the context their view needs,
/// clear what lies below it and hide the detail overlay. Back transitions are
/// one hand-written inverse per view, recomputed from the remembered context
/// rather than popped from a history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    view: ViewKind,
    showing_detail: bool,
    context: SelectionContext,
    delimiter: char,
}

impl NavigationState {
    /// Start at the subscription list with nothing selected.
    pub fn new(delimiter: char) -> Self {
        Self {
            view: ViewKind::Subscriptions,
            showing_detail: false,
            context: SelectionContext::default(),
            delimiter,
        }
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    pub fn is_showing_detail(&self) -> bool {
        self.showing_detail
    }

    pub fn context(&self) -> &SelectionContext {
        &self.context
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn enter(&mut self, view: ViewKind) {
        log::debug!("Navigate {:?} -> {view:?}", self.view);
        self.view = view;
        self.showing_detail = false;
    }

    // ========== 前进 ==========

    pub fn navigate_to_subscriptions(&mut self) {
        self.context.clear_subscription_and_below();
        self.enter(ViewKind::Subscriptions);
    }

    pub fn navigate_to_resource_groups(&mut self, subscription_id: &str, subscription_name: &str) {
        self.context.clear_subscription_and_below();
        self.context.subscription_id = Some(subscription_id.to_string());
        self.context.subscription_name = Some(subscription_name.to_string());
        self.enter(ViewKind::ResourceGroups);
    }

    pub fn navigate_to_resource_types(&mut self, resource_group: &str) {
        self.context.clear_group_and_below();
        self.context.resource_group = Some(resource_group.to_string());
        self.enter(ViewKind::ResourceTypesSummary);
    }

    pub fn navigate_to_resources(&mut self, resource_group: &str) {
        self.context.clear_group_and_below();
        self.context.resource_group = Some(resource_group.to_string());
        self.enter(ViewKind::ResourceList);
    }

    pub fn navigate_to_resource_type(&mut self, resource_type: &str) {
        self.context.clear_type_and_below();
        self.context.resource_type = Some(resource_type.to_string());
        self.enter(ViewKind::ResourceTypeFiltered);
    }

    /// `resource_group` is the group owning the account.
    pub fn navigate_to_storage_explorer(&mut self, account: &str, resource_group: &str) {
        self.context.clear_storage();
        self.context.clear_vault();
        self.context.storage_account = Some(account.to_string());
        self.context.storage_resource_group = Some(resource_group.to_string());
        self.enter(ViewKind::StorageExplorer);
    }

    pub fn navigate_to_blobs(&mut self, container: &str) {
        self.context.clear_container();
        self.context.container = Some(container.to_string());
        self.enter(ViewKind::BlobBrowser);
    }

    pub fn navigate_into_blob_folder(&mut self, prefix: &str) {
        self.context.prefix = prefix.to_string();
        self.enter(ViewKind::BlobBrowser);
    }

    pub fn navigate_to_vault_explorer(&mut self, vault_name: &str, vault_url: &str) {
        self.context.clear_storage();
        self.context.vault_name = Some(vault_name.to_string());
        self.context.vault_url = Some(vault_url.to_string());
        self.enter(ViewKind::VaultExplorer);
    }

    pub fn navigate_to_vault_secrets(&mut self) {
        self.enter(ViewKind::VaultSecrets);
    }

    pub fn navigate_to_vault_keys(&mut self) {
        self.enter(ViewKind::VaultKeys);
    }

    pub fn navigate_to_vault_certificates(&mut self) {
        self.enter(ViewKind::VaultCertificates);
    }

    pub fn navigate_to_menu(&mut self) {
        self.enter(ViewKind::Menu);
    }

    /// 显示详情浮层（视图不变）
    pub fn show_detail(&mut self) {
        self.showing_detail = true;
    }

    /// 关闭详情浮层，回到同一视图
    pub fn hide_detail(&mut self) {
        self.showing_detail = false;
    }

    // ========== 返回 ==========

    /// Apply the inverse transition of the current view.
    ///
    /// With the detail overlay shown, only the overlay is closed.
    pub fn navigate_back(&mut self) {
        if self.showing_detail {
            self.hide_detail();
            return;
        }
        match self.view {
            ViewKind::Subscriptions => {}
            ViewKind::ResourceGroups => self.navigate_back_from_resource_groups(),
            ViewKind::ResourceTypesSummary => self.navigate_back_from_resource_types(),
            ViewKind::ResourceList => self.navigate_back_from_resources(),
            ViewKind::ResourceTypeFiltered => self.navigate_back_from_resource_type(),
            ViewKind::StorageExplorer => self.navigate_back_from_storage_explorer(),
            ViewKind::BlobBrowser => self.navigate_back_from_blob_folder(),
            ViewKind::VaultExplorer => self.navigate_back_from_vault_explorer(),
            ViewKind::VaultSecrets | ViewKind::VaultKeys | ViewKind::VaultCertificates => {
                self.navigate_back_from_vault_items();
            }
            ViewKind::Menu => self.navigate_back_from_menu(),
        }
    }

    pub fn navigate_back_from_resource_groups(&mut self) {
        self.navigate_to_subscriptions();
    }

    fn back_to_resource_groups(&mut self) {
        match (
            self.context.subscription_id.clone(),
            self.context.subscription_name.clone(),
        ) {
            (Some(id), name) => {
                self.navigate_to_resource_groups(&id, name.as_deref().unwrap_or(&id));
            }
            (None, _) => self.navigate_to_subscriptions(),
        }
    }

    pub fn navigate_back_from_resource_types(&mut self) {
        self.back_to_resource_groups();
    }

    pub fn navigate_back_from_resources(&mut self) {
        self.back_to_resource_groups();
    }

    /// Back to the type summary of the remembered group. Reached from the
    /// menu there is no group, so fall back to the group list.
    pub fn navigate_back_from_resource_type(&mut self) {
        match self.context.resource_group.clone() {
            Some(rg) => self.navigate_to_resource_types(&rg),
            None => self.back_to_resource_groups(),
        }
    }

    fn back_to_resource_type(&mut self) {
        match self.context.resource_type.clone() {
            Some(resource_type) => self.navigate_to_resource_type(&resource_type),
            None => self.navigate_back_from_resource_type(),
        }
    }

    pub fn navigate_back_from_storage_explorer(&mut self) {
        self.back_to_resource_type();
    }

    /// Leave the blob browser, landing on the container list.
    pub fn navigate_back_from_blobs(&mut self) {
        self.context.clear_container();
        self.enter(ViewKind::StorageExplorer);
    }

    /// Up one folder, or out of the browser when already at the root.
    pub fn navigate_back_from_blob_folder(&mut self) {
        match hierarchy::parent_prefix(&self.context.prefix, self.delimiter) {
            Some(parent) => self.navigate_into_blob_folder(&parent),
            None => self.navigate_back_from_blobs(),
        }
    }

    pub fn navigate_back_from_vault_explorer(&mut self) {
        self.back_to_resource_type();
    }

    pub fn navigate_back_from_vault_items(&mut self) {
        self.enter(ViewKind::VaultExplorer);
    }

    /// Always lands on the subscription list, whichever view opened the menu.
    pub fn navigate_back_from_menu(&mut self) {
        self.navigate_to_subscriptions();
    }

    // ========== 展示 ==========

    /// Path from the root to the current view, for the breadcrumb bar.
    pub fn breadcrumb(&self) -> Vec<String> {
        let ctx = &self.context;
        let mut trail = vec!["Subscriptions".to_string()];

        if self.view == ViewKind::Subscriptions {
            return self.with_detail(trail);
        }
        if self.view == ViewKind::Menu {
            trail.extend(ctx.subscription_name.clone());
            trail.push("Menu".to_string());
            return self.with_detail(trail);
        }

        trail.extend(ctx.subscription_name.clone());
        trail.extend(ctx.resource_group.clone());
        if let Some(resource_type) = &ctx.resource_type {
            trail.push(strip_provider_prefix(resource_type).to_string());
        }
        trail.extend(ctx.storage_account.clone());
        if self.view == ViewKind::BlobBrowser {
            trail.extend(ctx.container.clone());
            trail.extend(
                ctx.prefix
                    .split(self.delimiter)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string),
            );
        }
        trail.extend(ctx.vault_name.clone());
        if self.view.is_vault_item_view() {
            trail.push(self.view.title().to_string());
        }
        self.with_detail(trail)
    }

    fn with_detail(&self, mut trail: Vec<String>) -> Vec<String> {
        if self.showing_detail {
            trail.push("Details".to_string());
        }
        trail
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_blob_root() -> NavigationState {
        let mut state = NavigationState::default();
        state.navigate_to_resource_groups("sub-1", "Test");
        state.navigate_to_resource_types("rg1");
        state.navigate_to_resource_type("Microsoft.Storage/storageAccounts");
        state.navigate_to_storage_explorer("acct", "rg1");
        state.navigate_to_blobs("data");
        state
    }

    #[test]
    fn test_initial_state() {
        let state = NavigationState::default();
        assert_eq!(state.view(), ViewKind::Subscriptions);
        assert!(!state.is_showing_detail());
        assert_eq!(state.context(), &SelectionContext::default());
    }

    #[test]
    fn test_navigation_chain_back_to_types() {
        let mut state = NavigationState::default();
        state.navigate_to_resource_groups("sub-1", "Test");
        state.navigate_to_resource_types("rg1");
        state.navigate_to_resource_type("T1");

        state.navigate_back();

        assert_eq!(state.view(), ViewKind::ResourceTypesSummary);
        assert_eq!(state.context().resource_group.as_deref(), Some("rg1"));
        assert_eq!(state.context().subscription_id.as_deref(), Some("sub-1"));
        assert_eq!(state.context().subscription_name.as_deref(), Some("Test"));
        assert!(state.context().resource_type.is_none());
    }

    #[test]
    fn test_full_unwind_reaches_subscriptions() {
        let mut state = at_blob_root();
        state.navigate_into_blob_folder("a/");
        state.navigate_into_blob_folder("a/b/");

        let mut views = Vec::new();
        while state.view() != ViewKind::Subscriptions {
            state.navigate_back();
            views.push(state.view());
        }
        assert_eq!(
            views,
            vec![
                ViewKind::BlobBrowser,
                ViewKind::BlobBrowser,
                ViewKind::StorageExplorer,
                ViewKind::ResourceTypeFiltered,
                ViewKind::ResourceTypesSummary,
                ViewKind::ResourceGroups,
                ViewKind::Subscriptions,
            ]
        );
        assert_eq!(state.context(), &SelectionContext::default());
    }

    #[test]
    fn test_forward_clears_descendants() {
        let mut state = at_blob_root();
        state.navigate_into_blob_folder("x/");
        state.navigate_to_resource_groups("sub-2", "Other");

        let ctx = state.context();
        assert_eq!(ctx.subscription_id.as_deref(), Some("sub-2"));
        assert!(ctx.resource_group.is_none());
        assert!(ctx.resource_type.is_none());
        assert!(ctx.storage_account.is_none());
        assert!(ctx.container.is_none());
        assert!(ctx.prefix.is_empty());
    }

    #[test]
    fn test_vault_entry_clears_storage_context() {
        let mut state = at_blob_root();
        state.navigate_back();
        state.navigate_back();
        state.navigate_to_vault_explorer("kv", "https://kv.vault.azure.net/");
        assert!(state.context().storage_account.is_none());
        assert!(state.context().container.is_none());
        assert_eq!(state.context().vault_name.as_deref(), Some("kv"));
    }

    #[test]
    fn test_blob_folder_round_trip() {
        let mut state = at_blob_root();
        state.navigate_into_blob_folder("folder1/");
        state.navigate_into_blob_folder("folder1/sub/");

        state.navigate_back_from_blob_folder();
        assert_eq!(state.view(), ViewKind::BlobBrowser);
        assert_eq!(state.context().prefix, "folder1/");

        state.navigate_back_from_blob_folder();
        assert_eq!(state.view(), ViewKind::BlobBrowser);
        assert_eq!(state.context().prefix, "");
    }

    #[test]
    fn test_blob_root_back_lands_on_storage_explorer() {
        let mut state = at_blob_root();
        state.navigate_back_from_blob_folder();
        assert_eq!(state.view(), ViewKind::StorageExplorer);
        assert!(state.context().container.is_none());
        assert_eq!(state.context().storage_account.as_deref(), Some("acct"));

        // a second back leaves the explorer, never underflows
        state.navigate_back();
        assert_eq!(state.view(), ViewKind::ResourceTypeFiltered);
        assert!(state.context().storage_account.is_none());
    }

    #[test]
    fn test_custom_delimiter() {
        let mut state = NavigationState::new('|');
        state.navigate_to_resource_groups("s", "S");
        state.navigate_to_resource_types("rg");
        state.navigate_to_resource_type("T");
        state.navigate_to_storage_explorer("acct", "rg");
        state.navigate_to_blobs("c");
        state.navigate_into_blob_folder("a|b|");
        state.navigate_back();
        assert_eq!(state.context().prefix, "a|");
    }

    #[test]
    fn test_detail_overlay_keeps_view() {
        let mut state = at_blob_root();
        state.navigate_into_blob_folder("folder1/");
        state.show_detail();
        assert!(state.is_showing_detail());
        assert_eq!(state.view(), ViewKind::BlobBrowser);

        state.navigate_back();
        assert!(!state.is_showing_detail());
        assert_eq!(state.view(), ViewKind::BlobBrowser);
        assert_eq!(state.context().prefix, "folder1/");
    }

    #[test]
    fn test_forward_hides_detail() {
        let mut state = NavigationState::default();
        state.show_detail();
        state.navigate_to_resource_groups("s", "S");
        assert!(!state.is_showing_detail());
    }

    #[test]
    fn test_menu_back_always_subscriptions() {
        let mut state = NavigationState::default();
        state.navigate_to_resource_groups("s", "S");
        state.navigate_to_resources("rg");
        state.navigate_to_menu();
        assert_eq!(state.context().resource_group.as_deref(), Some("rg"));

        state.navigate_back();
        assert_eq!(state.view(), ViewKind::Subscriptions);
        assert_eq!(state.context(), &SelectionContext::default());
    }

    #[test]
    fn test_menu_path_resource_type_back_to_groups() {
        let mut state = NavigationState::default();
        state.navigate_to_resource_groups("s", "S");
        state.navigate_to_menu();
        state.navigate_to_resource_type("Microsoft.KeyVault/vaults");
        state.navigate_back();
        assert_eq!(state.view(), ViewKind::ResourceGroups);
        assert_eq!(state.context().subscription_id.as_deref(), Some("s"));
    }

    #[test]
    fn test_vault_item_views_return_to_explorer() {
        let mut state = NavigationState::default();
        state.navigate_to_resource_groups("s", "S");
        state.navigate_to_resource_types("rg");
        state.navigate_to_resource_type("Microsoft.KeyVault/vaults");
        state.navigate_to_vault_explorer("kv", "https://kv.vault.azure.net/");

        for enter in [
            NavigationState::navigate_to_vault_secrets,
            NavigationState::navigate_to_vault_keys,
            NavigationState::navigate_to_vault_certificates,
        ] {
            enter(&mut state);
            state.navigate_back();
            assert_eq!(state.view(), ViewKind::VaultExplorer);
            assert_eq!(state.context().vault_name.as_deref(), Some("kv"));
        }

        state.navigate_back();
        assert_eq!(state.view(), ViewKind::ResourceTypeFiltered);
        assert_eq!(
            state.context().resource_type.as_deref(),
            Some("Microsoft.KeyVault/vaults")
        );
        assert!(state.context().vault_name.is_none());
    }

    #[test]
    fn test_resource_list_back_to_groups() {
        let mut state = NavigationState::default();
        state.navigate_to_resource_groups("s", "S");
        state.navigate_to_resources("rg");
        state.navigate_back();
        assert_eq!(state.view(), ViewKind::ResourceGroups);
        assert!(state.context().resource_group.is_none());
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let mut state = NavigationState::default();
        state.navigate_back();
        assert_eq!(state, NavigationState::default());
    }

    #[test]
    fn test_breadcrumb() {
        let mut state = at_blob_root();
        state.navigate_into_blob_folder("folder1/sub/");
        assert_eq!(
            state.breadcrumb(),
            vec![
                "Subscriptions",
                "Test",
                "rg1",
                "storageAccounts",
                "acct",
                "data",
                "folder1",
                "sub"
            ]
        );

        state.show_detail();
        assert_eq!(state.breadcrumb().last().map(String::as_str), Some("Details"));

        let mut menu = NavigationState::default();
        menu.navigate_to_menu();
        assert_eq!(menu.breadcrumb(), vec!["Subscriptions", "Menu"]);
    }
}
