//! View titles and footer key hints.

use azct_provider::strip_provider_prefix;

use crate::navigation::{NavigationState, ViewKind};
use crate::registry::HandlerRegistry;
use crate::traits::ResourceHandler;
use crate::types::KeyHint;

fn or_empty(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

/// Display name of a type key: its handler's name, else the bare type name.
pub fn type_display_name(registry: &HandlerRegistry, resource_type: &str) -> String {
    registry.lookup_exact(resource_type).map_or_else(
        |_| strip_provider_prefix(resource_type).to_string(),
        |handler| handler.display_name().to_string(),
    )
}

pub fn title(nav: &NavigationState, registry: &HandlerRegistry) -> String {
    let ctx = nav.context();
    match nav.view() {
        ViewKind::Subscriptions | ViewKind::Menu => nav.view().title().to_string(),
        ViewKind::ResourceGroups => {
            format!("Resource Groups - {}", or_empty(ctx.subscription_name.as_ref()))
        }
        ViewKind::ResourceTypesSummary => {
            format!("Resource List - {}", or_empty(ctx.resource_group.as_ref()))
        }
        ViewKind::ResourceList => format!("Resources - {}", or_empty(ctx.resource_group.as_ref())),
        ViewKind::ResourceTypeFiltered => {
            let name = ctx
                .resource_type
                .as_deref()
                .map_or_else(|| "Resources".to_string(), |t| type_display_name(registry, t));
            let scope = ctx
                .resource_group
                .as_ref()
                .or(ctx.subscription_name.as_ref());
            format!("{name} - {}", or_empty(scope))
        }
        ViewKind::StorageExplorer => {
            format!("Storage Explorer - {}", or_empty(ctx.storage_account.as_ref()))
        }
        ViewKind::BlobBrowser => {
            let mut title = format!(
                "Blobs - {}/{}",
                or_empty(ctx.storage_account.as_ref()),
                or_empty(ctx.container.as_ref())
            );
            if !ctx.prefix.is_empty() {
                title.push_str(" - ");
                title.push_str(&ctx.prefix);
            }
            title
        }
        ViewKind::VaultExplorer => {
            format!("Key Vault Explorer - {}", or_empty(ctx.vault_name.as_ref()))
        }
        ViewKind::VaultSecrets | ViewKind::VaultKeys | ViewKind::VaultCertificates => format!(
            "{} - {}",
            nav.view().title(),
            or_empty(ctx.vault_name.as_ref())
        ),
    }
}

/// Keys valid in the current view, in footer order.
///
/// Resource views list the actions of `handler`, the handler of the selected
/// row.
pub fn key_hints(nav: &NavigationState, handler: Option<&dyn ResourceHandler>) -> Vec<KeyHint> {
    let mut hints = Vec::new();
    if nav.is_showing_detail() {
        hints.push(KeyHint::new("ESC", "back"));
        hints.push(KeyHint::new("q", "quit"));
        return hints;
    }

    let enter = |label: &str| KeyHint::new("Enter", label);
    let details = || KeyHint::new("d", "details");
    let handler_actions = || {
        handler
            .map(|h| h.actions())
            .unwrap_or_default()
            .into_iter()
            .map(|action| KeyHint::new(action.key.to_string(), action.label))
    };
    match nav.view() {
        ViewKind::Subscriptions => hints.extend([enter("view Resource Groups"), details()]),
        ViewKind::ResourceGroups => hints.extend([
            enter("view Resource List"),
            KeyHint::new("a", "all resources"),
            details(),
        ]),
        ViewKind::ResourceTypesSummary => hints.push(enter("view resources")),
        ViewKind::ResourceList => {
            hints.extend(handler_actions());
            if handler.is_some() {
                hints.push(KeyHint::new("t", "filter by type"));
            }
        }
        ViewKind::ResourceTypeFiltered => hints.extend(handler_actions()),
        ViewKind::StorageExplorer => hints.extend([enter("open container"), details()]),
        ViewKind::BlobBrowser => hints.extend([enter("open folder/details"), details()]),
        ViewKind::VaultExplorer => hints.push(enter("open item type")),
        ViewKind::VaultSecrets => hints.extend([KeyHint::new("v", "view value"), details()]),
        ViewKind::VaultKeys | ViewKind::VaultCertificates => hints.push(details()),
        ViewKind::Menu => hints.push(enter("select resource type")),
    }
    hints.extend([
        KeyHint::new("ESC", "back"),
        KeyHint::new("/", "filter"),
        KeyHint::new("q", "quit"),
    ]);
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{DefaultHandler, KEY_VAULT_TYPE, STORAGE_ACCOUNT_TYPE, StorageAccountHandler};
    use crate::types::StatusSummary;

    fn footer(nav: &NavigationState, handler: Option<&dyn ResourceHandler>) -> String {
        StatusSummary {
            total_count: 0,
            filtered_count: 0,
            filter_active: false,
            filter: String::new(),
            actions: key_hints(nav, handler),
            last_error: None,
        }
        .actions_text()
    }

    #[test]
    fn test_subscription_footer() {
        assert_eq!(
            footer(&NavigationState::default(), None),
            "Enter: view Resource Groups, d: details, ESC: back, /: filter, q: quit"
        );
    }

    #[test]
    fn test_resource_footer_lists_handler_actions() {
        let mut nav = NavigationState::default();
        nav.navigate_to_resource_groups("sub-1", "Dev");
        nav.navigate_to_resource_types("rg1");

        nav.navigate_to_resource_type(STORAGE_ACCOUNT_TYPE);
        assert_eq!(
            footer(&nav, Some(&StorageAccountHandler)),
            "e: Explore Storage, d: Details, ESC: back, /: filter, q: quit"
        );

        nav.navigate_to_resource_type("Microsoft.Web/sites");
        assert_eq!(
            footer(&nav, Some(&DefaultHandler)),
            "d: Details, ESC: back, /: filter, q: quit"
        );
    }

    #[test]
    fn test_resource_list_footer() {
        let mut nav = NavigationState::default();
        nav.navigate_to_resource_groups("sub-1", "Dev");
        nav.navigate_to_resources("rg1");

        assert_eq!(
            footer(&nav, Some(&DefaultHandler)),
            "d: Details, t: filter by type, ESC: back, /: filter, q: quit"
        );
        assert_eq!(footer(&nav, None), "ESC: back, /: filter, q: quit");
    }

    #[test]
    fn test_detail_overlay_footer() {
        let mut nav = NavigationState::default();
        nav.show_detail();
        assert_eq!(footer(&nav, Some(&DefaultHandler)), "ESC: back, q: quit");
    }

    #[test]
    fn test_titles() {
        let registry = HandlerRegistry::with_builtin_handlers();
        let mut nav = NavigationState::default();
        nav.navigate_to_resource_groups("sub-1", "Dev");
        assert_eq!(title(&nav, &registry), "Resource Groups - Dev");

        nav.navigate_to_resource_types("rg1");
        nav.navigate_to_resource_type(KEY_VAULT_TYPE);
        assert_eq!(title(&nav, &registry), "Key Vaults - rg1");

        nav.navigate_to_resource_type("Microsoft.Web/sites");
        assert_eq!(title(&nav, &registry), "sites - rg1");

        nav.navigate_to_storage_explorer("stapp", "rg1");
        nav.navigate_to_blobs("data");
        nav.navigate_into_blob_folder("folder1/");
        assert_eq!(title(&nav, &registry), "Blobs - stapp/data - folder1/");
    }

    #[test]
    fn test_menu_path_title_uses_subscription() {
        let registry = HandlerRegistry::with_builtin_handlers();
        let mut nav = NavigationState::default();
        nav.navigate_to_resource_groups("sub-1", "Dev");
        nav.navigate_to_menu();
        assert_eq!(title(&nav, &registry), "Resource Types Menu");

        nav.navigate_to_resource_type(STORAGE_ACCOUNT_TYPE);
        assert_eq!(title(&nav, &registry), "Storage Accounts - Dev");
    }
}
