//! Key Vault handler

use super::{KEY_VAULT_TYPE, detail, vault_url_for};
use crate::navigation::SelectionContext;
use crate::traits::{Action, ActionRequest, ResourceHandler};
use azct_provider::Resource;

#[derive(Debug, Default)]
pub struct KeyVaultHandler;

impl ResourceHandler for KeyVaultHandler {
    fn resource_type(&self) -> &str {
        KEY_VAULT_TYPE
    }

    fn display_name(&self) -> &str {
        "Key Vaults"
    }

    fn actions(&self) -> Vec<Action> {
        vec![
            Action::new('e', "Explore Key Vault", |resource, ctx| {
                ctx.request(ActionRequest::ExploreVault {
                    name: resource.name.clone(),
                    url: vault_url_for(resource),
                });
                true
            }),
            Action::details(),
        ]
    }

    fn can_list_from_summary(&self) -> bool {
        true
    }

    fn can_explore(&self) -> bool {
        true
    }

    fn render_detail(&self, resource: &Resource, selection: &SelectionContext) -> String {
        detail::titled_resource_report("Key Vault Details", resource, selection)
    }
}
