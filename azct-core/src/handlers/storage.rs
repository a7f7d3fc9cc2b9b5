//! 存储账号 handler

use super::{STORAGE_ACCOUNT_TYPE, detail, owning_group};
use crate::navigation::SelectionContext;
use crate::traits::{Action, ActionRequest, ResourceHandler};
use azct_provider::Resource;

/// Storage accounts: explorable into containers and blobs.
#[derive(Debug, Default)]
pub struct StorageAccountHandler;

impl ResourceHandler for StorageAccountHandler {
    fn resource_type(&self) -> &str {
        STORAGE_ACCOUNT_TYPE
    }

    fn display_name(&self) -> &str {
        "Storage Accounts"
    }

    fn actions(&self) -> Vec<Action> {
        vec![
            Action::new('e', "Explore Storage", |resource, ctx| {
                ctx.request(ActionRequest::ExploreStorage {
                    account: resource.name.clone(),
                    resource_group: owning_group(resource),
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
        detail::titled_resource_report("Storage Account Details", resource, selection)
    }
}
