//! Fallback handler for types without a dedicated one

use crate::traits::{Action, ResourceHandler};

/// Registered under `""`; serves every type without its own handler.
#[derive(Debug, Default)]
pub struct DefaultHandler;

impl ResourceHandler for DefaultHandler {
    fn resource_type(&self) -> &str {
        ""
    }

    fn display_name(&self) -> &str {
        "Resources"
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action::details()]
    }

    fn can_list_from_summary(&self) -> bool {
        true
    }

    fn can_explore(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::SelectionContext;
    use crate::traits::{ActionContext, ActionRequest};
    use azct_provider::Resource;

    fn web_app() -> Resource {
        Resource {
            name: "web".to_string(),
            resource_type: "Microsoft.Web/sites".to_string(),
            location: "eastus".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_capabilities() {
        let handler = DefaultHandler;
        assert_eq!(handler.resource_type(), "");
        assert_eq!(handler.display_name(), "Resources");
        assert!(handler.can_list_from_summary());
        assert!(!handler.can_explore());
    }

    #[test]
    fn test_columns_and_cells() {
        let handler = DefaultHandler;
        let names: Vec<_> = handler.columns().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Type", "Name", "Location"]);

        let resource = web_app();
        assert_eq!(handler.cell_value(&resource, 0), "sites");
        assert_eq!(handler.cell_value(&resource, 1), "web");
        assert_eq!(handler.cell_value(&resource, 2), "eastus");
        assert_eq!(handler.cell_value(&resource, 3), "");
    }

    #[test]
    fn test_details_action_requests_overlay() {
        let actions = DefaultHandler.actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].key, 'd');

        let selection = SelectionContext::default();
        let mut ctx = ActionContext::new(&selection);
        assert!(actions[0].invoke(&web_app(), &mut ctx));
        assert_eq!(ctx.into_requests(), vec![ActionRequest::ShowDetail]);
    }
}
