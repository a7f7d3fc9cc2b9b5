//! Resource handler abstract Trait

use std::fmt;
use std::sync::Arc;

use azct_provider::{Resource, strip_provider_prefix};

use crate::handlers::detail;
use crate::navigation::SelectionContext;
use crate::types::Column;

/// What an action asks the browser to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    /// Open the detail overlay for the record.
    ShowDetail,
    /// Open the container list of a storage account.
    ExploreStorage {
        account: String,
        resource_group: String,
    },
    /// Open a secrets vault.
    ExploreVault { name: String, url: String },
}

/// Invocation context handed to action callbacks.
///
/// Callbacks read the current selection and queue requests; the browser
/// applies queued requests after the callback returns.
pub struct ActionContext<'a> {
    pub selection: &'a SelectionContext,
    requests: Vec<ActionRequest>,
}

impl<'a> ActionContext<'a> {
    pub fn new(selection: &'a SelectionContext) -> Self {
        Self {
            selection,
            requests: Vec::new(),
        }
    }

    pub fn request(&mut self, request: ActionRequest) {
        self.requests.push(request);
    }

    pub fn into_requests(self) -> Vec<ActionRequest> {
        self.requests
    }
}

/// Action callback: returns whether the key press was consumed.
pub type ActionCallback = Arc<dyn Fn(&Resource, &mut ActionContext<'_>) -> bool + Send + Sync>;

/// A key-bound operation offered by a handler.
#[derive(Clone)]
pub struct Action {
    pub key: char,
    pub label: String,
    callback: ActionCallback,
}

impl Action {
    pub fn new(
        key: char,
        label: impl Into<String>,
        callback: impl Fn(&Resource, &mut ActionContext<'_>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            callback: Arc::new(callback),
        }
    }

    /// `d` / Details, shared by every built-in handler.
    pub fn details() -> Self {
        Self::new('d', "Details", |_, ctx| {
            ctx.request(ActionRequest::ShowDetail);
            true
        })
    }

    pub fn invoke(&self, resource: &Resource, ctx: &mut ActionContext<'_>) -> bool {
        (self.callback)(resource, ctx)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Resource handler Trait
///
/// One handler per resource type key decides how resources of that type are
/// listed, which actions they offer and how their detail report reads.
/// The handler registered under `""` is the fallback for unknown types.
///
/// Column and detail methods have default implementations producing the
/// generic Type / Name / Location table and the generic report.
pub trait ResourceHandler: Send + Sync {
    /// Type key this handler serves (`""` for the default handler).
    fn resource_type(&self) -> &str;

    /// Human readable plural name, e.g. `Storage Accounts`.
    fn display_name(&self) -> &str;

    /// Ordered column schema.
    fn columns(&self) -> Vec<Column> {
        vec![Column::new("Type"), Column::new("Name"), Column::new("Location")]
    }

    /// Display text for one cell. Out-of-range columns yield `""`.
    fn cell_value(&self, resource: &Resource, column: usize) -> String {
        match column {
            0 => strip_provider_prefix(&resource.resource_type).to_string(),
            1 => resource.name.clone(),
            2 => resource.location.clone(),
            _ => String::new(),
        }
    }

    /// Key-bound actions, in display order.
    fn actions(&self) -> Vec<Action>;

    /// Whether the type summary may drill into a list of this type.
    fn can_list_from_summary(&self) -> bool;

    /// Whether resources of this type have an explorer view.
    fn can_explore(&self) -> bool;

    /// Full textual report for one resource.
    fn render_detail(&self, resource: &Resource, selection: &SelectionContext) -> String {
        detail::resource_report(resource, selection)
    }
}
