//! The record list behind the active view.

use azct_provider::{
    Certificate, Container, Resource, ResourceGroup, ResourceTypeSummary, Secret, Subscription,
    VaultKey,
};
use serde::Serialize;

use crate::filter::FilterableList;
use crate::hierarchy::DirectoryNode;
use crate::types::Column;

/// Item kinds listed by the vault explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VaultItemKind {
    Secrets,
    Keys,
    Certificates,
}

impl VaultItemKind {
    pub const ALL: [Self; 3] = [Self::Secrets, Self::Keys, Self::Certificates];

    pub fn label(self) -> &'static str {
        match self {
            Self::Secrets => "🔐 Secrets",
            Self::Keys => "🔑 Keys",
            Self::Certificates => "📜 Certificates",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Secrets => "Manage secret values and configurations",
            Self::Keys => "Manage cryptographic keys",
            Self::Certificates => "Manage SSL/TLS certificates",
        }
    }
}

/// One registered resource type offered by the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub resource_type: String,
    pub display_name: String,
}

/// Typed list of the active view.
pub enum ActiveList {
    Subscriptions(FilterableList<Subscription>),
    ResourceGroups(FilterableList<ResourceGroup>),
    TypeSummary(FilterableList<ResourceTypeSummary>),
    Resources(FilterableList<Resource>),
    Containers(FilterableList<Container>),
    Blobs(FilterableList<DirectoryNode>),
    VaultItemKinds(FilterableList<VaultItemKind>),
    Secrets(FilterableList<Secret>),
    Keys(FilterableList<VaultKey>),
    Certificates(FilterableList<Certificate>),
    Menu(FilterableList<MenuEntry>),
}

/// Run `$body` against the inner `FilterableList`, whatever its record type.
macro_rules! with_list {
    ($list:expr, $inner:ident => $body:expr) => {
        match $list {
            ActiveList::Subscriptions($inner) => $body,
            ActiveList::ResourceGroups($inner) => $body,
            ActiveList::TypeSummary($inner) => $body,
            ActiveList::Resources($inner) => $body,
            ActiveList::Containers($inner) => $body,
            ActiveList::Blobs($inner) => $body,
            ActiveList::VaultItemKinds($inner) => $body,
            ActiveList::Secrets($inner) => $body,
            ActiveList::Keys($inner) => $body,
            ActiveList::Certificates($inner) => $body,
            ActiveList::Menu($inner) => $body,
        }
    };
}

impl ActiveList {
    pub fn columns(&self) -> Vec<Column> {
        with_list!(self, list => list.columns())
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        with_list!(self, list => list.rows())
    }

    pub fn total_count(&self) -> usize {
        with_list!(self, list => list.total_count())
    }

    pub fn filtered_count(&self) -> usize {
        with_list!(self, list => list.filtered_count())
    }

    pub fn filter(&self) -> &str {
        with_list!(self, list => list.filter())
    }

    pub fn is_filtered(&self) -> bool {
        with_list!(self, list => list.is_filtered())
    }

    pub fn set_filter(&mut self, text: &str) {
        with_list!(self, list => list.set_filter(text));
    }

    pub fn clear_filter(&mut self) {
        with_list!(self, list => list.clear_filter());
    }

    /// Cursor row, `None` when nothing is shown.
    pub fn selected(&self) -> Option<usize> {
        with_list!(self, list => (list.filtered_count() > 0).then(|| list.selected()))
    }

    pub fn select_next(&mut self) {
        with_list!(self, list => list.select_next());
    }

    pub fn select_previous(&mut self) {
        with_list!(self, list => list.select_previous());
    }

    pub fn select_first(&mut self) {
        with_list!(self, list => list.select_first());
    }

    pub fn select_last(&mut self) {
        with_list!(self, list => list.select_last());
    }
}

impl std::fmt::Debug for ActiveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Subscriptions(_) => "Subscriptions",
            Self::ResourceGroups(_) => "ResourceGroups",
            Self::TypeSummary(_) => "TypeSummary",
            Self::Resources(_) => "Resources",
            Self::Containers(_) => "Containers",
            Self::Blobs(_) => "Blobs",
            Self::VaultItemKinds(_) => "VaultItemKinds",
            Self::Secrets(_) => "Secrets",
            Self::Keys(_) => "Keys",
            Self::Certificates(_) => "Certificates",
            Self::Menu(_) => "Menu",
        };
        f.debug_struct("ActiveList")
            .field("kind", &kind)
            .field("total", &self.total_count())
            .field("filtered", &self.filtered_count())
            .finish()
    }
}
