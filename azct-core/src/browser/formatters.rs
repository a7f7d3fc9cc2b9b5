//! Column schemas and cell text per view.

use std::sync::Arc;

use azct_provider::{
    Certificate, Container, Resource, ResourceGroup, ResourceTypeSummary, Secret, Subscription,
    VaultKey, strip_provider_prefix,
};
use chrono::{DateTime, Utc};

use super::list::{MenuEntry, VaultItemKind};
use crate::filter::{RowFormatter, StaticFormatter};
use crate::hierarchy::DirectoryNode;
use crate::traits::ResourceHandler;
use crate::types::{Alignment, Column};
use crate::utils::datetime::{PLACEHOLDER, format_date, format_datetime, format_size};

/// Lists of resources render through their handler.
pub struct HandlerRows(pub Arc<dyn ResourceHandler>);

impl RowFormatter<Resource> for HandlerRows {
    fn columns(&self) -> Vec<Column> {
        self.0.columns()
    }

    fn cell_value(&self, record: &Resource, column: usize) -> String {
        self.0.cell_value(record, column)
    }
}

fn enabled_mark(enabled: bool) -> String {
    if enabled { "✓" } else { "✗" }.to_string()
}

pub fn subscriptions() -> Arc<dyn RowFormatter<Subscription>> {
    Arc::new(StaticFormatter::new(
        vec![Column::new("ID"), Column::new("Name"), Column::new("Tenant ID")],
        |sub: &Subscription, col| match col {
            0 => sub.id.clone(),
            1 if sub.display_name.is_empty() => sub.name.clone(),
            1 => sub.display_name.clone(),
            2 => sub.tenant_id.clone(),
            _ => String::new(),
        },
    ))
}

pub fn resource_groups(subscription_id: String) -> Arc<dyn RowFormatter<ResourceGroup>> {
    Arc::new(StaticFormatter::new(
        vec![
            Column::new("Name"),
            Column::new("Location"),
            Column::new("Subscription ID"),
        ],
        move |group: &ResourceGroup, col| match col {
            0 => group.name.clone(),
            1 => group.location.clone(),
            2 => subscription_id.clone(),
            _ => String::new(),
        },
    ))
}

pub fn type_summary() -> Arc<dyn RowFormatter<ResourceTypeSummary>> {
    Arc::new(StaticFormatter::new(
        vec![
            Column::new("Resource Type"),
            Column::new("Count").align(Alignment::Right),
        ],
        |summary: &ResourceTypeSummary, col| match col {
            0 => strip_provider_prefix(&summary.resource_type).to_string(),
            1 => summary.count.to_string(),
            _ => String::new(),
        },
    ))
}

pub fn containers(date_format: String) -> Arc<dyn RowFormatter<Container>> {
    Arc::new(StaticFormatter::new(
        vec![
            Column::new("Name"),
            Column::new("Public Access"),
            Column::new("Last Modified"),
        ],
        move |container: &Container, col| match col {
            0 => container.name.clone(),
            1 => container.public_access.as_str().to_string(),
            2 => format_datetime(container.last_modified.as_ref(), &date_format),
            _ => String::new(),
        },
    ))
}

pub fn blobs(date_format: String) -> Arc<dyn RowFormatter<DirectoryNode>> {
    Arc::new(StaticFormatter::new(
        vec![
            Column::new("Name"),
            Column::new("Size").align(Alignment::Right),
            Column::new("Content Type"),
            Column::new("Last Modified"),
        ],
        move |node: &DirectoryNode, col| match (col, node.is_directory) {
            (0, true) => format!("📁 {}", node.name),
            (0, false) => format!("📄 {}", node.name),
            (1 | 2 | 3, true) => PLACEHOLDER.to_string(),
            (1, false) => format_size(node.size),
            (2, false) => node.content_type.clone().unwrap_or_default(),
            (3, false) => format_datetime(node.last_modified.as_ref(), &date_format),
            _ => String::new(),
        },
    ))
}

pub fn vault_item_kinds() -> Arc<dyn RowFormatter<VaultItemKind>> {
    Arc::new(StaticFormatter::new(
        vec![Column::new("Item Type"), Column::new("Description")],
        |kind: &VaultItemKind, col| match col {
            0 => kind.label().to_string(),
            1 => kind.description().to_string(),
            _ => String::new(),
        },
    ))
}

pub fn secrets(date_format: String) -> Arc<dyn RowFormatter<Secret>> {
    Arc::new(StaticFormatter::new(
        vec![
            Column::new("Name"),
            Column::new("Enabled").align(Alignment::Center),
            Column::new("Content Type"),
            Column::new("Updated"),
        ],
        move |secret: &Secret, col| match col {
            0 => secret.name.clone(),
            1 => enabled_mark(secret.attributes.enabled),
            2 => secret.content_type.clone(),
            3 => format_datetime(secret.attributes.updated.as_ref(), &date_format),
            _ => String::new(),
        },
    ))
}

pub fn vault_keys(date_format: String) -> Arc<dyn RowFormatter<VaultKey>> {
    Arc::new(StaticFormatter::new(
        vec![
            Column::new("Name"),
            Column::new("Type"),
            Column::new("Enabled").align(Alignment::Center),
            Column::new("Updated"),
        ],
        move |key: &VaultKey, col| match col {
            0 => key.name.clone(),
            1 => key.key_type.clone(),
            2 => enabled_mark(key.attributes.enabled),
            3 => format_datetime(key.attributes.updated.as_ref(), &date_format),
            _ => String::new(),
        },
    ))
}

/// `now` decides the `(EXPIRED)` suffix.
pub fn certificates(
    date_format: String,
    now: DateTime<Utc>,
) -> Arc<dyn RowFormatter<Certificate>> {
    Arc::new(StaticFormatter::new(
        vec![
            Column::new("Name"),
            Column::new("Enabled").align(Alignment::Center),
            Column::new("Expires"),
            Column::new("Updated"),
        ],
        move |certificate: &Certificate, col| match col {
            0 => certificate.name.clone(),
            1 => enabled_mark(certificate.attributes.enabled),
            2 => match &certificate.attributes.expires {
                Some(expires) if *expires < now => format!("{} (EXPIRED)", format_date(expires)),
                Some(expires) => format_date(expires),
                None => PLACEHOLDER.to_string(),
            },
            3 => format_datetime(certificate.attributes.updated.as_ref(), &date_format),
            _ => String::new(),
        },
    ))
}

pub fn menu() -> Arc<dyn RowFormatter<MenuEntry>> {
    Arc::new(StaticFormatter::new(
        vec![Column::new("Resource Type")],
        |entry: &MenuEntry, col| match col {
            0 => entry.display_name.clone(),
            _ => String::new(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::datetime::DEFAULT_DATE_FORMAT;

    fn node(name: &str, is_directory: bool) -> DirectoryNode {
        DirectoryNode {
            name: name.to_string(),
            full_key: name.to_string(),
            is_directory,
            size: 1536,
            content_type: Some("text/plain".to_string()),
            last_modified: None,
        }
    }

    #[test]
    fn test_blob_cells() {
        let formatter = blobs(DEFAULT_DATE_FORMAT.to_string());
        let folder = node("folder1/", true);
        let file = node("a.txt", false);

        assert_eq!(formatter.cell_value(&folder, 0), "📁 folder1/");
        assert_eq!(formatter.cell_value(&folder, 1), "-");
        assert_eq!(formatter.cell_value(&folder, 2), "-");
        assert_eq!(formatter.cell_value(&file, 0), "📄 a.txt");
        assert_eq!(formatter.cell_value(&file, 1), "1.5 KB");
        assert_eq!(formatter.cell_value(&file, 2), "text/plain");
        assert_eq!(formatter.cell_value(&file, 3), "-");
        assert_eq!(formatter.cell_value(&file, 9), "");
    }

    #[test]
    fn test_certificate_expiry_cell() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let formatter = certificates(DEFAULT_DATE_FORMAT.to_string(), now);

        let mut certificate = Certificate {
            name: "tls".to_string(),
            ..Default::default()
        };
        assert_eq!(formatter.cell_value(&certificate, 2), "-");

        certificate.attributes.expires = DateTime::from_timestamp(1_600_000_000, 0);
        assert_eq!(formatter.cell_value(&certificate, 2), "2020-09-13 (EXPIRED)");

        certificate.attributes.expires = DateTime::from_timestamp(1_800_000_000, 0);
        assert_eq!(formatter.cell_value(&certificate, 2), "2027-01-15");
    }

    #[test]
    fn test_type_summary_strips_prefix() {
        let formatter = type_summary();
        let summary = ResourceTypeSummary {
            resource_type: "Microsoft.Storage/storageAccounts".to_string(),
            count: 2,
        };
        assert_eq!(formatter.cell_value(&summary, 0), "storageAccounts");
        assert_eq!(formatter.cell_value(&summary, 1), "2");
        assert_eq!(formatter.columns()[1].alignment, Alignment::Right);
    }

    #[test]
    fn test_subscription_name_falls_back() {
        let formatter = subscriptions();
        let sub = Subscription {
            id: "sub-1".to_string(),
            name: "raw-name".to_string(),
            ..Default::default()
        };
        assert_eq!(formatter.cell_value(&sub, 1), "raw-name");
    }
}
