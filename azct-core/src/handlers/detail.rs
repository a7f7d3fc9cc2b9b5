//! Detail reports
//!
//! Plain `Label: value` text, one report per record kind. Tag, metadata and
//! property sections print `None` when empty; nested properties are indented
//! two spaces per level.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use azct_provider::{
    BlobDetail, Certificate, Container, PropertyValue, Resource, ResourceGroup, Secret,
    Subscription, VaultItemAttributes, VaultKey, subscription_from_id,
};
use chrono::{DateTime, Utc};

use crate::navigation::SelectionContext;
use crate::utils::datetime::{format_datetime, format_size};

/// Line-oriented report builder.
#[derive(Debug, Default)]
pub struct DetailReport {
    out: String,
}

impl DetailReport {
    pub fn new(title: &str) -> Self {
        let mut report = Self::default();
        let _ = write!(report.out, "{title}\n\n");
        report
    }

    #[must_use]
    pub fn field(mut self, label: &str, value: impl std::fmt::Display) -> Self {
        let _ = writeln!(self.out, "{label}: {value}");
        self
    }

    /// Skipped when `value` is empty.
    #[must_use]
    pub fn non_empty(self, label: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.field(label, value)
        }
    }

    /// Skipped when `value` is absent.
    #[must_use]
    pub fn timestamp(self, label: &str, value: Option<&DateTime<Utc>>, format: &str) -> Self {
        match value {
            Some(_) => {
                let text = format_datetime(value, format);
                self.field(label, text)
            }
            None => self,
        }
    }

    #[must_use]
    pub fn map_section(mut self, label: &str, entries: &BTreeMap<String, String>) -> Self {
        if entries.is_empty() {
            let _ = write!(self.out, "\n{label}: None\n");
            return self;
        }
        let _ = write!(self.out, "\n{label}:\n");
        for (key, value) in entries {
            let _ = writeln!(self.out, "  {key}: {value}");
        }
        self
    }

    #[must_use]
    pub fn properties(mut self, properties: &BTreeMap<String, PropertyValue>) -> Self {
        if properties.is_empty() {
            self.out.push_str("\nProperties: None\n");
            return self;
        }
        self.out.push_str("\nProperties:\n");
        for (key, value) in properties {
            write_property(&mut self.out, 1, key, value);
        }
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

fn write_property(out: &mut String, depth: usize, key: &str, value: &PropertyValue) {
    let pad = "  ".repeat(depth);
    match value {
        PropertyValue::Map(map) if !map.is_empty() => {
            let _ = writeln!(out, "{pad}{key}:");
            for (child_key, child) in map {
                write_property(out, depth + 1, child_key, child);
            }
        }
        PropertyValue::List(items) if !items.is_empty() => {
            let _ = writeln!(out, "{pad}{key}:");
            for (i, item) in items.iter().enumerate() {
                write_property(out, depth + 1, &format!("[{i}]"), item);
            }
        }
        PropertyValue::Map(_) => {
            let _ = writeln!(out, "{pad}{key}: {{}}");
        }
        PropertyValue::List(_) => {
            let _ = writeln!(out, "{pad}{key}: []");
        }
        scalar => {
            let _ = writeln!(out, "{pad}{key}: {scalar}");
        }
    }
}

fn vault_item_report(
    report: DetailReport,
    attributes: &VaultItemAttributes,
    format: &str,
    now: DateTime<Utc>,
) -> DetailReport {
    let expires = attributes.expires.as_ref().map(|expires| {
        let mut text = format_datetime(Some(expires), format);
        if *expires < now {
            text.push_str(" (EXPIRED)");
        }
        text
    });

    let mut report = report
        .non_empty("Version", &attributes.version)
        .timestamp("Created", attributes.created.as_ref(), format)
        .timestamp("Updated", attributes.updated.as_ref(), format);
    if let Some(expires) = expires {
        report = report.field("Expires", expires);
    }
    report
        .timestamp("Not Before", attributes.not_before.as_ref(), format)
        .map_section("Tags", &attributes.tags)
}

// ============ Reports ============

pub fn subscription_report(subscription: &Subscription) -> String {
    DetailReport::new("Subscription Details")
        .field("ID", &subscription.id)
        .field("Name", &subscription.name)
        .field("Display Name", &subscription.display_name)
        .field("State", &subscription.state)
        .field("Tenant ID", &subscription.tenant_id)
        .finish()
}

pub fn resource_group_report(group: &ResourceGroup, subscription_id: &str) -> String {
    DetailReport::new("Resource Group Details")
        .field("Name", &group.name)
        .field("Location", &group.location)
        .field("Subscription ID", subscription_id)
        .map_section("Tags", &group.tags)
        .finish()
}

/// Generic resource report.
pub fn resource_report(resource: &Resource, selection: &SelectionContext) -> String {
    titled_resource_report("Resource Details", resource, selection)
}

pub(crate) fn titled_resource_report(
    title: &str,
    resource: &Resource,
    selection: &SelectionContext,
) -> String {
    let subscription_id = selection
        .subscription_id
        .as_deref()
        .or_else(|| subscription_from_id(&resource.id))
        .unwrap_or_default();

    DetailReport::new(title)
        .field("ID", &resource.id)
        .field("Name", &resource.name)
        .field("Type", &resource.resource_type)
        .field("Location", &resource.location)
        .field("Resource Group", &resource.resource_group)
        .field("Subscription ID", subscription_id)
        .map_section("Tags", &resource.tags)
        .properties(&resource.properties)
        .finish()
}

pub fn container_report(container: &Container, account: &str, format: &str) -> String {
    DetailReport::new("Container Details")
        .field("Storage Account", account)
        .field("Name", &container.name)
        .field("Public Access", container.public_access.as_str())
        .field(
            "Last Modified",
            format_datetime(container.last_modified.as_ref(), format),
        )
        .field("ETag", &container.etag)
        .map_section("Metadata", &container.metadata)
        .finish()
}

pub fn blob_report(blob: &BlobDetail, account: &str, container: &str, format: &str) -> String {
    DetailReport::new("Blob Details")
        .field("Storage Account", account)
        .field("Container", container)
        .field("Name", &blob.name)
        .field("Size", format_size(blob.size))
        .field("Content Type", &blob.content_type)
        .field(
            "Last Modified",
            format_datetime(blob.last_modified.as_ref(), format),
        )
        .field("ETag", &blob.etag)
        .map_section("Metadata", &blob.metadata)
        .finish()
}

/// Secret metadata report. The value is never part of it.
pub fn secret_report(secret: &Secret, vault: &str, format: &str, now: DateTime<Utc>) -> String {
    let report = DetailReport::new("Secret Details")
        .field("Key Vault", vault)
        .field("Name", &secret.name)
        .field("Enabled", secret.attributes.enabled)
        .non_empty("Content Type", &secret.content_type);
    vault_item_report(report, &secret.attributes, format, now).finish()
}

pub fn key_report(key: &VaultKey, vault: &str, format: &str, now: DateTime<Utc>) -> String {
    let report = DetailReport::new("Key Details")
        .field("Key Vault", vault)
        .field("Name", &key.name)
        .field("Type", &key.key_type)
        .field("Enabled", key.attributes.enabled);
    vault_item_report(report, &key.attributes, format, now).finish()
}

pub fn certificate_report(
    certificate: &Certificate,
    vault: &str,
    format: &str,
    now: DateTime<Utc>,
) -> String {
    let report = DetailReport::new("Certificate Details")
        .field("Key Vault", vault)
        .field("Name", &certificate.name)
        .field("Enabled", certificate.attributes.enabled)
        .non_empty("Subject", &certificate.subject)
        .non_empty("Issuer", &certificate.issuer)
        .non_empty("Thumbprint", &certificate.thumbprint);
    vault_item_report(report, &certificate.attributes, format, now).finish()
}

/// Revealed secret value, shown in place of the detail report.
pub fn secret_value_report(name: &str, vault: &str, value: &str) -> String {
    DetailReport::new("Secret Value")
        .field("Key Vault", vault)
        .field("Name", name)
        .field("Value", value)
        .finish()
}
