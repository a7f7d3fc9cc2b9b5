use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Management plane ============

/// A subscription visible to the signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Subscription GUID.
    pub id: String,
    /// Short name.
    pub name: String,
    /// Human readable name shown in portals.
    pub display_name: String,
    /// Lifecycle state (e.g. `"Enabled"`, `"Disabled"`).
    pub state: String,
    /// Tenant the subscription belongs to.
    pub tenant_id: String,
}

/// A resource group inside a subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    /// Group name (unique within the subscription).
    pub name: String,
    /// Region the group metadata lives in.
    pub location: String,
    /// User-defined tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// A single resource as returned by the management plane.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Full resource ID
    /// (`/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}`).
    pub id: String,
    /// Resource name.
    pub name: String,
    /// Type key, e.g. `Microsoft.Storage/storageAccounts`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Region.
    pub location: String,
    /// Owning resource group name.
    pub resource_group: String,
    /// User-defined tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Type-specific property bag.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Aggregated count of resources of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeSummary {
    /// Type key.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Number of resources of this type.
    pub count: usize,
}

/// The signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Display name.
    pub name: String,
    /// Email or UPN.
    pub email: String,
    /// Home tenant.
    pub tenant_id: String,
}

// ============ Property bag ============

/// A dynamically-typed property value.
///
/// Resource properties are arbitrary nested JSON documents whose shape depends
/// on the resource type. `PropertyValue` keeps that shape without falling back
/// to an untyped map, so detail rendering stays total over any nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// JSON `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Any JSON number.
    Number(f64),
    /// String.
    String(String),
    /// Ordered list.
    List(Vec<PropertyValue>),
    /// Nested object, keys in sorted order.
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Whether the value is a scalar (renders on one line).
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Look up a string entry in a map value.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self {
            Self::Map(map) => match map.get(key) {
                Some(Self::String(s)) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(map) => write!(f, "{{{} keys}}", map.len()),
        }
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

// ============ Object storage ============

/// Public access level of a blob container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicAccess {
    /// No anonymous access.
    #[default]
    None,
    /// Anonymous read of blobs only.
    Blob,
    /// Anonymous read and list.
    Container,
}

impl PublicAccess {
    /// Label used in list views.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "Private",
            Self::Blob => "Blob",
            Self::Container => "Container",
        }
    }
}

/// A blob container in a storage account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name.
    pub name: String,
    /// Last modification time.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Entity tag.
    #[serde(default)]
    pub etag: String,
    /// Anonymous access level.
    #[serde(default)]
    pub public_access: PublicAccess,
    /// User metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// One entry of a flat blob key listing.
///
/// Keys are delimiter-separated paths; there are no real directories.
/// A key that itself ends in the delimiter is an explicit directory marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEntry {
    /// Full key relative to the container root.
    pub key: String,
    /// Size in bytes, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Content type, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Last modification time.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Whether this key is an explicit directory marker.
    #[serde(default)]
    pub is_directory_marker: bool,
}

impl KeyEntry {
    /// A plain blob key without metadata.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size: None,
            content_type: None,
            last_modified: None,
            is_directory_marker: false,
        }
    }

    /// Whether the key ends in `delimiter`, i.e. names a directory marker.
    pub fn ends_with_delimiter(&self, delimiter: char) -> bool {
        self.is_directory_marker || self.key.ends_with(delimiter)
    }
}

/// Full detail of a single blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobDetail {
    /// Full key.
    pub name: String,
    /// Last path segment.
    pub display_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Content type.
    pub content_type: String,
    /// Last modification time.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    /// Entity tag.
    #[serde(default)]
    pub etag: String,
    /// User metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

// ============ Secrets vault ============

/// Lifecycle attributes shared by every vault item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultItemAttributes {
    /// Whether the item is enabled.
    pub enabled: bool,
    /// Creation time.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
    /// Expiry time.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    /// Not valid before.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_before: Option<DateTime<Utc>>,
    /// Current version identifier.
    #[serde(default)]
    pub version: String,
    /// User-defined tags.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// A secret. The value is only populated by an explicit value fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// Secret name.
    pub name: String,
    /// Secret value, if fetched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Content type hint.
    #[serde(default)]
    pub content_type: String,
    /// Lifecycle attributes.
    #[serde(flatten)]
    pub attributes: VaultItemAttributes,
}

/// A cryptographic key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultKey {
    /// Key name.
    pub name: String,
    /// Key type, e.g. `RSA`, `EC`.
    pub key_type: String,
    /// Lifecycle attributes.
    #[serde(flatten)]
    pub attributes: VaultItemAttributes,
}

/// A certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Certificate name.
    pub name: String,
    /// Subject distinguished name.
    #[serde(default)]
    pub subject: String,
    /// Issuer distinguished name.
    #[serde(default)]
    pub issuer: String,
    /// SHA-1 thumbprint, hex encoded.
    #[serde(default)]
    pub thumbprint: String,
    /// Content type of the certificate bundle.
    #[serde(default)]
    pub content_type: String,
    /// Lifecycle attributes.
    #[serde(flatten)]
    pub attributes: VaultItemAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_value_from_nested_json() {
        let json = serde_json::json!({
            "sku": { "name": "Standard_LRS", "tier": "Standard" },
            "zones": ["1", "2"],
            "httpsOnly": true,
            "capacity": 3,
            "note": null
        });
        let value = PropertyValue::from(json);
        let PropertyValue::Map(map) = &value else {
            panic!("expected map, got {value:?}");
        };
        assert_eq!(map["httpsOnly"], PropertyValue::Bool(true));
        assert_eq!(map["capacity"], PropertyValue::Number(3.0));
        assert_eq!(map["note"], PropertyValue::Null);
        assert_eq!(
            map["zones"],
            PropertyValue::List(vec!["1".into(), "2".into()])
        );
        assert_eq!(map["sku"].get_str("tier"), Some("Standard"));
    }

    #[test]
    fn property_value_display_summarizes_collections() {
        assert_eq!(PropertyValue::from("x").to_string(), "x");
        assert_eq!(PropertyValue::List(vec![]).to_string(), "[0 items]");
        assert_eq!(PropertyValue::Map(BTreeMap::new()).to_string(), "{0 keys}");
        assert!(PropertyValue::Bool(false).is_scalar());
        assert!(!PropertyValue::List(vec![]).is_scalar());
    }

    #[test]
    fn resource_deserializes_type_and_properties() {
        let json = r#"{
            "id": "/subscriptions/s/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/acct",
            "name": "acct",
            "type": "Microsoft.Storage/storageAccounts",
            "location": "westeurope",
            "resourceGroup": "rg1",
            "properties": { "primaryEndpoints": { "blob": "https://acct.blob.core.windows.net/" } }
        }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.resource_type, "Microsoft.Storage/storageAccounts");
        assert!(resource.tags.is_empty());
        assert_eq!(
            resource.properties["primaryEndpoints"].get_str("blob"),
            Some("https://acct.blob.core.windows.net/")
        );
    }

    #[test]
    fn key_entry_directory_marker_detection() {
        assert!(KeyEntry::new("logs/").ends_with_delimiter('/'));
        assert!(!KeyEntry::new("logs/a.txt").ends_with_delimiter('/'));

        let mut flagged = KeyEntry::new("logs");
        flagged.is_directory_marker = true;
        assert!(flagged.ends_with_delimiter('/'));
    }

    #[test]
    fn container_accepts_http_date_last_modified() {
        let json = r#"{ "name": "data", "lastModified": "Mon, 02 Jan 2006 15:04:05 GMT", "publicAccess": "blob" }"#;
        let container: Container = serde_json::from_str(json).unwrap();
        assert_eq!(container.public_access, PublicAccess::Blob);
        assert_eq!(
            container.last_modified.map(|d| d.to_rfc3339()),
            Some("2006-01-02T15:04:05+00:00".to_string())
        );
    }

    #[test]
    fn secret_flattens_attributes() {
        let json = r#"{ "name": "db-password", "enabled": true, "version": "abc", "contentType": "text/plain" }"#;
        let secret: Secret = serde_json::from_str(json).unwrap();
        assert!(secret.attributes.enabled);
        assert_eq!(secret.attributes.version, "abc");
        assert!(secret.value.is_none());
    }
}
