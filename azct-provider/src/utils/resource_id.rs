//! Resource ID and type key helpers.

/// Strip the provider namespace from a type key.
///
/// `Microsoft.Storage/storageAccounts` becomes `storageAccounts`. Keys without
/// a `/`, or ending in one, are returned unchanged.
pub fn strip_provider_prefix(resource_type: &str) -> &str {
    match resource_type.rfind('/') {
        Some(idx) if idx + 1 < resource_type.len() => &resource_type[idx + 1..],
        _ => resource_type,
    }
}

/// Extract the resource group name from a full resource ID.
///
/// The segment following `resourceGroups` is matched case-insensitively, since
/// the management plane is not consistent about its casing.
pub fn resource_group_from_id(resource_id: &str) -> Option<&str> {
    let mut segments = resource_id.split('/');
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case("resourceGroups") {
            return segments.next().filter(|s| !s.is_empty());
        }
    }
    None
}

/// Extract the subscription ID from a full resource ID.
pub fn subscription_from_id(resource_id: &str) -> Option<&str> {
    let mut segments = resource_id.split('/');
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case("subscriptions") {
            return segments.next().filter(|s| !s.is_empty());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str =
        "/subscriptions/0000-1111/resourceGroups/rg-app/providers/Microsoft.KeyVault/vaults/kv1";

    #[test]
    fn strips_namespace() {
        assert_eq!(
            strip_provider_prefix("Microsoft.Storage/storageAccounts"),
            "storageAccounts"
        );
        assert_eq!(
            strip_provider_prefix("Microsoft.Network/dnszones/A"),
            "A"
        );
    }

    #[test]
    fn keeps_keys_without_usable_suffix() {
        assert_eq!(strip_provider_prefix("plain"), "plain");
        assert_eq!(strip_provider_prefix("trailing/"), "trailing/");
        assert_eq!(strip_provider_prefix(""), "");
    }

    #[test]
    fn finds_resource_group() {
        assert_eq!(resource_group_from_id(ID), Some("rg-app"));
        assert_eq!(
            resource_group_from_id("/subscriptions/s/RESOURCEGROUPS/Upper/providers/x/y/z"),
            Some("Upper")
        );
    }

    #[test]
    fn missing_resource_group() {
        assert_eq!(resource_group_from_id("/subscriptions/s"), None);
        assert_eq!(resource_group_from_id("/subscriptions/s/resourceGroups"), None);
        assert_eq!(resource_group_from_id(""), None);
    }

    #[test]
    fn finds_subscription() {
        assert_eq!(subscription_from_id(ID), Some("0000-1111"));
        assert_eq!(subscription_from_id("/providers/x"), None);
    }
}
