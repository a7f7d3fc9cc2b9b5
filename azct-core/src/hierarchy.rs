//! Virtual directory view over a flat key listing
//!
//! Object storage has no directories: a container holds flat keys such as
//! `logs/2024/app.log`. [`project`] turns such a listing plus a query prefix
//! into the immediate children of that prefix, synthesizing one directory
//! node per distinct next-level folder.

use std::collections::HashSet;

use azct_provider::KeyEntry;
use chrono::{DateTime, Utc};

use crate::error::CoreError;

/// One immediate child of the projected prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Name relative to the query prefix (directories keep their trailing
    /// delimiter). Malformed keys are named by their full key.
    pub name: String,
    /// Full key for leaves, full folder prefix for directories.
    pub full_key: String,
    pub is_directory: bool,
    /// Zero for synthesized directories.
    pub size: u64,
    pub content_type: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl DirectoryNode {
    fn leaf(name: &str, entry: &KeyEntry) -> Self {
        Self {
            name: name.to_string(),
            full_key: entry.key.clone(),
            is_directory: false,
            size: entry.size.unwrap_or_default(),
            content_type: entry.content_type.clone(),
            last_modified: entry.last_modified,
        }
    }

    fn marker(name: String, folder_key: String, entry: &KeyEntry) -> Self {
        Self {
            name,
            full_key: folder_key,
            is_directory: true,
            size: 0,
            content_type: entry.content_type.clone(),
            last_modified: entry.last_modified,
        }
    }

    fn synthesized(name: &str, folder_key: String) -> Self {
        Self {
            name: name.to_string(),
            full_key: folder_key,
            is_directory: true,
            size: 0,
            content_type: None,
            last_modified: None,
        }
    }
}

/// Project `entries` onto the level directly below `prefix`.
///
/// Keys outside `prefix` are skipped. Output follows first-occurrence order of
/// the input, and each folder appears once: an explicit directory marker and a
/// folder synthesized from a deeper key share the same folder key, and
/// whichever comes first wins.
pub fn project(entries: &[KeyEntry], prefix: &str, delimiter: char) -> Vec<DirectoryNode> {
    let delimiter_len = delimiter.len_utf8();
    let mut seen: HashSet<String> = HashSet::new();
    let mut nodes = Vec::new();

    for entry in entries {
        let Some(rest) = entry.key.strip_prefix(prefix) else {
            continue;
        };
        if rest.is_empty() {
            // marker for the prefix folder itself
            continue;
        }

        let is_marker = entry.ends_with_delimiter(delimiter);
        match rest.find(delimiter) {
            Some(0) => {
                log::debug!(
                    "{} under prefix {prefix:?}, listed as leaf",
                    CoreError::MalformedKey(entry.key.clone())
                );
                // full key, not the remainder
                nodes.push(DirectoryNode::leaf(&entry.key, entry));
            }
            None if is_marker => {
                let name = format!("{rest}{delimiter}");
                let folder_key = format!("{prefix}{name}");
                if seen.insert(folder_key.clone()) {
                    nodes.push(DirectoryNode::marker(name, folder_key, entry));
                }
            }
            None => nodes.push(DirectoryNode::leaf(rest, entry)),
            Some(pos) if is_marker && pos + delimiter_len == rest.len() => {
                if seen.insert(entry.key.clone()) {
                    nodes.push(DirectoryNode::marker(
                        rest.to_string(),
                        entry.key.clone(),
                        entry,
                    ));
                }
            }
            Some(pos) => {
                let name = &rest[..pos + delimiter_len];
                let folder_key = format!("{prefix}{name}");
                if seen.insert(folder_key.clone()) {
                    nodes.push(DirectoryNode::synthesized(name, folder_key));
                }
            }
        }
    }

    nodes
}

/// Prefix one level above `prefix`, or `None` when already at the root.
///
/// The search for the delimiter starts at the second-to-last character, so
/// the trailing delimiter of `prefix` itself is ignored.
pub fn parent_prefix(prefix: &str, delimiter: char) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    let mut chars = prefix.chars();
    chars.next_back();
    let trimmed = chars.as_str();
    let parent = match trimmed.rfind(delimiter) {
        Some(idx) => &trimmed[..idx + delimiter.len_utf8()],
        None => "",
    };
    Some(parent.to_string())
}
