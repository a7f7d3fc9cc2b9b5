//! Read-only view snapshot for the rendering surface.

use std::fmt;

use azct_provider::UserInfo;
use serde::Serialize;

use super::Column;
use crate::navigation::ViewKind;

/// A key binding valid in the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyHint {
    pub key: String,
    pub label: String,
}

impl KeyHint {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for KeyHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.label)
    }
}

/// Footer status of the active list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total_count: usize,
    pub filtered_count: usize,
    pub filter_active: bool,
    pub filter: String,
    pub actions: Vec<KeyHint>,
    /// Message of the last failed operation, cleared by the next success.
    pub last_error: Option<String>,
}

impl StatusSummary {
    /// `Items: 5` or `Items: Showing 2 of 5`.
    pub fn count_text(&self) -> String {
        if self.filter_active {
            format!(
                "Items: Showing {} of {}",
                self.filtered_count, self.total_count
            )
        } else {
            format!("Items: {}", self.total_count)
        }
    }

    /// Key hints joined as `Enter: ..., ESC: back, ...`.
    pub fn actions_text(&self) -> String {
        self.actions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub view: ViewKind,
    pub title: String,
    pub breadcrumb: Vec<String>,
    pub columns: Vec<Column>,
    /// Display-ready cells of the filtered rows.
    pub rows: Vec<Vec<String>>,
    /// Cursor as a display row, `None` when the list is empty.
    pub selected: Option<usize>,
    pub status: StatusSummary,
    /// Detail overlay text, present only while the overlay is shown.
    pub detail: Option<String>,
    pub user: Option<UserInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(filter: &str) -> StatusSummary {
        StatusSummary {
            total_count: 5,
            filtered_count: 2,
            filter_active: !filter.is_empty(),
            filter: filter.to_string(),
            actions: vec![KeyHint::new("d", "details"), KeyHint::new("ESC", "back")],
            last_error: None,
        }
    }

    #[test]
    fn test_count_text() {
        assert_eq!(status("rg1").count_text(), "Items: Showing 2 of 5");
        assert_eq!(status("").count_text(), "Items: 5");
    }

    #[test]
    fn test_actions_text() {
        assert_eq!(status("").actions_text(), "d: details, ESC: back");
    }
}
