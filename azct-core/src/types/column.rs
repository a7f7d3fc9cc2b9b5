//! Column schema for list views.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column width: fixed number of cells, or sized to content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "cells")]
pub enum ColumnWidth {
    #[default]
    Auto,
    Fixed(u16),
}

/// One column of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub alignment: Alignment,
    pub width: ColumnWidth,
}

impl Column {
    /// Left aligned, auto width.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alignment: Alignment::Left,
            width: ColumnWidth::Auto,
        }
    }

    #[must_use]
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn fixed(mut self, cells: u16) -> Self {
        self.width = ColumnWidth::Fixed(cells);
        self
    }
}
