//! Live substring filter over an in-memory record set
//!
//! A [`FilterableList`] owns the full record slice and a filtered index
//! sequence mapping display rows to record positions. Filtering never drops
//! records: clearing the filter always restores the identity mapping.

use std::sync::Arc;

use crate::types::Column;

/// Column schema and cell extraction for one record type.
pub trait RowFormatter<T>: Send + Sync {
    /// Ordered column schema.
    fn columns(&self) -> Vec<Column>;

    /// Display text of `record` in column `column`.
    ///
    /// Out-of-range columns yield an empty string.
    fn cell_value(&self, record: &T, column: usize) -> String;
}

type CellFn<T> = Box<dyn Fn(&T, usize) -> String + Send + Sync>;

/// A [`RowFormatter`] built from a fixed column list and a cell function.
pub struct StaticFormatter<T> {
    columns: Vec<Column>,
    cell: CellFn<T>,
}

impl<T> StaticFormatter<T> {
    pub fn new(
        columns: Vec<Column>,
        cell: impl Fn(&T, usize) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            columns,
            cell: Box::new(cell),
        }
    }
}

impl<T> RowFormatter<T> for StaticFormatter<T> {
    fn columns(&self) -> Vec<Column> {
        self.columns.clone()
    }

    fn cell_value(&self, record: &T, column: usize) -> String {
        if column >= self.columns.len() {
            return String::new();
        }
        (self.cell)(record, column)
    }
}

/// A record set with a live, case-insensitive substring filter and a cursor.
pub struct FilterableList<T> {
    records: Vec<T>,
    filter: String,
    /// display row -> position in `records`
    indices: Vec<usize>,
    /// cursor, as a display row
    selected: usize,
    formatter: Arc<dyn RowFormatter<T>>,
}

impl<T> FilterableList<T> {
    /// Empty list using `formatter` for columns and cell text.
    pub fn new(formatter: Arc<dyn RowFormatter<T>>) -> Self {
        Self {
            records: Vec::new(),
            filter: String::new(),
            indices: Vec::new(),
            selected: 0,
            formatter,
        }
    }

    /// Replace the record set and reset the filter and cursor.
    pub fn load(&mut self, records: Vec<T>) {
        self.records = records;
        self.filter.clear();
        self.indices = (0..self.records.len()).collect();
        self.selected = 0;
    }

    /// Re-filter from the full record set.
    ///
    /// A record matches if any of its cells contains `text`, ignoring ASCII
    /// case. Empty `text` restores every record in original order.
    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.to_string();
        self.selected = 0;

        if text.is_empty() {
            self.indices = (0..self.records.len()).collect();
            return;
        }

        let needle = text.to_ascii_lowercase();
        let column_count = self.formatter.columns().len();
        self.indices = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                (0..column_count).any(|col| {
                    self.formatter
                        .cell_value(record, col)
                        .to_ascii_lowercase()
                        .contains(&needle)
                })
            })
            .map(|(idx, _)| idx)
            .collect();
    }

    /// Same as `set_filter("")`.
    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    pub fn filtered_count(&self) -> usize {
        self.indices.len()
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn columns(&self) -> Vec<Column> {
        self.formatter.columns()
    }

    /// Record shown at display row `row`.
    pub fn record_at(&self, row: usize) -> Option<&T> {
        self.indices.get(row).and_then(|&idx| self.records.get(idx))
    }

    /// Display-ready cells of every filtered row.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let column_count = self.formatter.columns().len();
        self.indices
            .iter()
            .filter_map(|&idx| self.records.get(idx))
            .map(|record| {
                (0..column_count)
                    .map(|col| self.formatter.cell_value(record, col))
                    .collect()
            })
            .collect()
    }

    // ========== 光标 ==========

    /// 当前选中的显示行
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 选择上一项
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// 选择下一项
    pub fn select_next(&mut self) {
        if !self.indices.is_empty() && self.selected < self.indices.len() - 1 {
            self.selected += 1;
        }
    }

    /// 选择第一项
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// 选择最后一项
    pub fn select_last(&mut self) {
        if !self.indices.is_empty() {
            self.selected = self.indices.len() - 1;
        }
    }

    /// 获取当前选中的记录
    pub fn selected_record(&self) -> Option<&T> {
        self.record_at(self.selected)
    }
}
