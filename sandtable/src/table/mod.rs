//! Sortable table model.
//!
//! A table owns an ordered list of columns and an ordered list of data rows,
//! each row an ordered list of cell text values. Sorting reorders the rows
//! in place; the column structure never changes.

mod sort;
mod state;

pub use sort::{compare_cells, numeric_value, sort_by_column, NumericMode};
pub use state::{SortDirection, SortState};

use thiserror::Error;

/// Table error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("column index {index} out of bounds for table with {count} columns")]
    ColumnOutOfBounds { index: usize, count: usize },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A column header: display label plus a stable key used for element IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub key: String,
}

impl Column {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }
}

/// An ordered collection of columns and owned data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableModel {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl TableModel {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The trimmed text of one column, top to bottom. Rows missing the
    /// column are skipped; use `check_rectangular` to rule that out first.
    pub fn column_values(&self, column: usize) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| row.get(column))
            .map(|cell| cell.trim())
            .collect()
    }

    /// Verify every row has exactly one cell per column.
    ///
    /// Sorting a ragged table is undefined; callers must treat this as a
    /// validation failure rather than picking an order for missing cells.
    pub fn check_rectangular(&self) -> Result<(), TableError> {
        let expected = self.columns.len();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(TableError::RaggedRow {
                    row: i,
                    len: row.len(),
                    expected,
                });
            }
        }
        Ok(())
    }
}
