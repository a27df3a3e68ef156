use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// Column metadata shared by every row of one result set.
///
/// Holds the ordered column names plus a name-to-index map so lookups by
/// name stay cheap without duplicating strings per row.
#[derive(Debug)]
pub struct ColumnSet {
    names: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl ColumnSet {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        let by_name = names
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();
        Self { names, by_name }
    }

    /// Ordered column names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index of a column by name, or None if not found.
    #[must_use]
    pub fn index_of(&self, column_name: &str) -> Option<usize> {
        self.by_name.get(column_name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A single row from a query result, addressable by column name or index.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<ColumnSet>,
    values: Vec<RowValues>,
}

impl Row {
    #[must_use]
    pub fn new(columns: Arc<ColumnSet>, values: Vec<RowValues>) -> Self {
        Self { columns, values }
    }

    /// Get a value by column name, or None if the column doesn't exist.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.values.get(self.columns.index_of(column_name)?)
    }

    /// Get a value by column index, or None if out of bounds.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    /// Column metadata for this row.
    #[must_use]
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }
}

/// The result of one executed statement, passed through to the caller.
///
/// For statements that return columns, `rows` holds the data and
/// `rows_affected` the row count. For column-less DML, `rows` is empty and
/// `rows_affected` is the engine-reported affected count. The executors
/// never inspect the contents.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the statement
    pub rows: Vec<Row>,
    /// Rows returned, or rows affected for column-less DML
    pub rows_affected: usize,
}

impl ResultSet {
    /// Result set for a column-less DML statement.
    #[must_use]
    pub fn from_rows_affected(rows_affected: usize) -> Self {
        Self {
            rows: Vec::new(),
            rows_affected,
        }
    }
}
