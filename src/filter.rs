//! Row selection by exact column value.
use crate::error::{Result as RowsiftResult, RowsiftError};
use crate::logging::LogSink;
use crate::table::Table;

/// How the filter column is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// 0-based position. Negative values are rejected when filtering.
    Index(i64),
    /// Name looked up in the first row of the table.
    Name(String),
}

impl ColumnSelector {
    /// Turn the selector into a column index for `table`.
    ///
    /// Names resolve to the first exact match in the first row. The header
    /// row itself is not removed from the table.
    pub fn resolve(&self, table: &Table) -> RowsiftResult<i64> {
        match self {
            ColumnSelector::Index(index) => Ok(*index),
            ColumnSelector::Name(name) => table
                .rows()
                .first()
                .and_then(|header| header.iter().position(|field| field == name))
                .map(|pos| pos as i64)
                .ok_or_else(|| RowsiftError::UnknownColumn(name.clone())),
        }
    }
}

/// A (column index, target value) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriterion {
    pub column_index: i64,
    pub target_value: String,
}

impl FilterCriterion {
    pub fn new(column_index: i64, target_value: impl Into<String>) -> Self {
        Self {
            column_index,
            target_value: target_value.into(),
        }
    }

    pub fn apply(&self, table: &Table, sink: &LogSink) -> RowsiftResult<Table> {
        filter_by_column(table, self.column_index, &self.target_value, sink)
    }
}

/// Keep the rows whose field at `column_index` equals `target_value`.
///
/// The input is left untouched and the result preserves row order. Rows too
/// short to have the column never match. An empty input yields an empty
/// table before any index validation.
///
/// # Errors
///
/// * `InvalidArgument` if `column_index` is negative
/// * `OutOfRange` if `column_index` is not below the first row's width
pub fn filter_by_column(
    table: &Table,
    column_index: i64,
    target_value: &str,
    sink: &LogSink,
) -> RowsiftResult<Table> {
    let Some(width) = table.width() else {
        sink.warn(format_args!("No data provided for filtering"));
        return Ok(Table::empty());
    };

    if column_index < 0 {
        sink.error(format_args!("Invalid column index: {column_index}"));
        return Err(RowsiftError::InvalidArgument(
            "Column index must be non-negative".to_string(),
        ));
    }

    let index = match usize::try_from(column_index) {
        Ok(index) if index < width => index,
        _ => {
            sink.error(format_args!(
                "Column index {column_index} out of range for data with {width} columns"
            ));
            return Err(RowsiftError::OutOfRange {
                index: column_index,
                width,
            });
        }
    };

    let filtered: Table = table
        .iter()
        .filter(|row| row.get(index).is_some_and(|field| field == target_value))
        .cloned()
        .collect();

    sink.info(format_args!(
        "Filtered {} rows matching '{}' in column {}",
        filtered.len(),
        target_value,
        column_index
    ));
    Ok(filtered)
}
