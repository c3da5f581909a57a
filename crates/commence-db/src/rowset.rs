//! Typed row-set wrappers over the engine seam.
//!
//! Each acquisition mode gets its own type exposing only that mode's legal
//! operations: a query buffer cannot commit, a delete buffer cannot modify.

use commence_core::RowData;
use commence_error::AutomationError;
use itertools::Itertools;

use crate::engine::RowSetEngine;

fn column_index(inner: &dyn RowSetEngine, label: &str) -> Result<usize, AutomationError> {
    let cols = inner.column_count()?;
    for col in 0..cols {
        if inner.column_label(col)? == label {
            return Ok(col);
        }
    }
    Err(AutomationError::Com {
        method: "GetColumnIndex",
        message: format!("no column labelled {label}"),
    })
}

fn apply_changes(
    inner: &mut dyn RowSetEngine,
    row: usize,
    changes: &RowData,
) -> Result<(), AutomationError> {
    // HashMap iteration order is arbitrary; apply changes sorted by field
    // name so the automation call sequence is deterministic.
    for (field, value) in changes.iter().sorted() {
        let col = column_index(&*inner, field)?;
        inner.modify(row, col, value)?;
    }
    Ok(())
}

fn read_row(inner: &dyn RowSetEngine, row: usize) -> Result<RowData, AutomationError> {
    let cols = inner.column_count()?;
    (0..cols)
        .map(|col| Ok((inner.column_label(col)?, inner.value(row, col)?)))
        .collect()
}

/// Read-only buffer of visible rows.
pub struct QueryRowSet {
    inner: Box<dyn RowSetEngine>,
}

impl QueryRowSet {
    pub(crate) fn new(inner: Box<dyn RowSetEngine>) -> Self {
        Self { inner }
    }

    pub fn row_count(&self) -> Result<usize, AutomationError> {
        self.inner.row_count()
    }

    /// One row as a field-name to value map.
    pub fn row_dict(&self, row: usize) -> Result<RowData, AutomationError> {
        read_row(self.inner.as_ref(), row)
    }

    /// Every buffered row, in cursor order.
    pub fn row_dicts(&self) -> Result<Vec<RowData>, AutomationError> {
        (0..self.inner.row_count()?)
            .map(|row| self.row_dict(row))
            .collect()
    }
}

/// Mutable buffer over existing rows.
pub struct EditRowSet {
    inner: Box<dyn RowSetEngine>,
}

impl EditRowSet {
    pub(crate) fn new(inner: Box<dyn RowSetEngine>) -> Self {
        Self { inner }
    }

    pub fn row_count(&self) -> Result<usize, AutomationError> {
        self.inner.row_count()
    }

    /// Apply field changes to one buffered row. Unknown field names fail.
    pub fn modify_row(&mut self, row: usize, changes: &RowData) -> Result<(), AutomationError> {
        apply_changes(self.inner.as_mut(), row, changes)
    }

    pub fn commit(self) -> Result<(), AutomationError> {
        self.inner.commit()
    }
}

/// Buffer of freshly created rows, appended on commit.
pub struct AddRowSet {
    inner: Box<dyn RowSetEngine>,
}

impl AddRowSet {
    pub(crate) fn new(inner: Box<dyn RowSetEngine>) -> Self {
        Self { inner }
    }

    pub fn row_count(&self) -> Result<usize, AutomationError> {
        self.inner.row_count()
    }

    pub fn modify_row(&mut self, row: usize, changes: &RowData) -> Result<(), AutomationError> {
        apply_changes(self.inner.as_mut(), row, changes)
    }

    pub fn commit(self) -> Result<(), AutomationError> {
        self.inner.commit()
    }
}

/// Deletion buffer; rows marked here disappear on commit.
pub struct DeleteRowSet {
    inner: Box<dyn RowSetEngine>,
}

impl DeleteRowSet {
    pub(crate) fn new(inner: Box<dyn RowSetEngine>) -> Self {
        Self { inner }
    }

    pub fn row_count(&self) -> Result<usize, AutomationError> {
        self.inner.row_count()
    }

    pub fn delete_row(&mut self, row: usize) -> Result<(), AutomationError> {
        self.inner.delete_row(row)
    }

    pub fn commit(self) -> Result<(), AutomationError> {
        self.inner.commit()
    }
}
