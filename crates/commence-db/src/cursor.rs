//! Live cursor over one category, with scoped filter application.
//!
//! The temporary-filter discipline lives here: `with_filter` applies a
//! [`FilterArray`], runs the body, and clears the filters again on every
//! path out, including unwinding. Nothing above this layer ever has to
//! remember to clean up.

use commence_core::{CmcFilter, FilterArray, RowData};
use commence_error::{AutomationError, Error};
use tracing::{debug, warn};

use crate::engine::CursorEngine;
use crate::rowset::{AddRowSet, DeleteRowSet, EditRowSet, QueryRowSet};

pub struct Cursor {
    engine: Box<dyn CursorEngine>,
    category: String,
    pk_label: String,
}

impl Cursor {
    /// Wrap a live cursor handle. The primary key is the first column by
    /// automation convention.
    pub fn new(engine: Box<dyn CursorEngine>) -> Result<Self, AutomationError> {
        let category = engine.category().to_string();
        let pk_label =
            engine
                .column_labels()?
                .into_iter()
                .next()
                .ok_or_else(|| AutomationError::Com {
                    method: "GetColumnLabel",
                    message: format!("category {category} has no columns"),
                })?;
        Ok(Self {
            engine,
            category,
            pk_label,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn pk_label(&self) -> &str {
        &self.pk_label
    }

    /// Rows visible under the currently applied filters.
    pub fn row_count(&self) -> Result<usize, AutomationError> {
        self.engine.row_count()
    }

    pub fn column_labels(&self) -> Result<Vec<String>, AutomationError> {
        self.engine.column_labels()
    }

    /// Apply every slot of the array, each clause passed verbatim.
    pub fn filter_by_array(&mut self, filters: &FilterArray) -> Result<(), AutomationError> {
        for (slot, clause) in filters.clauses() {
            debug!(slot, %clause, "SetFilter");
            self.engine.set_filter(&clause)?;
        }
        Ok(())
    }

    /// Drop the filter in one slot, leaving the others applied.
    pub fn clear_filter(&mut self, slot: usize) -> Result<(), AutomationError> {
        self.engine.clear_filter(slot)
    }

    pub fn clear_all_filters(&mut self) -> Result<(), AutomationError> {
        self.engine.clear_all_filters()
    }

    /// Single-slot equality scope on the primary key column.
    pub fn pk_filter(&self, pk: &str) -> Result<FilterArray, Error> {
        let filter = CmcFilter::equals(&self.pk_label, pk)?;
        Ok(FilterArray::single(filter))
    }

    /// Run `body` under a temporary filter. The filter is cleared again on
    /// every path out of this call, including panic.
    pub fn with_filter<T>(
        &mut self,
        filters: &FilterArray,
        body: impl FnOnce(&mut Cursor) -> Result<T, Error>,
    ) -> Result<T, Error> {
        // scope first, so a partially applied array is also rolled back
        let mut scope = FilterScope { cursor: self };
        scope.cursor().filter_by_array(filters)?;
        body(scope.cursor())
    }

    /// [`Cursor::with_filter`] scoped to one primary key.
    pub fn with_pk_filter<T>(
        &mut self,
        pk: &str,
        body: impl FnOnce(&mut Cursor) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let filters = self.pk_filter(pk)?;
        self.with_filter(&filters, body)
    }

    pub fn query_rowset(&mut self, limit: Option<usize>) -> Result<QueryRowSet, AutomationError> {
        Ok(QueryRowSet::new(self.engine.query_rowset(limit)?))
    }

    pub fn edit_rowset(&mut self, limit: Option<usize>) -> Result<EditRowSet, AutomationError> {
        Ok(EditRowSet::new(self.engine.edit_rowset(limit)?))
    }

    pub fn delete_rowset(&mut self, count: usize) -> Result<DeleteRowSet, AutomationError> {
        Ok(DeleteRowSet::new(self.engine.delete_rowset(count)?))
    }

    pub fn add_rowset(&mut self, count: usize) -> Result<AddRowSet, AutomationError> {
        Ok(AddRowSet::new(self.engine.add_rowset(count)?))
    }

    /// Add row-set with the primary key column pre-set on the new row.
    pub fn named_add_rowset(&mut self, pk: &str) -> Result<AddRowSet, AutomationError> {
        let mut rowset = self.add_rowset(1)?;
        let mut seed = RowData::new();
        seed.insert(self.pk_label.clone(), pk.to_string());
        rowset.modify_row(0, &seed)?;
        Ok(rowset)
    }
}

/// Clears the cursor's filters when dropped. Clear failures during teardown
/// are logged, not raised: the body's own outcome is the one the caller
/// needs to see.
struct FilterScope<'a> {
    cursor: &'a mut Cursor,
}

impl FilterScope<'_> {
    fn cursor(&mut self) -> &mut Cursor {
        self.cursor
    }
}

impl Drop for FilterScope<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.cursor.clear_all_filters() {
            warn!(category = %self.cursor.category, %err, "failed to clear temporary filter");
        }
    }
}
