//! The injectable automation seam.
//!
//! Everything the facade needs from the external automation object is
//! expressed through these traits, so the call-ordering layer runs against
//! an in-memory double exactly as it would against a live database. The
//! live implementation is a thin COM wrapper and is not part of this crate.
//!
//! Access is single-threaded and blocking; the external database process
//! serializes concurrent automation clients itself, so none of these traits
//! require `Send`.

use commence_error::AutomationError;

/// The application-level automation object (`Commence.DB`).
pub trait DbEngine {
    /// Display name of the attached database.
    fn name(&self) -> &str;

    /// Open a live cursor over one category. Unknown categories fail with
    /// [`AutomationError::UnknownCategory`].
    fn open_cursor(&self, category: &str) -> Result<Box<dyn CursorEngine>, AutomationError>;
}

/// One live, filterable cursor over one category.
///
/// Filter clauses arrive already rendered in the view-filter grammar and are
/// forwarded verbatim; a clause the engine cannot understand fails with
/// [`AutomationError::BadClause`].
pub trait CursorEngine {
    fn category(&self) -> &str;

    /// Rows visible under the currently applied filters.
    fn row_count(&self) -> Result<usize, AutomationError>;

    /// Column labels in definition order. The first column is the primary
    /// key by automation convention.
    fn column_labels(&self) -> Result<Vec<String>, AutomationError>;

    fn set_filter(&mut self, clause: &str) -> Result<(), AutomationError>;

    fn clear_filter(&mut self, slot: usize) -> Result<(), AutomationError>;

    fn clear_all_filters(&mut self) -> Result<(), AutomationError>;

    /// Read-only buffer over the first `limit` visible rows (all of them
    /// when `None`).
    fn query_rowset(&mut self, limit: Option<usize>)
        -> Result<Box<dyn RowSetEngine>, AutomationError>;

    /// Mutable buffer over the first `limit` visible rows.
    fn edit_rowset(&mut self, limit: Option<usize>)
        -> Result<Box<dyn RowSetEngine>, AutomationError>;

    /// Deletion buffer over the first `count` visible rows.
    fn delete_rowset(&mut self, count: usize) -> Result<Box<dyn RowSetEngine>, AutomationError>;

    /// Buffer of `count` freshly created blank rows, appended on commit.
    fn add_rowset(&mut self, count: usize) -> Result<Box<dyn RowSetEngine>, AutomationError>;
}

/// A cursor-scoped buffer of rows opened for one specific operation.
///
/// Mutations accumulate in the buffer; nothing reaches the database until
/// [`RowSetEngine::commit`], which consumes the buffer.
pub trait RowSetEngine {
    fn row_count(&self) -> Result<usize, AutomationError>;

    fn column_count(&self) -> Result<usize, AutomationError>;

    fn column_label(&self, col: usize) -> Result<String, AutomationError>;

    fn value(&self, row: usize, col: usize) -> Result<String, AutomationError>;

    fn modify(&mut self, row: usize, col: usize, value: &str) -> Result<(), AutomationError>;

    fn delete_row(&mut self, row: usize) -> Result<(), AutomationError>;

    fn commit(self: Box<Self>) -> Result<(), AutomationError>;
}
