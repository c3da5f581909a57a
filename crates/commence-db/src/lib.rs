//! Typed client facade over the Commence automation interface.
//!
//! Everything the external automation object can do for us is behind the
//! traits in [`engine`]; the [`Cursor`] layer sequences those calls and
//! owns the scoped-filter discipline; [`Commence`] is the record-level
//! CRUD surface callers actually use.

mod commence;
mod cursor;
mod engine;
mod rowset;
pub mod schema;

pub use commence::Commence;
pub use cursor::Cursor;
pub use engine::{CursorEngine, DbEngine, RowSetEngine};
pub use rowset::{AddRowSet, DeleteRowSet, EditRowSet, QueryRowSet};
pub use schema::ApiMethod;
