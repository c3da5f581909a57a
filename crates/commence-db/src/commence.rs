//! Record-level CRUD over a cursor.
//!
//! Every operation follows the same shape: scope the cursor with a
//! temporary filter, open the row-set variant the operation needs, mutate
//! or read it, commit. The scope tears itself down whatever happens inside.

use commence_core::{CmcFilter, Existing, FilterArray, NoneFound, RowData};
use commence_error::{Error, RecordError};
use tracing::debug;

use crate::cursor::Cursor;
use crate::engine::DbEngine;

pub struct Commence {
    cursor: Cursor,
}

impl std::fmt::Debug for Commence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Commence")
            .field("category", &self.cursor.category())
            .field("pk_label", &self.cursor.pk_label())
            .finish()
    }
}

impl Commence {
    pub fn new(cursor: Cursor) -> Self {
        Self { cursor }
    }

    /// Open a cursor over `category` and wrap it.
    pub fn from_table_name(engine: &dyn DbEngine, category: &str) -> Result<Self, Error> {
        debug!(db = %engine.name(), category, "GetCursor");
        let handle = engine.open_cursor(category)?;
        Ok(Self::new(Cursor::new(handle)?))
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn row_count(&self) -> Result<usize, Error> {
        Ok(self.cursor.row_count()?)
    }

    /// All (or the first `limit`) records in the current cursor view.
    pub fn records(&mut self, limit: Option<usize>) -> Result<Vec<RowData>, Error> {
        let rowset = self.cursor.query_rowset(limit)?;
        Ok(rowset.row_dicts()?)
    }

    /// One record by primary key. Zero matches is a not-found error.
    pub fn one_record(&mut self, pk: &str) -> Result<RowData, Error> {
        self.cursor.with_pk_filter(pk, |csr| {
            let rowset = csr.query_rowset(None)?;
            let mut records = rowset.row_dicts()?;
            if records.is_empty() {
                return Err(RecordError::NotFound {
                    category: csr.category().to_string(),
                    pk: pk.to_string(),
                }
                .into());
            }
            Ok(records.swap_remove(0))
        })
    }

    /// Records matching a caller-built filter array.
    pub fn records_by_array(
        &mut self,
        filters: &FilterArray,
        limit: Option<usize>,
    ) -> Result<Vec<RowData>, Error> {
        self.cursor.with_filter(filters, |csr| {
            let rowset = csr.query_rowset(limit)?;
            Ok(rowset.row_dicts()?)
        })
    }

    /// Records where `field` equals `value`, with a cardinality guard.
    ///
    /// Zero matches follows `none_found`; more than `max_rtn` matches (when
    /// given) fails with a max-exceeded error.
    pub fn records_by_field(
        &mut self,
        field: &str,
        value: &str,
        max_rtn: Option<usize>,
        none_found: NoneFound,
    ) -> Result<Vec<RowData>, Error> {
        let filters = FilterArray::single(CmcFilter::equals(field, value)?);
        self.cursor.with_filter(&filters, |csr| {
            let rowset = csr.query_rowset(None)?;
            let records = rowset.row_dicts()?;
            if records.is_empty() && none_found == NoneFound::Raise {
                return Err(RecordError::NoMatch {
                    field: field.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
            if let Some(max) = max_rtn {
                if records.len() > max {
                    return Err(RecordError::MaxExceeded {
                        limit: max,
                        count: records.len(),
                    }
                    .into());
                }
            }
            Ok(records)
        })
    }

    /// Modify fields of the record with primary key `pk`.
    pub fn edit_record(&mut self, pk: &str, changes: &RowData) -> Result<(), Error> {
        self.cursor.with_pk_filter(pk, |csr| {
            if csr.row_count()? == 0 {
                return Err(not_found(csr, pk));
            }
            let mut rowset = csr.edit_rowset(Some(1))?;
            rowset.modify_row(0, changes)?;
            Ok(rowset.commit()?)
        })
    }

    /// Delete the record with primary key `pk`. Returns whether a record
    /// was actually deleted (`false` only under [`NoneFound::Ignore`]).
    pub fn delete_record(&mut self, pk: &str, none_found: NoneFound) -> Result<bool, Error> {
        self.cursor.with_pk_filter(pk, |csr| {
            if csr.row_count()? == 0 {
                return match none_found {
                    NoneFound::Ignore => Ok(false),
                    NoneFound::Raise => Err(not_found(csr, pk)),
                };
            }
            let mut rowset = csr.delete_rowset(1)?;
            rowset.delete_row(0)?;
            rowset.commit()?;
            Ok(true)
        })
    }

    /// Delete several records by primary key.
    ///
    /// The `max_delete` guard is checked before anything is touched: asking
    /// for more deletions than the cap fails with a max-exceeded error and
    /// leaves every record in place. Returns the number actually deleted.
    pub fn delete_multiple(
        &mut self,
        pks: &[&str],
        max_delete: Option<usize>,
        none_found: NoneFound,
    ) -> Result<usize, Error> {
        if let Some(max) = max_delete {
            if pks.len() > max {
                return Err(RecordError::MaxExceeded {
                    limit: max,
                    count: pks.len(),
                }
                .into());
            }
        }
        let mut deleted = 0;
        for pk in pks {
            if self.delete_record(pk, none_found)? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Create the record with primary key `pk`, honoring the collision
    /// policy when the key is already taken.
    pub fn add_record(
        &mut self,
        pk: &str,
        fields: &RowData,
        existing: Existing,
    ) -> Result<(), Error> {
        self.cursor.with_pk_filter(pk, |csr| {
            if csr.row_count()? == 0 {
                let mut rowset = csr.named_add_rowset(pk)?;
                rowset.modify_row(0, fields)?;
                return Ok(rowset.commit()?);
            }
            match existing {
                Existing::Raise => Err(RecordError::AlreadyExists {
                    category: csr.category().to_string(),
                    pk: pk.to_string(),
                }
                .into()),
                Existing::Update => {
                    let mut rowset = csr.edit_rowset(Some(1))?;
                    rowset.modify_row(0, fields)?;
                    Ok(rowset.commit()?)
                }
                Existing::Replace => {
                    // still under the pk scope: drop the old row, then
                    // recreate it from scratch
                    let mut old = csr.delete_rowset(1)?;
                    old.delete_row(0)?;
                    old.commit()?;
                    let mut rowset = csr.named_add_rowset(pk)?;
                    rowset.modify_row(0, fields)?;
                    Ok(rowset.commit()?)
                }
            }
        })
    }
}

fn not_found(csr: &Cursor, pk: &str) -> Error {
    RecordError::NotFound {
        category: csr.category().to_string(),
        pk: pk.to_string(),
    }
    .into()
}
