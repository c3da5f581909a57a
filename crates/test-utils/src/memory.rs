//! In-memory tables behind the engine traits.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use commence_core::{FilterCondition, FilterKind};
use commence_db::{CursorEngine, DbEngine, RowSetEngine};
use commence_error::AutomationError;

use crate::clause::{parse_clause, ParsedClause};

#[derive(Debug, Default)]
struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// The application object: a named set of in-memory categories.
pub struct MemoryDb {
    name: String,
    tables: HashMap<String, Rc<RefCell<Table>>>,
}

impl MemoryDb {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: HashMap::new(),
        }
    }

    /// Define a category. The first column is the primary key.
    pub fn add_category(&mut self, category: &str, columns: &[&str]) -> &mut Self {
        let table = Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        };
        self.tables
            .insert(category.to_string(), Rc::new(RefCell::new(table)));
        self
    }

    /// Seed one row. Panics on an unknown category or arity mismatch;
    /// this is fixture setup, not production surface.
    pub fn insert_row(&mut self, category: &str, values: &[&str]) -> &mut Self {
        let table = Rc::clone(self.tables.get(category).expect("category defined"));
        let mut table = table.borrow_mut();
        assert_eq!(table.columns.len(), values.len(), "row arity");
        table.rows.push(values.iter().map(|v| v.to_string()).collect());
        drop(table);
        self
    }
}

impl DbEngine for MemoryDb {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_cursor(&self, category: &str) -> Result<Box<dyn CursorEngine>, AutomationError> {
        let table = self
            .tables
            .get(category)
            .ok_or_else(|| AutomationError::UnknownCategory {
                category: category.to_string(),
            })?;
        Ok(Box::new(MemoryCursor {
            category: category.to_string(),
            table: Rc::clone(table),
            filters: BTreeMap::new(),
        }))
    }
}

struct MemoryCursor {
    category: String,
    table: Rc<RefCell<Table>>,
    filters: BTreeMap<usize, ParsedClause>,
}

fn clause_matches(filter: &ParsedClause, table: &Table, row: &[String]) -> bool {
    let Some(col) = table.columns.iter().position(|c| *c == filter.column) else {
        return false;
    };
    let cell = row[col].as_str();
    let hit = match filter.condition {
        FilterCondition::EqualTo => cell == filter.value.as_str(),
        // canonical-format dates compare chronologically as strings
        FilterCondition::After => cell > filter.value.as_str(),
        FilterCondition::Contains => cell.contains(&filter.value),
    };
    hit != filter.negated
}

impl MemoryCursor {
    /// Table indices visible under the applied filters, in row order.
    fn visible(&self) -> Vec<usize> {
        let table = self.table.borrow();
        table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                self.filters
                    .values()
                    .all(|filter| clause_matches(filter, &table, row.as_slice()))
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn snapshot(&self, limit: Option<usize>) -> (Vec<usize>, Vec<Vec<String>>) {
        let mut indices = self.visible();
        if let Some(n) = limit {
            indices.truncate(n);
        }
        let table = self.table.borrow();
        let working = indices.iter().map(|&i| table.rows[i].clone()).collect();
        (indices, working)
    }

    fn rowset(&self, mode: Mode, indices: Vec<usize>, working: Vec<Vec<String>>) -> MemoryRowSet {
        MemoryRowSet {
            table: Rc::clone(&self.table),
            mode,
            columns: self.table.borrow().columns.clone(),
            indices,
            working,
            marked: Vec::new(),
        }
    }
}

impl CursorEngine for MemoryCursor {
    fn category(&self) -> &str {
        &self.category
    }

    fn row_count(&self) -> Result<usize, AutomationError> {
        Ok(self.visible().len())
    }

    fn column_labels(&self) -> Result<Vec<String>, AutomationError> {
        Ok(self.table.borrow().columns.clone())
    }

    fn set_filter(&mut self, clause: &str) -> Result<(), AutomationError> {
        let parsed = parse_clause(clause)?;
        if parsed.kind != FilterKind::Field {
            return Err(AutomationError::Com {
                method: "SetFilter",
                message: format!(
                    "{} filters are not supported by the in-memory double",
                    parsed.kind.as_str()
                ),
            });
        }
        if !self
            .table
            .borrow()
            .columns
            .iter()
            .any(|c| *c == parsed.column)
        {
            return Err(AutomationError::BadClause {
                clause: clause.to_string(),
            });
        }
        self.filters.insert(parsed.slot, parsed);
        Ok(())
    }

    fn clear_filter(&mut self, slot: usize) -> Result<(), AutomationError> {
        self.filters.remove(&slot);
        Ok(())
    }

    fn clear_all_filters(&mut self) -> Result<(), AutomationError> {
        self.filters.clear();
        Ok(())
    }

    fn query_rowset(
        &mut self,
        limit: Option<usize>,
    ) -> Result<Box<dyn RowSetEngine>, AutomationError> {
        let (indices, working) = self.snapshot(limit);
        Ok(Box::new(self.rowset(Mode::Query, indices, working)))
    }

    fn edit_rowset(
        &mut self,
        limit: Option<usize>,
    ) -> Result<Box<dyn RowSetEngine>, AutomationError> {
        let (indices, working) = self.snapshot(limit);
        Ok(Box::new(self.rowset(Mode::Edit, indices, working)))
    }

    fn delete_rowset(&mut self, count: usize) -> Result<Box<dyn RowSetEngine>, AutomationError> {
        let (indices, working) = self.snapshot(Some(count));
        Ok(Box::new(self.rowset(Mode::Delete, indices, working)))
    }

    fn add_rowset(&mut self, count: usize) -> Result<Box<dyn RowSetEngine>, AutomationError> {
        let cols = self.table.borrow().columns.len();
        let working = vec![vec![String::new(); cols]; count];
        Ok(Box::new(self.rowset(Mode::Add, Vec::new(), working)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Query,
    Edit,
    Delete,
    Add,
}

struct MemoryRowSet {
    table: Rc<RefCell<Table>>,
    mode: Mode,
    columns: Vec<String>,
    // table indices the buffer covers (empty for Add)
    indices: Vec<usize>,
    // buffered row values
    working: Vec<Vec<String>>,
    // buffer rows marked for deletion
    marked: Vec<usize>,
}

impl MemoryRowSet {
    fn check_row(&self, row: usize) -> Result<(), AutomationError> {
        if row >= self.working.len() {
            return Err(AutomationError::RowOutOfRange {
                index: row,
                rows: self.working.len(),
            });
        }
        Ok(())
    }

    fn check_col(&self, col: usize, method: &'static str) -> Result<(), AutomationError> {
        if col >= self.columns.len() {
            return Err(AutomationError::Com {
                method,
                message: format!("column {col} out of range ({} columns)", self.columns.len()),
            });
        }
        Ok(())
    }
}

impl RowSetEngine for MemoryRowSet {
    fn row_count(&self) -> Result<usize, AutomationError> {
        Ok(self.working.len())
    }

    fn column_count(&self) -> Result<usize, AutomationError> {
        Ok(self.columns.len())
    }

    fn column_label(&self, col: usize) -> Result<String, AutomationError> {
        self.check_col(col, "GetColumnLabel")?;
        Ok(self.columns[col].clone())
    }

    fn value(&self, row: usize, col: usize) -> Result<String, AutomationError> {
        self.check_row(row)?;
        self.check_col(col, "GetRowValue")?;
        Ok(self.working[row][col].clone())
    }

    fn modify(&mut self, row: usize, col: usize, value: &str) -> Result<(), AutomationError> {
        if !matches!(self.mode, Mode::Edit | Mode::Add) {
            return Err(AutomationError::Com {
                method: "ModifyRow",
                message: "rowset is read-only".to_string(),
            });
        }
        self.check_row(row)?;
        self.check_col(col, "ModifyRow")?;
        self.working[row][col] = value.to_string();
        Ok(())
    }

    fn delete_row(&mut self, row: usize) -> Result<(), AutomationError> {
        if self.mode != Mode::Delete {
            return Err(AutomationError::Com {
                method: "DeleteRow",
                message: "not a delete rowset".to_string(),
            });
        }
        self.check_row(row)?;
        self.marked.push(row);
        Ok(())
    }

    fn commit(self: Box<Self>) -> Result<(), AutomationError> {
        let MemoryRowSet {
            table,
            mode,
            indices,
            working,
            marked,
            ..
        } = *self;
        let mut table = table.borrow_mut();
        match mode {
            Mode::Query => Ok(()),
            Mode::Edit => {
                for (idx, row) in indices.into_iter().zip(working) {
                    if idx >= table.rows.len() {
                        return Err(AutomationError::CommitFailed {
                            reason: "row vanished under the edit buffer".to_string(),
                        });
                    }
                    table.rows[idx] = row;
                }
                Ok(())
            }
            Mode::Delete => {
                let mut targets: Vec<usize> = marked.into_iter().map(|row| indices[row]).collect();
                targets.sort_unstable();
                targets.dedup();
                for idx in targets.into_iter().rev() {
                    if idx >= table.rows.len() {
                        return Err(AutomationError::CommitFailed {
                            reason: "row vanished under the delete buffer".to_string(),
                        });
                    }
                    table.rows.remove(idx);
                }
                Ok(())
            }
            Mode::Add => {
                table.rows.extend(working);
                Ok(())
            }
        }
    }
}
