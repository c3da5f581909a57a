//! Cursor filtering and the temporary-scope discipline, through the seam.

use std::panic::{catch_unwind, AssertUnwindSafe};

use commence_core::{CmcFilter, FilterArray, FilterCondition, FilterKind};
use commence_db::{Cursor, DbEngine};
use commence_error::AutomationError;
use commence_test_utils::contact_db;

fn open_cursor() -> Cursor {
    let db = contact_db();
    Cursor::new(db.open_cursor("Contact").unwrap()).unwrap()
}

fn jones_array() -> FilterArray {
    FilterArray::single(CmcFilter::equals("lastName", "Jones").unwrap())
}

#[test]
fn pk_label_is_the_first_column() {
    let csr = open_cursor();
    assert_eq!(csr.category(), "Contact");
    assert_eq!(csr.pk_label(), "contactKey");
}

#[test]
fn filters_narrow_and_clear_restores() {
    let mut csr = open_cursor();
    csr.filter_by_array(&jones_array()).unwrap();
    assert_eq!(csr.row_count().unwrap(), 2);
    csr.clear_all_filters().unwrap();
    assert_eq!(csr.row_count().unwrap(), 3);
}

#[test]
fn two_slots_are_a_conjunction() {
    let mut csr = open_cursor();
    let mut filters = FilterArray::new();
    filters.add_replace_filters([
        CmcFilter::equals("lastName", "Jones").unwrap(),
        CmcFilter::equals("firstName", "Karen").unwrap(),
    ]);
    csr.filter_by_array(&filters).unwrap();
    assert_eq!(csr.row_count().unwrap(), 1);
}

#[test]
fn clearing_one_slot_leaves_the_rest_applied() {
    let mut csr = open_cursor();
    let mut filters = FilterArray::new();
    filters.add_replace_filters([
        CmcFilter::equals("lastName", "Jones").unwrap(),
        CmcFilter::equals("firstName", "Karen").unwrap(),
    ]);
    csr.filter_by_array(&filters).unwrap();
    assert_eq!(csr.row_count().unwrap(), 1);
    csr.clear_filter(2).unwrap();
    assert_eq!(csr.row_count().unwrap(), 2);
}

#[test]
fn negated_filter_inverts_the_match() {
    let mut csr = open_cursor();
    let filters = FilterArray::single(CmcFilter::equals("lastName", "Jones").unwrap().negate());
    csr.filter_by_array(&filters).unwrap();
    assert_eq!(csr.row_count().unwrap(), 1);
}

#[test]
fn after_filter_compares_canonical_dates() {
    let mut csr = open_cursor();
    let filters = FilterArray::single(
        CmcFilter::new("lastContact", FilterCondition::After, "20240101").unwrap(),
    );
    csr.filter_by_array(&filters).unwrap();
    assert_eq!(csr.row_count().unwrap(), 2);
}

#[test]
fn unknown_column_is_a_bad_clause() {
    let mut csr = open_cursor();
    let filters = FilterArray::single(CmcFilter::equals("noSuchColumn", "x").unwrap());
    let err = csr.filter_by_array(&filters).unwrap_err();
    assert!(matches!(err, AutomationError::BadClause { .. }));
}

#[test]
fn connection_filters_are_refused_by_the_double() {
    let mut csr = open_cursor();
    let filters = FilterArray::single(
        CmcFilter::with_kind(
            "Relates To",
            FilterCondition::EqualTo,
            "AcmeCo",
            FilterKind::ConnectionToItem,
        )
        .unwrap(),
    );
    let err = csr.filter_by_array(&filters).unwrap_err();
    assert!(matches!(err, AutomationError::Com { method: "SetFilter", .. }));
}

#[test]
fn with_filter_clears_on_success() {
    let mut csr = open_cursor();
    let count = csr
        .with_filter(&jones_array(), |csr| Ok(csr.row_count()?))
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(csr.row_count().unwrap(), 3);
}

#[test]
fn with_filter_clears_on_error() {
    let mut csr = open_cursor();
    let err = csr.with_filter(&jones_array(), |csr| -> Result<(), commence_error::Error> {
        csr.row_count()?;
        Err(commence_error::RecordError::NoMatch {
            field: "lastName".into(),
            value: "Jones".into(),
        }
        .into())
    });
    assert!(err.is_err());
    assert_eq!(csr.row_count().unwrap(), 3);
}

#[test]
fn with_filter_clears_on_panic() {
    let mut csr = open_cursor();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        csr.with_filter(&jones_array(), |_| -> Result<(), commence_error::Error> {
            panic!("boom")
        })
    }));
    assert!(outcome.is_err());
    assert_eq!(csr.row_count().unwrap(), 3);
}

#[test]
fn with_pk_filter_scopes_to_one_record() {
    let mut csr = open_cursor();
    let count = csr
        .with_pk_filter("JeffJones", |csr| Ok(csr.row_count()?))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn empty_pk_cannot_build_a_scope() {
    let mut csr = open_cursor();
    let err = csr.with_pk_filter("", |csr| Ok(csr.row_count()?)).unwrap_err();
    assert!(matches!(
        err,
        commence_error::Error::Filter(commence_error::FilterError::EmptyValue { .. })
    ));
}
