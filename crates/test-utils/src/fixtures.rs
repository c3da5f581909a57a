//! Canned databases for tests.

use commence_core::RowData;

use crate::memory::MemoryDb;

/// Field-name/value pairs as a [`RowData`] map.
pub fn row(fields: &[(&str, &str)]) -> RowData {
    fields
        .iter()
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect()
}

/// A `Contact` category with three seeded records, keyed by `contactKey`.
pub fn contact_db() -> MemoryDb {
    let mut db = MemoryDb::new("Commence.DB");
    db.add_category(
        "Contact",
        &["contactKey", "firstName", "lastName", "email", "lastContact"],
    );
    db.insert_row(
        "Contact",
        &["JeffJones", "Jeff", "Jones", "jeff@example.com", "20240401"],
    );
    db.insert_row(
        "Contact",
        &[
            "GeoffSmith",
            "Geoff",
            "Smith",
            "geoff@example.com",
            "20240215",
        ],
    );
    db.insert_row(
        "Contact",
        &[
            "KarenJones",
            "Karen",
            "Jones",
            "karen@example.com",
            "20231120",
        ],
    );
    db
}
