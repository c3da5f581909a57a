use serde::{Deserialize, Serialize};

/// Named relationship between two categories. Pure descriptor; the external
/// database owns the relationship itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub name: String,
    pub from_table: String,
    pub to_table: String,
}

impl Connection {
    pub fn new(
        name: impl Into<String>,
        from_table: impl Into<String>,
        to_table: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            from_table: from_table.into(),
            to_table: to_table.into(),
        }
    }
}
