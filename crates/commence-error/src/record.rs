#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("No record in {category} for primary key {pk}")]
    NotFound { category: String, pk: String },

    #[error("No record matching {field} = {value}")]
    NoMatch { field: String, value: String },

    #[error("Record already exists in {category} for primary key {pk}")]
    AlreadyExists { category: String, pk: String },

    #[error("Expected at most {limit} records, got {count}")]
    MaxExceeded { limit: usize, count: usize },
}
