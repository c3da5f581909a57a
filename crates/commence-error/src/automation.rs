/// Failures surfaced by the external automation object, keyed by the
/// automation method that raised them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomationError {
    #[error("{method} failed: {message}")]
    Com {
        method: &'static str,
        message: String,
    },

    #[error("No category named {category}")]
    UnknownCategory { category: String },

    #[error("Filter clause rejected: {clause}")]
    BadClause { clause: String },

    #[error("Row {index} out of range ({rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("Commit failed: {reason}")]
    CommitFailed { reason: String },
}
