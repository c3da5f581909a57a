pub mod automation;
pub mod filter;
pub mod record;

// public exports
pub use automation::AutomationError;
pub use filter::FilterError;
pub use record::RecordError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Automation(#[from] AutomationError),
}

impl Error {
    /// True for both flavors of zero-match failure, so callers can treat
    /// "missing by pk" and "missing by field" uniformly.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Record(RecordError::NotFound { .. }) | Error::Record(RecordError::NoMatch { .. })
        )
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::Record(RecordError::AlreadyExists { .. }))
    }

    pub fn is_max_exceeded(&self) -> bool {
        matches!(self, Error::Record(RecordError::MaxExceeded { .. }))
    }
}
