#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Value must be set when condition is {condition}")]
    EmptyValue { condition: &'static str },
}
