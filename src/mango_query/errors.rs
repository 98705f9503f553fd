use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectorError {
    #[error(
        "Unsupported selector operator '{0}' (supported: $eq, $ne, $gt, $gte, $lt, $lte, $in, $and, $or)"
    )]
    UnsupportedOperator(String),
    #[error("Malformed selector: {0}")]
    MalformedSelector(String),
    #[error("Selector nesting exceeds the maximum depth of {0}")]
    SelectorTooDeep(usize),
}

impl SelectorError {
    /// Create a MalformedSelector error naming the offending field
    pub fn malformed_field(field: &str, problem: impl Into<String>) -> Self {
        SelectorError::MalformedSelector(format!("field '{}' {}", field, problem.into()))
    }
}
