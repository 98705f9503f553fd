use thiserror::Error;

use crate::mango_query::SelectorError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum N1qlQueryGeneratorError {
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error("Unsupported NULL comparison: '{operator}' on field '{field}' has no defined meaning (use $eq or $ne with null)")]
    UnsupportedNullComparison {
        field: String,
        operator: &'static str,
    },
    #[error("Bucket name is missing (every statement must target a bucket)")]
    MissingBucketName,
}

impl N1qlQueryGeneratorError {
    /// Stable name of the error variant, reported to HTTP clients
    pub fn error_type(&self) -> &'static str {
        match self {
            N1qlQueryGeneratorError::Selector(SelectorError::UnsupportedOperator(_)) => {
                "UnsupportedOperator"
            }
            N1qlQueryGeneratorError::Selector(SelectorError::MalformedSelector(_)) => {
                "MalformedSelector"
            }
            N1qlQueryGeneratorError::Selector(SelectorError::SelectorTooDeep(_)) => {
                "SelectorTooDeep"
            }
            N1qlQueryGeneratorError::UnsupportedNullComparison { .. } => {
                "UnsupportedNullComparison"
            }
            N1qlQueryGeneratorError::MissingBucketName => "MissingBucketName",
        }
    }
}
