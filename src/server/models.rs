use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::n1ql_query_generator::N1qlQueryGeneratorError;

/// Generated statement
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatementResponse {
    pub statement: String,
    pub elapsed_ms: f64,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    #[serde(default)]
    pub selector: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub selector: Value,
}

/// Error body returned with HTTP 400
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TranslationError {
    pub error: String,
    pub error_type: String,
}

impl TranslationError {
    /// Body that could not be decoded into the endpoint's request type
    pub fn malformed_request(reason: impl Into<String>) -> Self {
        Self {
            error: reason.into(),
            error_type: "MalformedRequest".to_string(),
        }
    }

    pub fn payload_too_large(reason: impl Into<String>) -> Self {
        Self {
            error: reason.into(),
            error_type: "PayloadTooLarge".to_string(),
        }
    }
}

impl From<&N1qlQueryGeneratorError> for TranslationError {
    fn from(err: &N1qlQueryGeneratorError) -> Self {
        Self {
            error: err.to_string(),
            error_type: err.error_type().to_string(),
        }
    }
}
