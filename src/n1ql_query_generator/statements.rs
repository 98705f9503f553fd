//! SELECT / SELECT COUNT / CREATE INDEX assembly
//!
//! These functions only join already-compiled pieces; selector handling
//! happens in the normalizer and the operand compiler.

use super::common::{index_name, quote_field_path};
use super::errors::N1qlQueryGeneratorError;

fn require_bucket(bucket_name: &str) -> Result<&str, N1qlQueryGeneratorError> {
    let bucket = bucket_name.trim();
    if bucket.is_empty() {
        return Err(N1qlQueryGeneratorError::MissingBucketName);
    }
    Ok(bucket)
}

/// Join statement parts with single spaces, dropping empty ones
fn join_clauses(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `SELECT <fields> FROM <bucket> [WHERE ...] [LIMIT n]`
pub fn find_statement(
    bucket_name: &str,
    fields: &[String],
    where_clause: &str,
    limit: Option<u64>,
) -> Result<String, N1qlQueryGeneratorError> {
    let bucket = require_bucket(bucket_name)?;

    let projection = if fields.is_empty() {
        format!("meta().id as _id, {}.*", bucket)
    } else {
        fields.join(", ")
    };
    let select = format!("SELECT {} FROM {}", projection, bucket);
    let limit = limit.map(|n| format!("LIMIT {}", n)).unwrap_or_default();

    Ok(join_clauses(&[select.as_str(), where_clause, limit.as_str()]))
}

/// `SELECT COUNT(<field>) AS docCount FROM <bucket> [WHERE ...]`
///
/// Counts `*` when no field is known.
pub fn count_statement(
    bucket_name: &str,
    count_field: Option<&str>,
    where_clause: &str,
) -> Result<String, N1qlQueryGeneratorError> {
    let bucket = require_bucket(bucket_name)?;

    let counted = match count_field {
        Some(field) if !field.is_empty() => quote_field_path(field),
        _ => "*".to_string(),
    };
    let select = format!("SELECT COUNT({}) AS docCount FROM {}", counted, bucket);

    Ok(join_clauses(&[select.as_str(), where_clause]))
}

/// `CREATE INDEX <name> ON <bucket> (<fields>)`
pub fn index_statement(
    bucket_name: &str,
    fields: &[String],
) -> Result<String, N1qlQueryGeneratorError> {
    let bucket = require_bucket(bucket_name)?;

    let columns: Vec<String> = fields.iter().map(|field| quote_field_path(field)).collect();
    Ok(format!(
        "CREATE INDEX {} ON {} ({})",
        index_name(fields),
        bucket,
        columns.join(", ")
    ))
}
