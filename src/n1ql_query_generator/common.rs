//! Common utilities for N1QL statement generation

use crate::mango_query::{Literal, Operand};

/// Quote a (possibly dotted) field path for N1QL.
///
/// Every segment is back-quoted on its own so nested document access keeps
/// working:
/// ```
/// use mango_n1ql::n1ql_query_generator::quote_field_path;
/// assert_eq!(quote_field_path("status"), "`status`");
/// assert_eq!(quote_field_path("owner.address.city"), "`owner`.`address`.`city`");
/// ```
pub fn quote_field_path(path: &str) -> String {
    path.split('.')
        .map(|segment| format!("`{}`", segment))
        .collect::<Vec<_>>()
        .join(".")
}

/// Render a literal. Strings are single-quoted as-is; escaping embedded
/// quotes is left to the caller.
pub fn render_literal(literal: &Literal) -> String {
    match literal {
        Literal::Null => "NULL".to_string(),
        Literal::Boolean(b) => b.to_string(),
        Literal::Number(n) => n.to_string(),
        Literal::String(s) => format!("'{}'", s),
    }
}

/// Render an operand; lists use the N1QL array literal `[a, b]`
pub fn render_operand(operand: &Operand) -> String {
    match operand {
        Operand::Scalar(literal) => render_literal(literal),
        Operand::List(items) => format!(
            "[{}]",
            items.iter().map(render_literal).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Index name derived from its fields: `idx_` + fields joined by `_`, dots
/// replaced by `-`
pub fn index_name(fields: &[String]) -> String {
    let parts: Vec<String> = fields.iter().map(|field| field.replace('.', "-")).collect();
    format!("idx_{}", parts.join("_"))
}
