mod common;
mod compat;
mod errors;
mod operand;
pub mod operators;
mod statements;
mod where_clause;

pub use common::{index_name, quote_field_path, render_literal, render_operand};
pub use compat::{OutputCompat, ParseOutputCompatError};
pub use errors::N1qlQueryGeneratorError;
pub use operand::{GroupKind, OperandCompiler};
pub use statements::{count_statement, find_statement, index_statement};
pub use where_clause::{build_where_clause, TopLevelKey};
