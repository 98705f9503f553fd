use serde_json::Value;

use crate::mango_query::{Selector, OR_TOKEN};

use super::compat::OutputCompat;
use super::errors::N1qlQueryGeneratorError;
use super::operand::{GroupKind, OperandCompiler};

/// How the raw selector was keyed at the top level.
///
/// Normalization erases this: `{f: {"$or": [...]}}` and `{"$or": [...]}`
/// both become an `Or` tree, but only the second one is rendered with the
/// legacy leading space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopLevelKey {
    /// The selector is an object whose only key is `$or`
    Or,
    Other,
}

impl TopLevelKey {
    pub fn of(raw_selector: &Value) -> Self {
        match raw_selector {
            Value::Object(map) if map.len() == 1 && map.contains_key(OR_TOKEN) => TopLevelKey::Or,
            _ => TopLevelKey::Other,
        }
    }
}

/// Build the WHERE clause for a normalized selector.
///
/// Returns an empty string when the selector has no predicate.
pub fn build_where_clause(
    selector: &Selector,
    top_level_key: TopLevelKey,
    compat: OutputCompat,
) -> Result<String, N1qlQueryGeneratorError> {
    let compiler = OperandCompiler::new(compat);

    let body = match selector {
        Selector::And(members) => compiler.compile_group(GroupKind::And, members)?,
        Selector::Or(members) => {
            let disjunction = compiler.compile_group(GroupKind::Or, members)?;
            let leading_space = compat == OutputCompat::Legacy
                && top_level_key == TopLevelKey::Or
                && !disjunction.is_empty();
            if leading_space {
                format!(" {}", disjunction)
            } else {
                disjunction
            }
        }
        leaf => compiler.compile(leaf)?,
    };

    if body.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("WHERE {}", body))
    }
}
