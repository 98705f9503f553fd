//! Recursive compilation of a normalized selector into a N1QL boolean
//! expression.

use crate::mango_query::{ComparisonOp, Operand, Selector};

use super::common::{quote_field_path, render_operand};
use super::compat::OutputCompat;
use super::errors::N1qlQueryGeneratorError;
use super::operators::{null_rewrite, sql_symbol, NullRewrite};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    And,
    Or,
}

impl GroupKind {
    pub fn joiner(&self) -> &'static str {
        match self {
            GroupKind::And => " AND ",
            GroupKind::Or => " OR ",
        }
    }

    fn of(selector: &Selector) -> Option<GroupKind> {
        match selector {
            Selector::And(_) => Some(GroupKind::And),
            Selector::Or(_) => Some(GroupKind::Or),
            Selector::Leaf { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OperandCompiler {
    compat: OutputCompat,
}

impl OperandCompiler {
    pub fn new(compat: OutputCompat) -> Self {
        Self { compat }
    }

    /// Compile one predicate (leaf or group). An empty group compiles to "".
    pub fn compile(&self, selector: &Selector) -> Result<String, N1qlQueryGeneratorError> {
        match selector {
            Selector::Leaf { field, op, operand } => self.compile_leaf(field, *op, operand),
            Selector::And(members) => self.compile_group(GroupKind::And, members),
            Selector::Or(members) => self.compile_group(GroupKind::Or, members),
        }
    }

    /// Compile group members and join them. A member group of the other kind
    /// is parenthesized; same-kind members and leaves are not.
    pub fn compile_group(
        &self,
        kind: GroupKind,
        members: &[Selector],
    ) -> Result<String, N1qlQueryGeneratorError> {
        let mut parts = Vec::with_capacity(members.len());
        for member in members {
            let sql = self.compile(member)?;
            if sql.is_empty() {
                continue;
            }

            let nested_other_kind = matches!(GroupKind::of(member), Some(k) if k != kind)
                && non_empty_members(member) > 1;
            if nested_other_kind {
                parts.push(format!("({})", sql));
            } else {
                parts.push(sql);
            }
        }
        Ok(parts.join(kind.joiner()))
    }

    fn compile_leaf(
        &self,
        field: &str,
        op: ComparisonOp,
        operand: &Operand,
    ) -> Result<String, N1qlQueryGeneratorError> {
        let column = quote_field_path(field);
        let symbol = sql_symbol(op);

        if operand.is_null() {
            match null_rewrite(op) {
                Some(NullRewrite::IsNullOrIsNot) => {
                    return match self.compat {
                        OutputCompat::Legacy => {
                            Ok(format!("({} IS NULL OR {} IS NOT NULL)", column, column))
                        }
                        OutputCompat::Strict => {
                            Err(N1qlQueryGeneratorError::UnsupportedNullComparison {
                                field: field.to_string(),
                                operator: op.token(),
                            })
                        }
                    };
                }
                Some(rewrite) => return Ok(format!("{} {} NULL", column, rewrite.symbol())),
                None => {}
            }
        }

        Ok(format!("{} {} {}", column, symbol, render_operand(operand)))
    }
}

fn non_empty_members(selector: &Selector) -> usize {
    match selector {
        Selector::And(members) | Selector::Or(members) => {
            members.iter().filter(|member| !member.is_empty()).count()
        }
        Selector::Leaf { .. } => 1,
    }
}
