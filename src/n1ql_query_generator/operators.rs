//! Selector operator → N1QL symbol table
//!
//! Both tables are plain `match` expressions over [`ComparisonOp`], so they
//! are fixed at compile time and shared freely between threads.

use crate::mango_query::ComparisonOp;

/// Symbol used when the compared value is NULL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullRewrite {
    Is,
    IsNot,
    /// `>=` NULL: rendered as `(f IS NULL OR f IS NOT NULL)` in legacy mode
    IsNullOrIsNot,
}

impl NullRewrite {
    pub fn symbol(&self) -> &'static str {
        match self {
            NullRewrite::Is => "IS",
            NullRewrite::IsNot => "IS NOT",
            NullRewrite::IsNullOrIsNot => "IS NULL OR IS NOT",
        }
    }
}

/// N1QL symbol for a selector operator
pub fn sql_symbol(op: ComparisonOp) -> &'static str {
    match op {
        ComparisonOp::Eq => "=",
        ComparisonOp::Ne => "<>",
        ComparisonOp::Gt => ">",
        ComparisonOp::Gte => ">=",
        ComparisonOp::Lt => "<",
        ComparisonOp::Lte => "<=",
        ComparisonOp::In => "IN",
    }
}

/// NULL-safe rewrite of an operator. `$lt`, `$lte` and `$in` have none and
/// keep their plain symbol against NULL.
pub fn null_rewrite(op: ComparisonOp) -> Option<NullRewrite> {
    match op {
        ComparisonOp::Eq => Some(NullRewrite::Is),
        ComparisonOp::Ne | ComparisonOp::Gt => Some(NullRewrite::IsNot),
        ComparisonOp::Gte => Some(NullRewrite::IsNullOrIsNot),
        ComparisonOp::Lt | ComparisonOp::Lte | ComparisonOp::In => None,
    }
}
