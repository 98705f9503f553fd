//! Typed Mango selector tree
//!
//! The normalizer produces this tree from the loosely-typed JSON selector.
//! Every predicate carries an explicit field, operator and operand, and
//! grouping is expressed through [`Selector::And`] / [`Selector::Or`] only.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

pub const AND_TOKEN: &str = "$and";
pub const OR_TOKEN: &str = "$or";

/// Comparison operators accepted in a Mango selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,  // $eq
    Ne,  // $ne
    Gt,  // $gt
    Gte, // $gte
    Lt,  // $lt
    Lte, // $lte
    In,  // $in
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 7] = [
        ComparisonOp::Eq,
        ComparisonOp::Ne,
        ComparisonOp::Gt,
        ComparisonOp::Gte,
        ComparisonOp::Lt,
        ComparisonOp::Lte,
        ComparisonOp::In,
    ];

    /// Look up an operator by its selector token (e.g. `$gte`)
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "$eq" => Some(ComparisonOp::Eq),
            "$ne" => Some(ComparisonOp::Ne),
            "$gt" => Some(ComparisonOp::Gt),
            "$gte" => Some(ComparisonOp::Gte),
            "$lt" => Some(ComparisonOp::Lt),
            "$lte" => Some(ComparisonOp::Lte),
            "$in" => Some(ComparisonOp::In),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "$eq",
            ComparisonOp::Ne => "$ne",
            ComparisonOp::Gt => "$gt",
            ComparisonOp::Gte => "$gte",
            ComparisonOp::Lt => "$lt",
            ComparisonOp::Lte => "$lte",
            ComparisonOp::In => "$in",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Scalar value compared against a field
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
}

impl Literal {
    /// Convert a JSON scalar; arrays and objects have no literal form
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Literal::Null),
            Value::Bool(b) => Some(Literal::Boolean(*b)),
            Value::Number(n) => Some(Literal::Number(n.clone())),
            Value::String(s) => Some(Literal::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Boolean(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(n.clone()),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

/// Right-hand side of a leaf predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(Literal),
    /// Only produced for `$in`
    List(Vec<Literal>),
}

impl Operand {
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Scalar(Literal::Null))
    }

    pub fn to_json(&self) -> Value {
        match self {
            Operand::Scalar(lit) => lit.to_json(),
            Operand::List(items) => Value::Array(items.iter().map(Literal::to_json).collect()),
        }
    }
}

/// Normalized selector
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// `field OP operand`; `field` may be a dotted path into sub-documents
    Leaf {
        field: String,
        op: ComparisonOp,
        operand: Operand,
    },
    And(Vec<Selector>),
    Or(Vec<Selector>),
}

impl Selector {
    pub fn leaf(field: impl Into<String>, op: ComparisonOp, operand: Operand) -> Self {
        Selector::Leaf {
            field: field.into(),
            op,
            operand,
        }
    }

    /// Equality leaf, the meaning of the `{field: value}` shorthand
    pub fn eq(field: impl Into<String>, value: Literal) -> Self {
        Self::leaf(field, ComparisonOp::Eq, Operand::Scalar(value))
    }

    /// The selector that matches every document
    pub fn empty() -> Self {
        Selector::And(Vec::new())
    }

    /// True when the tree holds no leaf at all
    pub fn is_empty(&self) -> bool {
        match self {
            Selector::Leaf { .. } => false,
            Selector::And(children) | Selector::Or(children) => {
                children.iter().all(Selector::is_empty)
            }
        }
    }

    /// First field named by the tree, in pre-order
    pub fn first_field(&self) -> Option<&str> {
        match self {
            Selector::Leaf { field, .. } => Some(field.as_str()),
            Selector::And(children) | Selector::Or(children) => {
                children.iter().find_map(Selector::first_field)
            }
        }
    }

    /// Distinct fields named by the tree, in order of first appearance
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, fields: &mut Vec<&'a str>) {
        match self {
            Selector::Leaf { field, .. } => {
                if !fields.contains(&field.as_str()) {
                    fields.push(field.as_str());
                }
            }
            Selector::And(children) | Selector::Or(children) => {
                for child in children {
                    child.collect_fields(fields);
                }
            }
        }
    }

    /// Render back to the canonical Mango JSON form.
    ///
    /// Leaves become `{field: {op: value}}`, groups become `{"$and": [...]}` /
    /// `{"$or": [...]}`, and the empty selector becomes `{}`. Feeding the
    /// result through the normalizer yields the same tree.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        match self {
            Selector::Leaf { field, op, operand } => {
                let mut condition = Map::new();
                condition.insert(op.token().to_string(), operand.to_json());
                map.insert(field.clone(), Value::Object(condition));
            }
            Selector::And(children) if children.is_empty() => {}
            Selector::And(children) => {
                map.insert(AND_TOKEN.to_string(), group_to_value(children));
            }
            Selector::Or(children) => {
                map.insert(OR_TOKEN.to_string(), group_to_value(children));
            }
        }
        Value::Object(map)
    }
}

fn group_to_value(children: &[Selector]) -> Value {
    Value::Array(children.iter().map(Selector::to_value).collect())
}

impl From<&Selector> for Value {
    fn from(selector: &Selector) -> Self {
        selector.to_value()
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
