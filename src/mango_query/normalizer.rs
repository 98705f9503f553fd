//! Selector normalization
//!
//! Turns a raw Mango selector (JSON) into a [`Selector`] tree:
//! - `{field: scalar}` shorthand becomes an explicit `$eq` leaf
//! - `{field: {"$gt": 1, "$lt": 5}}` becomes a conjunction of leaves on `field`
//! - `{field: {"$or": [...]}}` distributes `field` into every grouped condition
//! - `{a: {b: 1}}` addresses the sub-document field `a.b`
//! - objects with more than one key become an explicit `$and` in key order
//!
//! The input is never modified; a new tree is returned.

use serde_json::{Map, Value};

use super::errors::SelectorError;
use super::selector::{ComparisonOp, Literal, Operand, Selector, AND_TOKEN, OR_TOKEN};

pub const DEFAULT_MAX_SELECTOR_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorNormalizer {
    max_depth: usize,
}

impl Default for SelectorNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SELECTOR_DEPTH)
    }
}

impl SelectorNormalizer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Normalize a selector. `null` is treated as the empty selector `{}`.
    pub fn normalize(&self, selector: &Value) -> Result<Selector, SelectorError> {
        let normalized = match selector {
            Value::Null => Selector::empty(),
            Value::Object(map) => self.normalize_object(map, None, 1)?,
            other => {
                return Err(SelectorError::MalformedSelector(format!(
                    "selector must be an object, found {}",
                    json_kind(other)
                )))
            }
        };
        log::trace!("Normalized selector: {}", normalized.to_value());
        Ok(normalized)
    }

    /// Normalize one object. `scope` is the field the object's conditions
    /// apply to, `None` at selector level.
    fn normalize_object(
        &self,
        map: &Map<String, Value>,
        scope: Option<&str>,
        depth: usize,
    ) -> Result<Selector, SelectorError> {
        if depth > self.max_depth {
            return Err(SelectorError::SelectorTooDeep(self.max_depth));
        }

        if map.is_empty() {
            return match scope {
                None => Ok(Selector::empty()),
                Some(field) => Err(SelectorError::malformed_field(field, "has an empty condition")),
            };
        }

        let mut entries: Vec<(&str, Selector)> = Vec::with_capacity(map.len());
        for (key, value) in map {
            let entry = match key.as_str() {
                AND_TOKEN => Selector::And(self.normalize_group(key, value, scope, depth)?),
                OR_TOKEN => Selector::Or(self.normalize_group(key, value, scope, depth)?),
                token if token.starts_with('$') => {
                    let op = ComparisonOp::from_token(token)
                        .ok_or_else(|| SelectorError::UnsupportedOperator(token.to_string()))?;
                    let field = scope.ok_or_else(|| {
                        SelectorError::MalformedSelector(format!(
                            "operator '{}' must be applied to a field",
                            token
                        ))
                    })?;
                    Selector::leaf(field, op, operand_for(field, op, value)?)
                }
                name => {
                    if name.is_empty() {
                        return Err(SelectorError::MalformedSelector(
                            "field names cannot be empty".to_string(),
                        ));
                    }
                    let field = match scope {
                        Some(parent) => format!("{}.{}", parent, name),
                        None => name.to_string(),
                    };
                    self.normalize_field(field, value, depth)?
                }
            };
            entries.push((key.as_str(), entry));
        }

        if entries.len() == 1 {
            if let Some((_, only)) = entries.pop() {
                return Ok(only);
            }
        }

        // An explicit $and next to other keys is merged into the wrapping conjunction
        let mut conjuncts = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            match entry {
                Selector::And(members) if key == AND_TOKEN => conjuncts.extend(members),
                other => conjuncts.push(other),
            }
        }
        Ok(Selector::And(conjuncts))
    }

    fn normalize_field(
        &self,
        field: String,
        value: &Value,
        depth: usize,
    ) -> Result<Selector, SelectorError> {
        match value {
            Value::Object(conditions) => self.normalize_object(conditions, Some(&field), depth + 1),
            Value::Array(_) => Err(SelectorError::malformed_field(
                &field,
                "cannot be compared against an array (use $in)",
            )),
            scalar => match Literal::from_json(scalar) {
                Some(literal) => Ok(Selector::eq(field, literal)),
                None => Err(SelectorError::malformed_field(&field, "has an unsupported value")),
            },
        }
    }

    fn normalize_group(
        &self,
        token: &str,
        value: &Value,
        scope: Option<&str>,
        depth: usize,
    ) -> Result<Vec<Selector>, SelectorError> {
        let members = value.as_array().ok_or_else(|| {
            SelectorError::MalformedSelector(format!(
                "'{}' expects an array, found {}",
                token,
                json_kind(value)
            ))
        })?;

        members
            .iter()
            .map(|member| match (member, scope) {
                (Value::Object(map), _) => self.normalize_object(map, scope, depth + 1),
                (Value::Array(_), _) => Err(SelectorError::MalformedSelector(format!(
                    "'{}' members cannot be arrays",
                    token
                ))),
                // Inside a field scope a bare value is the $eq shorthand
                (scalar, Some(field)) => match Literal::from_json(scalar) {
                    Some(literal) => Ok(Selector::eq(field, literal)),
                    None => Err(SelectorError::malformed_field(field, "has an unsupported value")),
                },
                (other, None) => Err(SelectorError::MalformedSelector(format!(
                    "'{}' members must be selector objects, found {}",
                    token,
                    json_kind(other)
                ))),
            })
            .collect()
    }
}

fn operand_for(field: &str, op: ComparisonOp, value: &Value) -> Result<Operand, SelectorError> {
    if op == ComparisonOp::In {
        let items = value.as_array().ok_or_else(|| {
            SelectorError::malformed_field(field, "uses $in without an array of values")
        })?;
        return items
            .iter()
            .map(|item| {
                Literal::from_json(item).ok_or_else(|| {
                    SelectorError::malformed_field(field, "uses $in with a non-scalar member")
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Operand::List);
    }

    Literal::from_json(value).map(Operand::Scalar).ok_or_else(|| {
        SelectorError::malformed_field(field, format!("uses {} with a non-scalar value", op))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
