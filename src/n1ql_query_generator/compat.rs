use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How closely generated statements follow the historical output format.
///
/// `Legacy` keeps two quirks existing consumers may match on:
/// - `$gte` against NULL renders `(f IS NULL OR f IS NOT NULL)`
/// - a selector whose only top-level key is `$or`, as in
///   `{"$or": [...]}`, renders `WHERE  a OR b` with two spaces. A field-scoped
///   `{"f": {"$or": [...]}}` and an `$or` next to other keys get one space.
///
/// `Strict` rejects `$gte` NULL and always uses a single space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputCompat {
    #[default]
    Legacy,
    Strict,
}

impl OutputCompat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputCompat::Legacy => "legacy",
            OutputCompat::Strict => "strict",
        }
    }
}

impl fmt::Display for OutputCompat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown output compatibility mode '{0}' (expected 'legacy' or 'strict')")]
pub struct ParseOutputCompatError(String);

impl FromStr for OutputCompat {
    type Err = ParseOutputCompatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(OutputCompat::Legacy),
            "strict" => Ok(OutputCompat::Strict),
            _ => Err(ParseOutputCompatError(s.to_string())),
        }
    }
}
