//! The tagged fact value and the per-selector observation cell.
//!
//! Collectors produce arbitrarily-typed facts; policies declare arbitrarily-
//! typed expectations. Both sides use [`Value`] so every constraint kind's
//! comparison logic is total: a mismatched pair never panics and never
//! coerces, it resolves to [`Comparison::NotComparable`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A scalar or ordered-list fact value.
///
/// Integers and floats are distinct variants for lossless round-tripping,
/// but compare numerically against each other: both are the logical
/// "number" kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

/// Outcome of comparing two values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    Unequal,
    /// The two sides are of incompatible kinds; no verdict is possible.
    NotComparable,
}

impl Value {
    /// Human-readable kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Kind-sensitive equality.
    ///
    /// Numbers compare numerically across the int/float split. Lists compare
    /// element-wise and are `NotComparable` as soon as any element pair is.
    pub fn compare(&self, other: &Value) -> Comparison {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => equal_if(a == b),
            (Value::String(a), Value::String(b)) => equal_if(a == b),
            (Value::List(a), Value::List(b)) => {
                if a.len() != b.len() {
                    return Comparison::Unequal;
                }
                let mut verdict = Comparison::Equal;
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.compare(y) {
                        Comparison::Equal => {}
                        Comparison::Unequal => verdict = Comparison::Unequal,
                        Comparison::NotComparable => return Comparison::NotComparable,
                    }
                }
                verdict
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => equal_if(a == b),
                _ => Comparison::NotComparable,
            },
        }
    }

    /// String view for regex matching. Lists have no string form.
    pub fn coerce_string(&self) -> Option<String> {
        match self {
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::List(_) => None,
        }
    }
}

fn equal_if(eq: bool) -> Comparison {
    if eq {
        Comparison::Equal
    } else {
        Comparison::Unequal
    }
}

/// What the snapshot holds for one selector.
///
/// Absence is meaningful input (the `present`/`absent` constraint kinds
/// evaluate it), distinct from a collector that failed to resolve the
/// selector at all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Observed {
    Value(Value),
    Absent,
    CollectorError { reason: String },
}

/// The expectation a rule declares, rendered for the report.
///
/// Shapes mirror the constraint kinds one-to-one so a report reader can see
/// exactly what was demanded without consulting the policy document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    Equals(Value),
    NotEquals(Value),
    InSet(Vec<Value>),
    NotInSet(Vec<Value>),
    Present,
    Absent,
    NumericRange { min: f64, max: f64 },
    RegexMatch(String),
    VersionAtLeast(String),
}
