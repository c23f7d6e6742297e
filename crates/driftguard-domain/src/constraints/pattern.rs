use super::{incomparable, Outcome};
use crate::model::CompiledPattern;
use driftguard_types::Value;

/// Scalars are coerced to their string form; lists have none.
pub fn matches(pattern: &CompiledPattern, observed: &Value) -> Outcome {
    let Some(text) = observed.coerce_string() else {
        return incomparable("string-coercible value", observed);
    };
    if pattern.is_match(&text) {
        Outcome::Satisfied
    } else {
        Outcome::Violated
    }
}
