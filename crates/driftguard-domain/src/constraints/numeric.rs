use super::{incomparable, Outcome};
use driftguard_types::Value;

/// Inclusive on both bounds: min <= observed <= max.
pub fn in_range(min: f64, max: f64, observed: &Value) -> Outcome {
    let Some(n) = observed.as_number() else {
        return incomparable("number", observed);
    };
    if n >= min && n <= max {
        Outcome::Satisfied
    } else {
        Outcome::Violated
    }
}
