use super::Outcome;
use driftguard_types::{Comparison, Value};

pub fn equals(expected: &Value, observed: &Value) -> Outcome {
    match observed.compare(expected) {
        Comparison::Equal => Outcome::Satisfied,
        Comparison::Unequal => Outcome::Violated,
        Comparison::NotComparable => mismatch(expected, observed),
    }
}

pub fn not_equals(expected: &Value, observed: &Value) -> Outcome {
    match observed.compare(expected) {
        Comparison::Equal => Outcome::Violated,
        Comparison::Unequal => Outcome::Satisfied,
        // Symmetric with equals: incomparable kinds never count as "different".
        Comparison::NotComparable => mismatch(expected, observed),
    }
}

fn mismatch(expected: &Value, observed: &Value) -> Outcome {
    Outcome::Incomparable {
        reason: format!(
            "expected {}, observed {}",
            expected.kind(),
            observed.kind()
        ),
    }
}
