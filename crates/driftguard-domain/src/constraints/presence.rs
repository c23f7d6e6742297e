use super::Outcome;
use driftguard_types::Observed;

/// `present`/`absent` are the only kinds for which an absent selector is a
/// verdict rather than an error. Collector-error markers never reach here;
/// the dispatcher short-circuits them for every kind.
pub fn evaluate(expect_present: bool, observed: &Observed) -> Outcome {
    let is_present = matches!(observed, Observed::Value(_));
    if is_present == expect_present {
        Outcome::Satisfied
    } else {
        Outcome::Violated
    }
}
