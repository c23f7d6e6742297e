//! Per-kind constraint semantics.
//!
//! Each family module is a pure function from (constraint, observed value)
//! to an [`Outcome`]; the dispatch here folds in the cases that apply to
//! every kind (collector errors, missing facts).

use crate::model::{Constraint, PolicyRule};
use driftguard_types::{ids, FindingStatus, Observed, Value};

mod equality;
mod numeric;
mod pattern;
mod presence;
mod sets;
mod version;

pub use version::parse_dotted;


/// Verdict of one constraint against one comparable value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Satisfied,
    Violated,
    /// No verdict is possible; the reason says why.
    Incomparable { reason: String },
}

/// Terminal result for one rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleOutcome {
    pub status: FindingStatus,
    pub reason: Option<String>,
}

impl RuleOutcome {
    fn compliant() -> Self {
        Self {
            status: FindingStatus::Compliant,
            reason: None,
        }
    }

    fn drifted() -> Self {
        Self {
            status: FindingStatus::Drifted,
            reason: None,
        }
    }

    fn error(reason: String) -> Self {
        Self {
            status: FindingStatus::Error,
            reason: Some(reason),
        }
    }
}

/// Evaluate one rule against its snapshot cell.
///
/// Absence is meaningful input for `present`/`absent`; for every other kind
/// it means the precondition could not be checked. A collector-error marker
/// trumps all kinds: nothing was observed, so nothing can be concluded.
pub fn evaluate_rule(rule: &PolicyRule, observed: &Observed) -> RuleOutcome {
    let value = match observed {
        Observed::CollectorError { reason } => {
            return RuleOutcome::error(format!("{}: {reason}", ids::CODE_COLLECTOR_ERROR));
        }
        Observed::Absent => {
            if let Constraint::Present | Constraint::Absent = rule.constraint {
                let expect_present = matches!(rule.constraint, Constraint::Present);
                return from_outcome(presence::evaluate(expect_present, observed));
            }
            return RuleOutcome::error(format!(
                "{}: selector '{}' not present in snapshot",
                ids::CODE_MISSING_FACT,
                rule.selector
            ));
        }
        Observed::Value(v) => v,
    };

    let outcome = match &rule.constraint {
        Constraint::Present => presence::evaluate(true, observed),
        Constraint::Absent => presence::evaluate(false, observed),
        Constraint::Equals(expected) => equality::equals(expected, value),
        Constraint::NotEquals(expected) => equality::not_equals(expected, value),
        Constraint::InSet(set) => sets::in_set(set, value),
        Constraint::NotInSet(set) => sets::not_in_set(set, value),
        Constraint::NumericRange { min, max } => numeric::in_range(*min, *max, value),
        Constraint::RegexMatch(p) => pattern::matches(p, value),
        Constraint::VersionAtLeast(floor) => version::at_least(floor, value),
    };
    from_outcome(outcome)
}

fn from_outcome(outcome: Outcome) -> RuleOutcome {
    match outcome {
        Outcome::Satisfied => RuleOutcome::compliant(),
        Outcome::Violated => RuleOutcome::drifted(),
        Outcome::Incomparable { reason } => {
            RuleOutcome::error(format!("{}: {reason}", ids::CODE_NOT_COMPARABLE))
        }
    }
}

fn incomparable(expected: &str, observed: &Value) -> Outcome {
    Outcome::Incomparable {
        reason: format!("expected {expected}, observed {}", observed.kind()),
    }
}
