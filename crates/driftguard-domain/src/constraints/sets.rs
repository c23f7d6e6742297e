use super::Outcome;
use driftguard_types::{Comparison, Value};

pub fn in_set(set: &[Value], observed: &Value) -> Outcome {
    match membership(set, observed) {
        Membership::Member => Outcome::Satisfied,
        Membership::NotMember => Outcome::Violated,
        Membership::Incomparable => no_comparable_member(observed),
    }
}

pub fn not_in_set(set: &[Value], observed: &Value) -> Outcome {
    match membership(set, observed) {
        Membership::Member => Outcome::Violated,
        Membership::NotMember => Outcome::Satisfied,
        Membership::Incomparable => no_comparable_member(observed),
    }
}

enum Membership {
    Member,
    NotMember,
    /// No member of the set shares a kind with the observed value, so
    /// membership cannot be decided either way.
    Incomparable,
}

fn membership(set: &[Value], observed: &Value) -> Membership {
    let mut any_comparable = false;
    for member in set {
        match observed.compare(member) {
            Comparison::Equal => return Membership::Member,
            Comparison::Unequal => any_comparable = true,
            Comparison::NotComparable => {}
        }
    }
    if any_comparable {
        Membership::NotMember
    } else {
        Membership::Incomparable
    }
}

fn no_comparable_member(observed: &Value) -> Outcome {
    Outcome::Incomparable {
        reason: format!(
            "no set member is kind-comparable with observed {}",
            observed.kind()
        ),
    }
}
