//! Shared builders for domain tests.

use crate::model::{Constraint, PolicyDocument, PolicyRule, SystemSnapshot};
use crate::policy::SkipReason;
use driftguard_types::{Observed, Severity, Value};
use std::collections::BTreeMap;
use time::macros::datetime;

pub fn rule(id: &str, selector: &str, constraint: Constraint, severity: Severity) -> PolicyRule {
    PolicyRule {
        id: id.to_string(),
        selector: selector.to_string(),
        constraint,
        severity,
        platforms: Vec::new(),
    }
}

pub fn doc(rules: Vec<PolicyRule>) -> PolicyDocument {
    PolicyDocument::new("test-policy", "1.0.0", rules).expect("valid document")
}

pub fn snapshot(entries: Vec<(String, Observed)>) -> SystemSnapshot {
    let facts: BTreeMap<String, Observed> = entries.into_iter().collect();
    SystemSnapshot::new(datetime!(2026-01-15 12:00 UTC), facts)
}

pub fn value_fact(selector: &str, value: Value) -> (String, Observed) {
    (selector.to_string(), Observed::Value(value))
}

pub fn no_skip(_rule: &PolicyRule) -> Option<SkipReason> {
    None
}
