//! Property-based tests for the evaluation engine.
//!
//! Verifies the report-shape invariants that consumers rely on:
//! - evaluation is deterministic (identical inputs, identical report)
//! - finding order always matches document order
//! - every rule yields exactly one terminal finding

use crate::engine::evaluate;
use crate::model::{Constraint, PolicyDocument, PolicyRule, SystemSnapshot};
use crate::policy::EngineConfig;
use crate::test_support::no_skip;
use driftguard_types::{Observed, Severity, Value};
use proptest::prelude::*;
use std::collections::BTreeMap;
use time::macros::datetime;

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::Int),
        (-1000.0f64..1000.0).prop_map(Value::Float),
        "[a-z0-9.]{0,12}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => arb_scalar(),
        1 => prop::collection::vec(arb_scalar(), 0..4).prop_map(Value::List),
    ]
}

fn arb_constraint() -> impl Strategy<Value = Constraint> {
    prop_oneof![
        arb_value().prop_map(Constraint::Equals),
        arb_value().prop_map(Constraint::NotEquals),
        prop::collection::vec(arb_value(), 1..4).prop_map(Constraint::InSet),
        prop::collection::vec(arb_value(), 1..4).prop_map(Constraint::NotInSet),
        Just(Constraint::Present),
        Just(Constraint::Absent),
        (-100.0f64..100.0, 0.0f64..100.0).prop_map(|(min, span)| Constraint::NumericRange {
            min,
            max: min + span,
        }),
        (1u64..20, 0u64..20).prop_map(|(a, b)| Constraint::VersionAtLeast(format!("{a}.{b}"))),
    ]
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

fn arb_observed() -> impl Strategy<Value = Observed> {
    prop_oneof![
        4 => arb_value().prop_map(Observed::Value),
        1 => Just(Observed::Absent),
        1 => "[a-z ]{1,16}".prop_map(|reason| Observed::CollectorError { reason }),
    ]
}

prop_compose! {
    fn arb_document_and_snapshot()(
        entries in prop::collection::vec((arb_constraint(), arb_severity(), arb_observed()), 0..12)
    ) -> (PolicyDocument, SystemSnapshot) {
        let mut rules = Vec::with_capacity(entries.len());
        let mut facts = BTreeMap::new();
        for (i, (constraint, severity, observed)) in entries.into_iter().enumerate() {
            let selector = format!("fact.path.{i}");
            // Leave every third selector out of the snapshot entirely so the
            // missing-key path is exercised alongside explicit cells.
            if i % 3 != 0 {
                facts.insert(selector.clone(), observed);
            }
            rules.push(PolicyRule {
                id: format!("rule-{i}"),
                selector,
                constraint,
                severity,
                platforms: Vec::new(),
            });
        }
        let document = PolicyDocument::new("prop-policy", "1.0.0", rules).expect("unique ids");
        let snapshot = SystemSnapshot::new(datetime!(2026-01-15 12:00 UTC), facts);
        (document, snapshot)
    }
}

proptest! {
    #[test]
    fn evaluation_is_deterministic((document, snapshot) in arb_document_and_snapshot()) {
        let cfg = EngineConfig::default();
        let first = evaluate(&document, &snapshot, &cfg, no_skip);
        let second = evaluate(&document, &snapshot, &cfg, no_skip);
        prop_assert_eq!(&first, &second);

        let a = serde_json::to_string(&first.findings).expect("serialize");
        let b = serde_json::to_string(&second.findings).expect("serialize");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn finding_order_matches_document_order((document, snapshot) in arb_document_and_snapshot()) {
        let report = evaluate(&document, &snapshot, &EngineConfig::default(), no_skip);
        prop_assert_eq!(report.findings.len(), document.rules().len());
        for (finding, rule) in report.findings.iter().zip(document.rules()) {
            prop_assert_eq!(&finding.rule_id, &rule.id);
            prop_assert_eq!(&finding.selector, &rule.selector);
        }
    }

    #[test]
    fn verdict_agrees_with_findings((document, snapshot) in arb_document_and_snapshot()) {
        let cfg = EngineConfig { min_severity: Severity::Info };
        let report = evaluate(&document, &snapshot, &cfg, no_skip);
        let any_actionable = report.findings.iter().any(|f| {
            matches!(
                f.status,
                driftguard_types::FindingStatus::Drifted | driftguard_types::FindingStatus::Error
            )
        });
        prop_assert_eq!(report.compliant, !any_actionable);
    }
}
