use crate::schema::{RawExpected, RawPolicy, RawRule};
use driftguard_domain::constraints::parse_dotted;
use driftguard_domain::model::{CompiledPattern, Constraint, PolicyDocument, PolicyRule};
use driftguard_types::{ids, Severity, Value};

/// A malformed or invalid policy document. Always names the offending rule
/// when the defect is rule-level; always fatal, never partially recovered.
#[derive(Debug, thiserror::Error)]
pub enum PolicySchemaError {
    #[error("policy document is missing required field '{0}'")]
    MissingDocumentField(&'static str),

    #[error("rule {index} ({id}): {reason}")]
    Rule {
        /// Zero-based position in the document's rule list.
        index: usize,
        /// The rule's id, or `"<no id>"` when that is what's missing.
        id: String,
        reason: String,
    },

    #[error("duplicate rule id '{0}'")]
    DuplicateId(String),
}

/// Validate a raw document into an immutable [`PolicyDocument`].
///
/// Total and side-effect-free: either every rule is well-formed or an error
/// is returned and no partial document survives.
pub fn validate_policy(raw: RawPolicy) -> Result<PolicyDocument, PolicySchemaError> {
    let policy_id = raw
        .policy_id
        .ok_or(PolicySchemaError::MissingDocumentField("policy_id"))?;
    let version = raw
        .version
        .ok_or(PolicySchemaError::MissingDocumentField("version"))?;

    let mut rules = Vec::with_capacity(raw.rules.len());
    for (index, raw_rule) in raw.rules.into_iter().enumerate() {
        rules.push(validate_rule(index, raw_rule)?);
    }

    PolicyDocument::new(policy_id, version, rules)
        .map_err(|dup| PolicySchemaError::DuplicateId(dup.0))
}

fn validate_rule(index: usize, raw: RawRule) -> Result<PolicyRule, PolicySchemaError> {
    let rule_err = |id: &Option<String>, reason: String| PolicySchemaError::Rule {
        index,
        id: id.clone().unwrap_or_else(|| "<no id>".to_string()),
        reason,
    };

    let Some(id) = raw.id.clone() else {
        return Err(rule_err(&raw.id, "missing field 'id'".to_string()));
    };
    let Some(selector) = raw.selector else {
        return Err(rule_err(&raw.id, "missing field 'selector'".to_string()));
    };
    let Some(kind) = raw.kind else {
        return Err(rule_err(&raw.id, "missing field 'kind'".to_string()));
    };
    let Some(severity_raw) = raw.severity else {
        return Err(rule_err(&raw.id, "missing field 'severity'".to_string()));
    };

    let severity = parse_severity(&severity_raw)
        .ok_or_else(|| {
            rule_err(
                &raw.id,
                format!("unknown severity '{severity_raw}' (expected info|low|medium|high|critical)"),
            )
        })?;

    let constraint = build_constraint(&kind, raw.expected)
        .map_err(|reason| rule_err(&raw.id, reason))?;

    Ok(PolicyRule {
        id,
        selector,
        constraint,
        severity,
        platforms: raw.platforms,
    })
}

fn parse_severity(v: &str) -> Option<Severity> {
    match v {
        "info" => Some(Severity::Info),
        "low" => Some(Severity::Low),
        "medium" => Some(Severity::Medium),
        "high" => Some(Severity::High),
        "critical" => Some(Severity::Critical),
        _ => None,
    }
}

/// Check the expected value's shape against the constraint kind and build
/// the compiled constraint. Returns a human-readable reason on mismatch.
fn build_constraint(kind: &str, expected: Option<RawExpected>) -> Result<Constraint, String> {
    match kind {
        ids::KIND_EQUALS => Ok(Constraint::Equals(single_value(kind, expected)?)),
        ids::KIND_NOT_EQUALS => Ok(Constraint::NotEquals(single_value(kind, expected)?)),
        ids::KIND_IN_SET => Ok(Constraint::InSet(value_set(kind, expected)?)),
        ids::KIND_NOT_IN_SET => Ok(Constraint::NotInSet(value_set(kind, expected)?)),
        ids::KIND_PRESENT | ids::KIND_ABSENT => {
            if expected.is_some() {
                return Err(format!("kind '{kind}' takes no expected value"));
            }
            Ok(if kind == ids::KIND_PRESENT {
                Constraint::Present
            } else {
                Constraint::Absent
            })
        }
        ids::KIND_NUMERIC_RANGE => match expected {
            Some(RawExpected::Range { min, max }) => {
                if min > max {
                    return Err(format!(
                        "numeric_range requires min <= max (got min={min}, max={max})"
                    ));
                }
                Ok(Constraint::NumericRange { min, max })
            }
            _ => Err("kind 'numeric_range' requires an expected object {min, max}".to_string()),
        },
        ids::KIND_REGEX_MATCH => match expected {
            Some(RawExpected::Value(Value::String(pattern))) => CompiledPattern::new(&pattern)
                .map(Constraint::RegexMatch)
                .map_err(|e| format!("invalid regex pattern '{pattern}': {e}")),
            _ => Err("kind 'regex_match' requires an expected pattern string".to_string()),
        },
        ids::KIND_VERSION_AT_LEAST => match expected {
            Some(RawExpected::Value(Value::String(floor))) => {
                if parse_dotted(&floor).is_none() {
                    return Err(format!(
                        "expected version '{floor}' does not parse as a dotted numeric version"
                    ));
                }
                Ok(Constraint::VersionAtLeast(floor))
            }
            _ => Err("kind 'version_at_least' requires an expected version string".to_string()),
        },
        other => Err(format!(
            "unknown constraint kind '{other}' (expected one of: {})",
            ids::ALL_KINDS.join(", ")
        )),
    }
}

fn single_value(kind: &str, expected: Option<RawExpected>) -> Result<Value, String> {
    match expected {
        Some(RawExpected::Value(v)) => Ok(v),
        Some(RawExpected::Range { .. }) => {
            Err(format!("kind '{kind}' requires a single expected value, not a range"))
        }
        None => Err(format!("kind '{kind}' requires an expected value")),
    }
}

fn value_set(kind: &str, expected: Option<RawExpected>) -> Result<Vec<Value>, String> {
    match expected {
        Some(RawExpected::Value(Value::List(members))) => {
            if members.is_empty() {
                return Err(format!("kind '{kind}' requires a non-empty expected list"));
            }
            Ok(members)
        }
        _ => Err(format!("kind '{kind}' requires an expected list of values")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_rule(id: &str, kind: &str, expected: Option<RawExpected>) -> RawRule {
        RawRule {
            id: Some(id.to_string()),
            selector: Some("a.fact".to_string()),
            kind: Some(kind.to_string()),
            expected,
            severity: Some("medium".to_string()),
            platforms: Vec::new(),
        }
    }

    fn raw_policy(rules: Vec<RawRule>) -> RawPolicy {
        RawPolicy {
            policy_id: Some("baseline".to_string()),
            version: Some("1.0".to_string()),
            rules,
        }
    }

    #[test]
    fn valid_document_round_trips() {
        let doc = validate_policy(raw_policy(vec![
            raw_rule("r1", "equals", Some(RawExpected::Value(Value::Int(22)))),
            raw_rule("r2", "present", None),
            raw_rule("r3", "numeric_range", Some(RawExpected::Range { min: 1.0, max: 90.0 })),
        ]))
        .expect("valid");
        assert_eq!(doc.policy_id(), "baseline");
        assert_eq!(doc.rules().len(), 3);
    }

    #[test]
    fn missing_document_fields_are_fatal() {
        let err = validate_policy(RawPolicy::default()).expect_err("invalid");
        assert!(matches!(
            err,
            PolicySchemaError::MissingDocumentField("policy_id")
        ));
    }

    #[test]
    fn missing_rule_field_names_the_rule_index() {
        let mut rule = raw_rule("r1", "present", None);
        rule.selector = None;
        let err = validate_policy(raw_policy(vec![
            raw_rule("r0", "present", None),
            rule,
        ]))
        .expect_err("invalid");
        let rendered = err.to_string();
        assert!(rendered.contains("rule 1"), "{rendered}");
        assert!(rendered.contains("missing field 'selector'"), "{rendered}");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = validate_policy(raw_policy(vec![raw_rule(
            "r1",
            "approximately",
            Some(RawExpected::Value(Value::Int(1))),
        )]))
        .expect_err("invalid");
        assert!(err.to_string().contains("unknown constraint kind"));
    }

    #[test]
    fn duplicate_ids_are_rejected_before_any_evaluation() {
        let err = validate_policy(raw_policy(vec![
            raw_rule("dup", "present", None),
            raw_rule("dup", "absent", None),
        ]))
        .expect_err("invalid");
        assert!(matches!(err, PolicySchemaError::DuplicateId(ref id) if id == "dup"));
    }

    #[test]
    fn expected_shape_must_match_the_kind() {
        // range where a value is required
        let err = validate_policy(raw_policy(vec![raw_rule(
            "r1",
            "equals",
            Some(RawExpected::Range { min: 0.0, max: 1.0 }),
        )]))
        .expect_err("invalid");
        assert!(err.to_string().contains("single expected value"));

        // presence kinds take nothing
        let err = validate_policy(raw_policy(vec![raw_rule(
            "r1",
            "present",
            Some(RawExpected::Value(Value::Bool(true))),
        )]))
        .expect_err("invalid");
        assert!(err.to_string().contains("takes no expected value"));

        // empty set
        let err = validate_policy(raw_policy(vec![raw_rule(
            "r1",
            "in_set",
            Some(RawExpected::Value(Value::List(Vec::new()))),
        )]))
        .expect_err("invalid");
        assert!(err.to_string().contains("non-empty"));

        // inverted range
        let err = validate_policy(raw_policy(vec![raw_rule(
            "r1",
            "numeric_range",
            Some(RawExpected::Range { min: 9.0, max: 1.0 }),
        )]))
        .expect_err("invalid");
        assert!(err.to_string().contains("min <= max"));
    }

    #[test]
    fn bad_regex_and_bad_version_floor_are_schema_errors() {
        let err = validate_policy(raw_policy(vec![raw_rule(
            "r1",
            "regex_match",
            Some(RawExpected::Value(Value::String("(".to_string()))),
        )]))
        .expect_err("invalid");
        assert!(err.to_string().contains("invalid regex pattern"));

        let err = validate_policy(raw_policy(vec![raw_rule(
            "r1",
            "version_at_least",
            Some(RawExpected::Value(Value::String("1.2-rc1".to_string()))),
        )]))
        .expect_err("invalid");
        assert!(err.to_string().contains("dotted numeric"));
    }
}
