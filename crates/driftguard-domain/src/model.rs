use driftguard_types::{ids, Expected, Observed, Severity, Value};
use regex::Regex;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// One declarative constraint against a fact selector.
#[derive(Clone, Debug)]
pub struct PolicyRule {
    /// Unique within the document.
    pub id: String,
    /// Dotted fact path, e.g. `process.sshd.running`.
    pub selector: String,
    pub constraint: Constraint,
    pub severity: Severity,
    /// Platform tags this rule applies to. Empty means every platform.
    pub platforms: Vec<String>,
}

/// A validated policy document. Immutable once constructed; rule order is
/// the report order.
#[derive(Clone, Debug)]
pub struct PolicyDocument {
    policy_id: String,
    version: String,
    rules: Vec<PolicyRule>,
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("duplicate rule id '{0}'")]
pub struct DuplicateRuleId(pub String);

impl PolicyDocument {
    /// Construct a document, enforcing rule-id uniqueness. Shape validation
    /// of each rule happens upstream in the policy loader; this is the last
    /// invariant only the assembled document can check.
    pub fn new(
        policy_id: impl Into<String>,
        version: impl Into<String>,
        rules: Vec<PolicyRule>,
    ) -> Result<Self, DuplicateRuleId> {
        let mut seen = std::collections::BTreeSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(DuplicateRuleId(rule.id.clone()));
            }
        }
        Ok(Self {
            policy_id: policy_id.into(),
            version: version.into(),
            rules,
        })
    }

    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }
}

/// The comparison semantics a rule applies.
#[derive(Clone, Debug)]
pub enum Constraint {
    Equals(Value),
    NotEquals(Value),
    InSet(Vec<Value>),
    NotInSet(Vec<Value>),
    Present,
    Absent,
    /// Inclusive on both bounds.
    NumericRange { min: f64, max: f64 },
    RegexMatch(CompiledPattern),
    VersionAtLeast(String),
}

impl Constraint {
    /// Stable kind name, matching the policy schema's `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Equals(_) => ids::KIND_EQUALS,
            Constraint::NotEquals(_) => ids::KIND_NOT_EQUALS,
            Constraint::InSet(_) => ids::KIND_IN_SET,
            Constraint::NotInSet(_) => ids::KIND_NOT_IN_SET,
            Constraint::Present => ids::KIND_PRESENT,
            Constraint::Absent => ids::KIND_ABSENT,
            Constraint::NumericRange { .. } => ids::KIND_NUMERIC_RANGE,
            Constraint::RegexMatch(_) => ids::KIND_REGEX_MATCH,
            Constraint::VersionAtLeast(_) => ids::KIND_VERSION_AT_LEAST,
        }
    }

    /// Rendered expectation for the report.
    pub fn expected(&self) -> Expected {
        match self {
            Constraint::Equals(v) => Expected::Equals(v.clone()),
            Constraint::NotEquals(v) => Expected::NotEquals(v.clone()),
            Constraint::InSet(vs) => Expected::InSet(vs.clone()),
            Constraint::NotInSet(vs) => Expected::NotInSet(vs.clone()),
            Constraint::Present => Expected::Present,
            Constraint::Absent => Expected::Absent,
            Constraint::NumericRange { min, max } => Expected::NumericRange {
                min: *min,
                max: *max,
            },
            Constraint::RegexMatch(p) => Expected::RegexMatch(p.raw().to_string()),
            Constraint::VersionAtLeast(v) => Expected::VersionAtLeast(v.clone()),
        }
    }
}

/// A regex pattern compiled at document-validation time.
///
/// Matching is anchored at both ends unless the author's pattern already
/// starts with `^` or ends with `$`.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    raw: String,
    regex: Regex,
}

impl CompiledPattern {
    pub fn new(raw: &str) -> Result<Self, regex::Error> {
        let anchored = if raw.starts_with('^') || raw.ends_with('$') {
            raw.to_string()
        } else {
            format!("^(?:{raw})$")
        };
        Ok(Self {
            raw: raw.to_string(),
            regex: Regex::new(&anchored)?,
        })
    }

    /// The pattern as the policy author wrote it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// The collected, timestamped set of observed facts for one run.
///
/// A selector missing from the map reads as [`Observed::Absent`]; collectors
/// record explicit `CollectorError` markers for selectors they failed to
/// resolve.
#[derive(Clone, Debug)]
pub struct SystemSnapshot {
    facts: BTreeMap<String, Observed>,
    captured_at: OffsetDateTime,
}

impl SystemSnapshot {
    pub fn new(captured_at: OffsetDateTime, facts: BTreeMap<String, Observed>) -> Self {
        Self { facts, captured_at }
    }

    pub fn captured_at(&self) -> OffsetDateTime {
        self.captured_at
    }

    pub fn facts(&self) -> &BTreeMap<String, Observed> {
        &self.facts
    }

    /// Resolve one selector. Absence of the key is itself the answer.
    pub fn lookup(&self, selector: &str) -> Observed {
        self.facts
            .get(selector)
            .cloned()
            .unwrap_or(Observed::Absent)
    }

    /// Number of selectors that resolved to a value or an explicit absence
    /// (i.e. facts actually obtained, as opposed to collector failures).
    pub fn resolved_facts(&self) -> usize {
        self.facts
            .values()
            .filter(|o| !matches!(o, Observed::CollectorError { .. }))
            .count()
    }
}
