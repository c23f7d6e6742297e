use crate::value::{Expected, Observed};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for driftguard reports.
pub const SCHEMA_REPORT_V1: &str = "driftguard.report.v1";

/// Rule severity, ordered: a compliance threshold at `low` gates everything
/// except `info`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// Terminal evaluation status for one rule.
///
/// Every rule reaches exactly one of these per run; there is no partial or
/// retried state in a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    /// Constraint satisfied.
    Compliant,
    /// Constraint violated with both sides comparable.
    Drifted,
    /// Could not be evaluated: missing fact, incomparable kinds, or a
    /// collector failure.
    Error,
    /// Excluded by runtime configuration (platform tag or skip pattern).
    Skipped,
}

/// Per-rule evaluation result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub rule_id: String,
    pub selector: String,
    pub expected: Expected,
    pub observed: Observed,
    pub status: FindingStatus,
    pub severity: Severity,

    /// Why the rule could not be evaluated or was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Stable identifier intended for dedup and trending across runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCounts {
    pub compliant: u32,
    pub drifted: u32,
    pub error: u32,
    pub skipped: u32,
}

impl StatusCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = StatusCounts::default();
        for f in findings {
            match f.status {
                FindingStatus::Compliant => counts.compliant += 1,
                FindingStatus::Drifted => counts.drifted += 1,
                FindingStatus::Error => counts.error += 1,
                FindingStatus::Skipped => counts.skipped += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SeverityCounts {
    pub info: u32,
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl SeverityCounts {
    /// Counts severities of findings that are actionable (drifted or error);
    /// compliant and skipped rules do not inflate the tally.
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            if !matches!(f.status, FindingStatus::Drifted | FindingStatus::Error) {
                continue;
            }
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Low => counts.low += 1,
                Severity::Medium => counts.medium += 1,
                Severity::High => counts.high += 1,
                Severity::Critical => counts.critical += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportSummary {
    pub status_counts: StatusCounts,
    pub severity_counts: SeverityCounts,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// The emitted drift report.
///
/// Findings appear in policy document order; consumers (CI logs, run-to-run
/// diffs) rely on that ordering being stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DriftReport {
    /// Versioned schema identifier for the report shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub policy_id: String,
    pub policy_version: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub snapshot_timestamp: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub compliant: bool,
    pub summary: ReportSummary,
    pub findings: Vec<Finding>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Expected;

    fn finding(status: FindingStatus, severity: Severity) -> Finding {
        Finding {
            rule_id: "r1".to_string(),
            selector: "process.sshd.running".to_string(),
            expected: Expected::Present,
            observed: Observed::Absent,
            status,
            severity,
            reason: None,
            fingerprint: None,
        }
    }

    #[test]
    fn severity_ordering_matches_threshold_semantics() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn status_counts_cover_every_status() {
        let findings = vec![
            finding(FindingStatus::Compliant, Severity::Low),
            finding(FindingStatus::Drifted, Severity::High),
            finding(FindingStatus::Drifted, Severity::High),
            finding(FindingStatus::Error, Severity::Medium),
            finding(FindingStatus::Skipped, Severity::Critical),
        ];
        let counts = StatusCounts::from_findings(&findings);
        assert_eq!(counts.compliant, 1);
        assert_eq!(counts.drifted, 2);
        assert_eq!(counts.error, 1);
        assert_eq!(counts.skipped, 1);
    }

    #[test]
    fn severity_counts_only_tally_actionable_findings() {
        let findings = vec![
            finding(FindingStatus::Compliant, Severity::Critical),
            finding(FindingStatus::Skipped, Severity::Critical),
            finding(FindingStatus::Drifted, Severity::High),
            finding(FindingStatus::Error, Severity::Info),
        ];
        let counts = SeverityCounts::from_findings(&findings);
        assert_eq!(counts.critical, 0);
        assert_eq!(counts.high, 1);
        assert_eq!(counts.info, 1);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).expect("serialize"),
            "\"critical\""
        );
        assert_eq!(
            serde_json::to_string(&FindingStatus::Drifted).expect("serialize"),
            "\"drifted\""
        );
    }
}
