use crate::constraints;
use crate::fingerprint::fingerprint_for_rule;
use crate::model::{PolicyDocument, PolicyRule, SystemSnapshot};
use crate::policy::{EngineConfig, SkipReason};
use crate::report::DomainReport;
use driftguard_types::{Finding, FindingStatus, Severity, SeverityCounts, StatusCounts};

/// Evaluate every rule of the document against the snapshot, in document
/// order, each exactly once and independently of the others.
///
/// The skip predicate decides per rule whether runtime configuration
/// excludes it (platform tags, skip patterns); skipped rules still produce a
/// finding so the report accounts for the whole document.
pub fn evaluate<F>(
    document: &PolicyDocument,
    snapshot: &SystemSnapshot,
    cfg: &EngineConfig,
    skip: F,
) -> DomainReport
where
    F: Fn(&PolicyRule) -> Option<SkipReason>,
{
    let mut findings: Vec<Finding> = Vec::with_capacity(document.rules().len());

    for rule in document.rules() {
        let observed = snapshot.lookup(&rule.selector);

        let (status, reason) = match skip(rule) {
            Some(skip_reason) => (FindingStatus::Skipped, Some(skip_reason.render())),
            None => {
                let outcome = constraints::evaluate_rule(rule, &observed);
                (outcome.status, outcome.reason)
            }
        };

        findings.push(Finding {
            rule_id: rule.id.clone(),
            selector: rule.selector.clone(),
            expected: rule.constraint.expected(),
            observed,
            status,
            severity: rule.severity,
            reason,
            fingerprint: Some(fingerprint_for_rule(
                document.policy_id(),
                &rule.id,
                &rule.selector,
                rule.constraint.kind(),
            )),
        });
    }

    let status_counts = StatusCounts::from_findings(&findings);
    let severity_counts = SeverityCounts::from_findings(&findings);
    let compliant = is_compliant(&findings, cfg.min_severity);

    DomainReport {
        policy_id: document.policy_id().to_string(),
        policy_version: document.version().to_string(),
        snapshot_captured_at: snapshot.captured_at(),
        compliant,
        status_counts,
        severity_counts,
        findings,
    }
}

/// Compliant iff no finding is drifted or errored at or above the threshold.
/// Skipped findings never gate compliance.
pub fn is_compliant(findings: &[Finding], min_severity: Severity) -> bool {
    !findings.iter().any(|f| {
        matches!(f.status, FindingStatus::Drifted | FindingStatus::Error)
            && f.severity >= min_severity
    })
}
