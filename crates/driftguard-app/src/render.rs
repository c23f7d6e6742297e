//! Report output: markdown, terminal summary, and file writing.

use anyhow::Context;
use camino::Utf8Path;
use driftguard_types::{DriftReport, FindingStatus};

pub fn render_markdown(report: &DriftReport) -> String {
    let mut out = String::new();

    out.push_str("# Driftguard report\n\n");
    let verdict = if report.compliant { "COMPLIANT" } else { "DRIFT" };
    out.push_str(&format!(
        "- Policy: `{}` (version {})\n- Verdict: **{}**\n- Rules: {} compliant, {} drifted, {} error, {} skipped\n\n",
        report.policy_id,
        report.policy_version,
        verdict,
        report.summary.status_counts.compliant,
        report.summary.status_counts.drifted,
        report.summary.status_counts.error,
        report.summary.status_counts.skipped,
    ));

    if report.findings.is_empty() {
        out.push_str("No rules evaluated.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    for f in &report.findings {
        let status = match f.status {
            FindingStatus::Compliant => "OK",
            FindingStatus::Drifted => "DRIFT",
            FindingStatus::Error => "ERROR",
            FindingStatus::Skipped => "SKIP",
        };
        out.push_str(&format!(
            "- [{}] `{}` / `{}` ({:?})\n",
            status, f.rule_id, f.selector, f.severity
        ));
        if let Some(reason) = &f.reason {
            out.push_str(&format!("  - reason: {}\n", reason));
        }
    }

    out
}

/// One-paragraph terminal summary printed after every check.
pub fn render_summary(report: &DriftReport) -> String {
    let verdict = if report.compliant { "COMPLIANT" } else { "DRIFT" };
    let counts = &report.summary.status_counts;
    let mut out = format!(
        "policy '{}' (version {}): {} ({} compliant, {} drifted, {} error, {} skipped)\n",
        report.policy_id,
        report.policy_version,
        verdict,
        counts.compliant,
        counts.drifted,
        counts.error,
        counts.skipped,
    );
    for f in &report.findings {
        if matches!(f.status, FindingStatus::Drifted | FindingStatus::Error) {
            out.push_str(&format!(
                "  {:?}: {} ({}): {}\n",
                f.status,
                f.rule_id,
                f.selector,
                f.reason.as_deref().unwrap_or("constraint violated"),
            ));
        }
    }
    out
}

pub fn serialize_report(report: &DriftReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn write_report(path: &Utf8Path, report: &DriftReport) -> anyhow::Result<()> {
    let bytes = serialize_report(report)?;
    write_bytes(path, &bytes)
}

pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes(path, text.as_bytes())
}

fn write_bytes(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create '{parent}'"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{path}'"))
}
