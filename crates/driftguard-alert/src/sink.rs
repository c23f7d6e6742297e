use camino::Utf8PathBuf;
use driftguard_types::{DriftReport, FindingStatus};
use std::io::Write;

/// A sink could not take delivery of a report. Per-sink and non-fatal: the
/// failure lands in a [`DeliveryResult`], never in the compliance verdict.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct AlertDeliveryError(pub String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed { reason: String },
}

/// One dispatch attempt's record, one per configured sink per dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveryResult {
    pub sink: String,
    pub outcome: DeliveryOutcome,
}

/// One alert destination (console, file; webhook and syslog sinks plug in
/// behind the same contract).
pub trait AlertSink: Send + Sync {
    fn name(&self) -> &str;

    fn deliver(&self, report: &DriftReport) -> Result<(), AlertDeliveryError>;
}

/// Writes a human-readable drift summary to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl AlertSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn deliver(&self, report: &DriftReport) -> Result<(), AlertDeliveryError> {
        let stderr = std::io::stderr();
        let mut out = stderr.lock();
        write_summary(&mut out, report).map_err(|e| AlertDeliveryError(e.to_string()))
    }
}

fn write_summary(out: &mut impl Write, report: &DriftReport) -> std::io::Result<()> {
    let verdict = if report.compliant { "COMPLIANT" } else { "DRIFT" };
    writeln!(
        out,
        "driftguard alert: policy '{}' -> {} ({} drifted, {} error, {} compliant, {} skipped)",
        report.policy_id,
        verdict,
        report.summary.status_counts.drifted,
        report.summary.status_counts.error,
        report.summary.status_counts.compliant,
        report.summary.status_counts.skipped,
    )?;
    for f in &report.findings {
        if matches!(f.status, FindingStatus::Drifted | FindingStatus::Error) {
            writeln!(
                out,
                "  [{:?}] {} ({}): {}",
                f.status,
                f.rule_id,
                f.selector,
                f.reason.as_deref().unwrap_or("constraint violated"),
            )?;
        }
    }
    Ok(())
}

/// Writes the full JSON report to a file, creating parent directories.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: Utf8PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AlertSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn deliver(&self, report: &DriftReport) -> Result<(), AlertDeliveryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AlertDeliveryError(format!("create '{parent}': {e}")))?;
        }
        let json = serde_json::to_vec_pretty(report)
            .map_err(|e| AlertDeliveryError(format!("serialize report: {e}")))?;
        std::fs::write(&self.path, json)
            .map_err(|e| AlertDeliveryError(format!("write '{}': {e}", self.path)))
    }
}
