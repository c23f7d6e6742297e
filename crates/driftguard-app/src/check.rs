//! The `check` use case: load policy, collect facts, evaluate, report.

use anyhow::Context;
use camino::Utf8Path;
use driftguard_alert::{AlertSink, ConsoleSink, FileSink};
use driftguard_collect::{gather, FactCollector, FileFactCollector};
use driftguard_settings::{Overrides, ResolvedConfig};
use driftguard_types::{DriftReport, Observed, ReportSummary, ToolMeta, SCHEMA_REPORT_V1};
use time::OffsetDateTime;

/// Process exit code for failures of the tool itself: unreadable or invalid
/// policy, total collector failure. Distinct from drift, which exits 1.
pub const EXIT_FATAL: i32 = 2;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Policy document path (.yaml, .yml, or .json).
    pub policy_path: &'a Utf8Path,
    /// Facts file path backing the file collector.
    pub facts_path: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: DriftReport,
    /// The resolved configuration used.
    pub resolved: ResolvedConfig,
}

/// Run the check use case: resolve config, load policy, gather a snapshot,
/// evaluate every rule, and assemble the report envelope.
///
/// An `Err` here is a fatal run failure (exit 2 territory); drift and
/// evaluation errors land in the report instead.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        driftguard_settings::DriftguardConfigV1::default()
    } else {
        driftguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        driftguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let document = driftguard_policy::load_policy(input.policy_path).context("load policy")?;
    tracing::debug!(
        policy_id = document.policy_id(),
        rules = document.rules().len(),
        "policy loaded"
    );

    let selectors: Vec<String> = document
        .rules()
        .iter()
        .map(|r| r.selector.clone())
        .collect();
    let collectors: Vec<Box<dyn FactCollector>> =
        vec![Box::new(FileFactCollector::new(input.facts_path.to_owned()))];
    let snapshot = gather(collectors, &selectors, resolved.collect_timeout);

    // A snapshot of nothing but error markers means no fact source worked at
    // all; a report evaluated against it would be noise.
    let total_failure = snapshot.resolved_facts() == 0
        && snapshot
            .facts()
            .values()
            .any(|o| matches!(o, Observed::CollectorError { .. }));
    if total_failure {
        let reason = snapshot
            .facts()
            .values()
            .find_map(|o| match o {
                Observed::CollectorError { reason } => Some(reason.clone()),
                _ => None,
            })
            .unwrap_or_default();
        anyhow::bail!("fact collection failed entirely: {reason}");
    }

    let domain = driftguard_domain::evaluate(&document, &snapshot, &resolved.engine, |rule| {
        resolved.skip.reason_for(rule)
    });

    let report = DriftReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "driftguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        policy_id: domain.policy_id,
        policy_version: domain.policy_version,
        snapshot_timestamp: domain.snapshot_captured_at,
        generated_at: OffsetDateTime::now_utc(),
        compliant: domain.compliant,
        summary: ReportSummary {
            status_counts: domain.status_counts,
            severity_counts: domain.severity_counts,
        },
        findings: domain.findings,
    };

    Ok(CheckOutput { report, resolved })
}

/// Map a report to the process exit code: 0 = compliant, 1 = drift.
pub fn report_exit_code(report: &DriftReport) -> i32 {
    if report.compliant { 0 } else { 1 }
}

/// Build the sink list dispatch receives, from resolved config plus an
/// optional extra file destination from the command line.
pub fn alert_sinks(resolved: &ResolvedConfig, extra_file: Option<&str>) -> Vec<Box<dyn AlertSink>> {
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
    if resolved.console_alert {
        sinks.push(Box::new(ConsoleSink));
    }
    if let Some(path) = resolved.alert_file.as_deref() {
        sinks.push(Box::new(FileSink::new(path)));
    }
    if let Some(path) = extra_file {
        sinks.push(Box::new(FileSink::new(path)));
    }
    sinks
}
