use crate::model::DriftguardConfigV1;
use anyhow::Context;
use driftguard_domain::model::PolicyRule;
use driftguard_domain::policy::{EngineConfig, SkipReason};
use driftguard_types::{ids, Severity};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::time::Duration;

const DEFAULT_COLLECT_TIMEOUT_MS: u64 = 5_000;

/// CLI-provided values that win over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub threshold: Option<String>,
    pub platform: Option<String>,
    pub always_notify: Option<bool>,
}

/// Everything downstream construction needs, fully parsed and validated.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub engine: EngineConfig,
    pub skip: SkipRules,
    pub always_notify: bool,
    pub console_alert: bool,
    pub alert_file: Option<String>,
    pub collect_timeout: Duration,
}

/// Compiled skip predicate sources: the host platform tag plus selector
/// glob patterns.
#[derive(Clone, Debug)]
pub struct SkipRules {
    platform: String,
    patterns: GlobSet,
    raw_patterns: Vec<String>,
}

impl SkipRules {
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Decide whether a rule is excluded from this run. Platform exclusion
    /// is checked before selector globs, so a rule hit by both reports the
    /// platform reason.
    pub fn reason_for(&self, rule: &PolicyRule) -> Option<SkipReason> {
        if !rule.platforms.is_empty() && !rule.platforms.iter().any(|p| p == &self.platform) {
            return Some(SkipReason::new(
                ids::CODE_PLATFORM_EXCLUDED,
                format!(
                    "rule targets [{}], host platform is '{}'",
                    rule.platforms.join(", "),
                    self.platform
                ),
            ));
        }
        if let Some(&idx) = self.patterns.matches(&rule.selector).first() {
            let matched = self.raw_patterns[idx].as_str();
            return Some(SkipReason::new(
                ids::CODE_SELECTOR_SKIPPED,
                format!("selector '{}' matches skip pattern '{}'", rule.selector, matched),
            ));
        }
        None
    }
}

pub fn parse_config_toml(text: &str) -> anyhow::Result<DriftguardConfigV1> {
    toml::from_str(text).context("parse driftguard.toml")
}

pub fn resolve_config(
    cfg: DriftguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let threshold_s = overrides
        .threshold
        .or(cfg.severity_threshold)
        .unwrap_or_else(|| "low".to_string());
    let min_severity = parse_severity(&threshold_s)?;

    let platform = overrides
        .platform
        .or(cfg.platform)
        .unwrap_or_else(|| std::env::consts::OS.to_string());

    let always_notify = overrides
        .always_notify
        .or(cfg.always_notify)
        .unwrap_or(false);

    let patterns = build_globset(&cfg.skip)?;

    let collect_timeout =
        Duration::from_millis(cfg.collect_timeout_ms.unwrap_or(DEFAULT_COLLECT_TIMEOUT_MS));

    Ok(ResolvedConfig {
        engine: EngineConfig { min_severity },
        skip: SkipRules {
            platform,
            patterns,
            raw_patterns: cfg.skip,
        },
        always_notify,
        console_alert: cfg.alerts.console.unwrap_or(true),
        alert_file: cfg.alerts.file,
        collect_timeout,
    })
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid skip glob: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("compile skip globs")
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "low" => Ok(Severity::Low),
        "medium" => Ok(Severity::Medium),
        "high" => Ok(Severity::High),
        "critical" => Ok(Severity::Critical),
        other => anyhow::bail!("unknown severity: {other} (expected info|low|medium|high|critical)"),
    }
}
