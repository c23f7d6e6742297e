use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `driftguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so
/// forward-compat is easy. Every field is optional; resolution supplies the
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DriftguardConfigV1 {
    /// Optional schema string for tooling (`driftguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Minimum severity that gates compliance: `info`, `low`, `medium`,
    /// `high`, `critical`. Defaults to `low`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_threshold: Option<String>,

    /// Dispatch alerts even when the report is compliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_notify: Option<bool>,

    /// Platform tag this host evaluates as. Defaults to the host OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Selector glob patterns whose rules are skipped outright.
    #[serde(default)]
    pub skip: Vec<String>,

    /// Per-collector time budget for fact collection, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collect_timeout_ms: Option<u64>,

    #[serde(default)]
    pub alerts: AlertsConfig,
}

/// `[alerts]` table: which sinks dispatch receives.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AlertsConfig {
    /// Human-readable summary to stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<bool>,

    /// Write the full JSON report to this path on dispatch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
