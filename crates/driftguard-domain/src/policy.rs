use driftguard_types::Severity;

/// Runtime knobs for one evaluation run, passed in explicitly so the engine
/// stays a pure function of its declared inputs.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Findings with status drifted/error at or above this severity make the
    /// report non-compliant.
    pub min_severity: Severity,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_severity: Severity::Low,
        }
    }
}

/// Why a rule was excluded from evaluation. Produced by the caller's skip
/// predicate; the engine records it verbatim on the skipped finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkipReason {
    /// Stable reason code (see `driftguard_types::ids`).
    pub code: &'static str,
    pub detail: String,
}

impl SkipReason {
    pub fn new(code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("{}: {}", self.code, self.detail)
    }
}
