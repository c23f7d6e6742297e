use driftguard_types::Observed;
use std::collections::BTreeMap;

/// Partial snapshot contents: selector path to observation cell.
pub type Facts = BTreeMap<String, Observed>;

/// A collector failed wholesale (as opposed to individual selectors it
/// could not resolve, which it records as `Observed::CollectorError` cells).
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("collector '{collector}' failed: {reason}")]
pub struct CollectError {
    pub collector: String,
    pub reason: String,
}

impl CollectError {
    pub fn new(collector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            collector: collector.into(),
            reason: reason.into(),
        }
    }
}

/// One fact source (filesystem, process table, network, a facts file).
///
/// Implementations run on worker threads; a collector that fails or misses
/// the merge deadline degrades only the selectors it covers, never the run.
pub trait FactCollector: Send {
    fn name(&self) -> &str;

    /// Whether this collector is responsible for the given selector. Used to
    /// scope error markers when the collector fails or times out.
    fn covers(&self, selector: &str) -> bool {
        let _ = selector;
        true
    }

    fn collect(&self) -> Result<Facts, CollectError>;
}
