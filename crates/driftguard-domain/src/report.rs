use driftguard_types::{Finding, SeverityCounts, StatusCounts};
use time::OffsetDateTime;

/// Engine output before envelope assembly (tool metadata and generation
/// timestamps are the application layer's concern).
#[derive(Clone, Debug, PartialEq)]
pub struct DomainReport {
    pub policy_id: String,
    pub policy_version: String,
    pub snapshot_captured_at: OffsetDateTime,
    pub compliant: bool,
    pub status_counts: StatusCounts,
    pub severity_counts: SeverityCounts,
    /// Document order, one finding per rule.
    pub findings: Vec<Finding>,
}
