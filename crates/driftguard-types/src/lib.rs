//! Stable DTOs and IDs used across the driftguard workspace.
//!
//! This crate is intentionally boring:
//! - the tagged fact value and per-selector observation cell
//! - data types for the emitted drift report
//! - stable string IDs for constraint kinds and finding codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod report;
pub mod value;

pub use explain::{Explanation, lookup_explanation};
pub use report::{
    DriftReport, Finding, FindingStatus, ReportSummary, Severity, SeverityCounts, StatusCounts,
    ToolMeta, SCHEMA_REPORT_V1,
};
pub use value::{Comparison, Expected, Observed, Value};
