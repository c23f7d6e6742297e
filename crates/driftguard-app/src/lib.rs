//! Use case orchestration for driftguard.
//!
//! This crate provides the application layer: use cases that coordinate the
//! policy, collect, domain, and alert layers. It is intentionally thin and
//! delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;

pub use check::{alert_sinks, report_exit_code, run_check, CheckInput, CheckOutput, EXIT_FATAL};
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use render::{render_markdown, render_summary, serialize_report, write_report, write_text};
