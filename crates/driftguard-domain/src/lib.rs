//! Pure policy drift evaluation (no IO).
//!
//! Input: a validated policy document and a fact snapshot constructed
//! elsewhere. Output: findings in document order + compliance verdict +
//! summary counts. Evaluation is a deterministic function of its inputs;
//! identical inputs always produce an identical report.

#![forbid(unsafe_code)]

pub mod constraints;
pub mod model;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

pub use engine::{evaluate, is_compliant};
pub use fingerprint::fingerprint_for_rule;

#[cfg(test)]
mod proptests;
#[cfg(test)]
pub(crate) mod test_support;
