//! Alert dispatch for driftguard.
//!
//! Sinks are capability implementations of one fixed contract:
//! `deliver(&DriftReport)`. Dispatch attempts every configured sink
//! independently; a failing sink never blocks the others and never alters
//! the report or the compliance verdict.

#![forbid(unsafe_code)]

mod dispatch;
mod sink;

pub use dispatch::{dispatch_all, should_dispatch, AlertMode};
pub use sink::{AlertDeliveryError, AlertSink, ConsoleSink, DeliveryOutcome, DeliveryResult, FileSink};
