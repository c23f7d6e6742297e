//! Fact collection for driftguard.
//!
//! Collectors are capability implementations: a fixed trait contract with
//! independent implementations per fact source. The evaluation engine never
//! sees collectors, only the merged [`SystemSnapshot`] they produce.
//!
//! [`SystemSnapshot`]: driftguard_domain::model::SystemSnapshot

#![forbid(unsafe_code)]

mod collector;
mod file;
mod gather;

pub use collector::{CollectError, FactCollector, Facts};
pub use file::FileFactCollector;
pub use gather::gather;
