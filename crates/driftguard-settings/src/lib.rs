//! Runtime configuration for driftguard.
//!
//! `driftguard.toml` is the user-facing model; resolution folds in CLI
//! overrides and produces the explicit inputs the engine and dispatcher are
//! constructed with. Nothing here is ambient global state.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{AlertsConfig, DriftguardConfigV1};
pub use resolve::{parse_config_toml, resolve_config, Overrides, ResolvedConfig, SkipRules};
