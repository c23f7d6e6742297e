//! Policy document loading for driftguard.
//!
//! Reads YAML or JSON policy files into a permissive raw schema, then
//! validates totally into a `PolicyDocument`: either every rule is
//! well-formed or the whole document is rejected with an error naming the
//! offending rule. No partially-valid document ever reaches the engine.

#![forbid(unsafe_code)]

mod load;
mod schema;
mod validate;

pub use load::{load_policy, parse_policy_str, PolicyFormat, PolicyLoadError};
pub use schema::{RawExpected, RawPolicy, RawRule};
pub use validate::{validate_policy, PolicySchemaError};
