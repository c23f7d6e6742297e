use driftguard_types::Value;
use serde::Deserialize;

/// Raw policy document schema, shared by the YAML and JSON forms.
///
/// This is a *user-facing* model: every field is optional here so that
/// validation can report "rule 3 is missing 'selector'" instead of a bare
/// deserializer error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPolicy {
    #[serde(default)]
    pub policy_id: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub rules: Vec<RawRule>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawRule {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub selector: Option<String>,

    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub expected: Option<RawExpected>,

    #[serde(default)]
    pub severity: Option<String>,

    /// Platform tags; empty applies everywhere.
    #[serde(default)]
    pub platforms: Vec<String>,
}

/// The `expected` field: either a `{min, max}` range object or a plain
/// value (scalar or list). Range must be tried first; a fact [`Value`] has
/// no map form, so the two never overlap.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawExpected {
    Range { min: f64, max: f64 },
    Value(Value),
}
