use crate::collector::{CollectError, FactCollector, Facts};
use camino::Utf8PathBuf;
use driftguard_types::{Observed, Value};
use serde_json::Value as JsonValue;

/// Collector backed by a YAML or JSON facts file.
///
/// Nested mappings flatten into dotted selectors (`process: {sshd: {running:
/// true}}` becomes `process.sshd.running`); an explicit `null` records the
/// selector as absent; values the fact model cannot express become
/// per-selector collector-error cells.
#[derive(Clone, Debug)]
pub struct FileFactCollector {
    path: Utf8PathBuf,
}

impl FileFactCollector {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FactCollector for FileFactCollector {
    fn name(&self) -> &str {
        "facts-file"
    }

    fn collect(&self) -> Result<Facts, CollectError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| CollectError::new(self.name(), format!("read '{}': {e}", self.path)))?;

        let tree: JsonValue = match self.path.extension() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                .map_err(|e| CollectError::new(self.name(), format!("parse YAML: {e}")))?,
            Some("json") => serde_json::from_str(&text)
                .map_err(|e| CollectError::new(self.name(), format!("parse JSON: {e}")))?,
            _ => {
                return Err(CollectError::new(
                    self.name(),
                    format!(
                        "unsupported facts file extension for '{}' (expected .yaml, .yml, or .json)",
                        self.path
                    ),
                ));
            }
        };

        let JsonValue::Object(root) = tree else {
            return Err(CollectError::new(
                self.name(),
                "facts file root must be a mapping",
            ));
        };

        let mut facts = Facts::new();
        for (key, node) in root {
            flatten(&key, node, &mut facts);
        }
        Ok(facts)
    }
}

fn flatten(selector: &str, node: JsonValue, out: &mut Facts) {
    match node {
        JsonValue::Object(map) => {
            for (key, child) in map {
                flatten(&format!("{selector}.{key}"), child, out);
            }
        }
        JsonValue::Null => {
            out.insert(selector.to_string(), Observed::Absent);
        }
        other => {
            let cell = match serde_json::from_value::<Value>(other) {
                Ok(value) => Observed::Value(value),
                Err(_) => Observed::CollectorError {
                    reason: "unsupported value shape in facts file".to_string(),
                },
            };
            out.insert(selector.to_string(), cell);
        }
    }
}
