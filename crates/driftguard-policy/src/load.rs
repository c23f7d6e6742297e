use crate::schema::RawPolicy;
use crate::validate::{validate_policy, PolicySchemaError};
use camino::Utf8Path;
use driftguard_domain::model::PolicyDocument;

/// On-disk policy format, decided by file extension the way the original
/// CLI contract documents it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyFormat {
    Yaml,
    Json,
}

impl PolicyFormat {
    pub fn from_extension(path: &Utf8Path) -> Option<Self> {
        match path.extension() {
            Some("yaml") | Some("yml") => Some(PolicyFormat::Yaml),
            Some("json") => Some(PolicyFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyLoadError {
    #[error("read policy file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported policy file extension for '{0}' (expected .yaml, .yml, or .json)")]
    UnsupportedFormat(String),

    #[error("parse YAML policy: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("parse JSON policy: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] PolicySchemaError),
}

/// Read, parse, and validate a policy file. Any failure is fatal to the run;
/// evaluation never starts on a partial document.
pub fn load_policy(path: &Utf8Path) -> Result<PolicyDocument, PolicyLoadError> {
    let format = PolicyFormat::from_extension(path)
        .ok_or_else(|| PolicyLoadError::UnsupportedFormat(path.to_string()))?;
    let text = std::fs::read_to_string(path).map_err(|source| PolicyLoadError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_policy_str(&text, format)
}

/// Parse and validate policy text in the given format.
pub fn parse_policy_str(text: &str, format: PolicyFormat) -> Result<PolicyDocument, PolicyLoadError> {
    let raw: RawPolicy = match format {
        PolicyFormat::Yaml => serde_yaml::from_str(text)?,
        PolicyFormat::Json => serde_json::from_str(text)?,
    };
    Ok(validate_policy(raw)?)
}
