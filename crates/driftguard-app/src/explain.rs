//! The `explain` use case: look up constraint kind and reason code docs.

use driftguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes the known kinds and codes.
    NotFound {
        identifier: String,
        available_kinds: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a constraint kind or reason code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_kinds: explain::all_kinds(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push('\n');
    if !exp.example.is_empty() {
        out.push_str("\nExample\n");
        out.push_str("-------\n");
        out.push_str("```yaml\n");
        out.push_str(exp.example);
        out.push('\n');
        out.push_str("```\n");
    }

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(
    identifier: &str,
    kinds: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown constraint kind or reason code: {}\n\n", identifier));
    out.push_str("Available kinds:\n");
    for kind in kinds {
        out.push_str(&format!("  - {}\n", kind));
    }
    out.push_str("\nAvailable reason codes:\n");
    for code in codes {
        out.push_str(&format!("  - {}\n", code));
    }

    out
}
