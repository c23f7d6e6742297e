//! Explain registry for constraint kinds and reason codes.
//!
//! Maps kind names and finding reason codes to human-readable explanations
//! with remediation guidance.

use crate::ids;

/// Explanation entry for a constraint kind or reason code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the kind/code.
    pub title: &'static str,
    /// What the constraint checks and why it exists.
    pub description: &'static str,
    /// How to fix violations or authoring mistakes.
    pub remediation: &'static str,
    /// A policy rule example using this kind (empty for reason codes).
    pub example: &'static str,
}

/// Look up an explanation by constraint kind or reason code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Constraint kinds
        ids::KIND_EQUALS => Some(explain_equals()),
        ids::KIND_NOT_EQUALS => Some(explain_not_equals()),
        ids::KIND_IN_SET => Some(explain_in_set()),
        ids::KIND_NOT_IN_SET => Some(explain_not_in_set()),
        ids::KIND_PRESENT => Some(explain_present()),
        ids::KIND_ABSENT => Some(explain_absent()),
        ids::KIND_NUMERIC_RANGE => Some(explain_numeric_range()),
        ids::KIND_REGEX_MATCH => Some(explain_regex_match()),
        ids::KIND_VERSION_AT_LEAST => Some(explain_version_at_least()),

        // Reason codes
        ids::CODE_MISSING_FACT => Some(explain_missing_fact()),
        ids::CODE_NOT_COMPARABLE => Some(explain_not_comparable()),
        ids::CODE_COLLECTOR_ERROR => Some(explain_collector_error()),

        _ => None,
    }
}

/// List all known constraint kinds.
pub fn all_kinds() -> &'static [&'static str] {
    ids::ALL_KINDS
}

/// List all known reason codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_MISSING_FACT,
        ids::CODE_NOT_COMPARABLE,
        ids::CODE_COLLECTOR_ERROR,
        ids::CODE_PLATFORM_EXCLUDED,
        ids::CODE_SELECTOR_SKIPPED,
    ]
}

// --- Constraint kind explanations ---

fn explain_equals() -> Explanation {
    Explanation {
        title: "Equals",
        description: "\
The observed fact must equal the expected value exactly. Comparison is
kind-sensitive: a number never equals a string, and such a pairing is
reported as an evaluation error rather than drift.",
        remediation: "\
If the rule errors with `not_comparable`, align the expected value's type
with what the collector actually reports (quote strings, unquote numbers).",
        example: "\
- id: sshd-port
  selector: network.sshd.port
  kind: equals
  expected: 22
  severity: high",
    }
}

fn explain_not_equals() -> Explanation {
    Explanation {
        title: "Not Equals",
        description: "\
The observed fact must differ from the expected value. Incomparable kinds
are an evaluation error, never silently treated as a difference.",
        remediation: "\
Use for forbidding one specific value; prefer `not_in_set` for several.",
        example: "\
- id: no-root-login-shell
  selector: user.root.shell
  kind: not_equals
  expected: /bin/bash
  severity: medium",
    }
}

fn explain_in_set() -> Explanation {
    Explanation {
        title: "In Set",
        description: "\
The observed fact must be a member of the expected set.",
        remediation: "\
List every acceptable value; membership uses the same kind-sensitive
equality as `equals`.",
        example: "\
- id: allowed-ssh-protocol
  selector: network.sshd.protocol
  kind: in_set
  expected: [2]
  severity: critical",
    }
}

fn explain_not_in_set() -> Explanation {
    Explanation {
        title: "Not In Set",
        description: "\
The observed fact must not be a member of the expected set.",
        remediation: "\
List the forbidden values, e.g. weak ciphers or legacy ports.",
        example: "\
- id: no-weak-ciphers
  selector: network.sshd.cipher
  kind: not_in_set
  expected: [3des-cbc, arcfour]
  severity: high",
    }
}

fn explain_present() -> Explanation {
    Explanation {
        title: "Present",
        description: "\
The selector must resolve to a value in the snapshot. An absent selector is
drift, not an error: absence is exactly what this kind tests.",
        remediation: "\
Install or enable the component the selector addresses, or drop the rule.",
        example: "\
- id: auditd-installed
  selector: package.auditd.version
  kind: present
  severity: medium",
    }
}

fn explain_absent() -> Explanation {
    Explanation {
        title: "Absent",
        description: "\
The selector must not resolve to a value. Use for services or packages that
must not exist on a compliant host.",
        remediation: "\
Remove the component the selector addresses.",
        example: "\
- id: no-telnet
  selector: process.telnetd.running
  kind: absent
  severity: critical",
    }
}

fn explain_numeric_range() -> Explanation {
    Explanation {
        title: "Numeric Range",
        description: "\
The observed number must lie within [min, max], both bounds inclusive.
Non-numeric observations are an evaluation error.",
        remediation: "\
Both `min` and `max` are required and must satisfy min <= max.",
        example: "\
- id: password-max-days
  selector: auth.password.max_days
  kind: numeric_range
  expected: {min: 1, max: 90}
  severity: medium",
    }
}

fn explain_regex_match() -> Explanation {
    Explanation {
        title: "Regex Match",
        description: "\
The observed value, coerced to a string, must match the pattern. Patterns
are anchored at both ends unless they already carry explicit `^`/`$`
anchors. Lists cannot be coerced and error out.",
        remediation: "\
Patterns are validated when the policy loads; an invalid pattern rejects
the whole document.",
        example: "\
- id: hostname-shape
  selector: host.name
  kind: regex_match
  expected: \"prod-[a-z0-9]+\"
  severity: low",
    }
}

fn explain_version_at_least() -> Explanation {
    Explanation {
        title: "Version At Least",
        description: "\
The observed dotted-numeric version must be >= the expected version,
compared component-wise with the shorter side zero-padded ('1.2' reads as
'1.2.0'). Values that do not parse as dotted numerics are an error.",
        remediation: "\
Upgrade the component, or lower the expected floor.",
        example: "\
- id: openssl-floor
  selector: package.openssl.version
  kind: version_at_least
  expected: \"3.0\"
  severity: critical",
    }
}

// --- Reason code explanations ---

fn explain_missing_fact() -> Explanation {
    Explanation {
        title: "Missing Fact",
        description: "\
The rule's selector was not present in the snapshot and the rule's kind
needs a value to compare. The rule's precondition could not be checked, so
the finding is an error rather than drift.",
        remediation: "\
Check that a collector covers the selector path, or use `present`/`absent`
if existence itself is what the rule should test.",
        example: "",
    }
}

fn explain_not_comparable() -> Explanation {
    Explanation {
        title: "Not Comparable",
        description: "\
The observed and expected values are of incompatible kinds (for example a
string against a number). Driftguard never coerces across kinds, so the
finding is an error: a false negative must not masquerade as passing
policy.",
        remediation: "\
Fix the expected value's type in the policy document to match what the
collector reports.",
        example: "",
    }
}

fn explain_collector_error() -> Explanation {
    Explanation {
        title: "Collector Error",
        description: "\
The collector responsible for this selector failed or timed out; the
snapshot carries its failure reason instead of a value.",
        remediation: "\
Inspect the reason on the finding; the rest of the policy still evaluated
normally.",
        example: "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_an_explanation() {
        for kind in all_kinds() {
            assert!(lookup_explanation(kind).is_some(), "missing: {kind}");
        }
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert!(lookup_explanation("no_such_kind").is_none());
    }
}
