//! Stable identifiers for constraint kinds and finding reason codes.
//!
//! Kind names double as the `kind` field in policy documents; reason codes
//! are short snake_case discriminators carried in finding reasons.

// Constraint kinds
pub const KIND_EQUALS: &str = "equals";
pub const KIND_NOT_EQUALS: &str = "not_equals";
pub const KIND_IN_SET: &str = "in_set";
pub const KIND_NOT_IN_SET: &str = "not_in_set";
pub const KIND_PRESENT: &str = "present";
pub const KIND_ABSENT: &str = "absent";
pub const KIND_NUMERIC_RANGE: &str = "numeric_range";
pub const KIND_REGEX_MATCH: &str = "regex_match";
pub const KIND_VERSION_AT_LEAST: &str = "version_at_least";

/// All kinds, in the order the policy schema documents them.
pub const ALL_KINDS: &[&str] = &[
    KIND_EQUALS,
    KIND_NOT_EQUALS,
    KIND_IN_SET,
    KIND_NOT_IN_SET,
    KIND_PRESENT,
    KIND_ABSENT,
    KIND_NUMERIC_RANGE,
    KIND_REGEX_MATCH,
    KIND_VERSION_AT_LEAST,
];

// Reason codes for findings that could not be evaluated
pub const CODE_MISSING_FACT: &str = "missing_fact";
pub const CODE_NOT_COMPARABLE: &str = "not_comparable";
pub const CODE_COLLECTOR_ERROR: &str = "collector_error";

// Reason codes for skipped findings
pub const CODE_PLATFORM_EXCLUDED: &str = "platform_excluded";
pub const CODE_SELECTOR_SKIPPED: &str = "selector_skipped";
