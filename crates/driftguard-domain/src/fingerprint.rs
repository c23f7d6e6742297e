use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a rule's finding.
///
/// Identity fields:
/// - policy_id
/// - rule_id
/// - selector
/// - constraint kind
///
/// Status is deliberately excluded so the fingerprint is stable across runs
/// where the same rule flips between compliant and drifted.
pub fn fingerprint_for_rule(policy_id: &str, rule_id: &str, selector: &str, kind: &str) -> String {
    let canonical = [policy_id, rule_id, selector, kind].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
