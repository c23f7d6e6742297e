use assert_cmd::Command;
use predicates::str::contains;

#[allow(deprecated)]
fn driftguard_cmd() -> Command {
    Command::cargo_bin("driftguard").unwrap()
}

#[test]
fn explain_known_kind_prints_remediation() {
    driftguard_cmd()
        .args(["explain", "numeric_range"])
        .assert()
        .success()
        .stdout(contains("Numeric Range"))
        .stdout(contains("Remediation"));
}

#[test]
fn explain_reason_code() {
    driftguard_cmd()
        .args(["explain", "not_comparable"])
        .assert()
        .success()
        .stdout(contains("Not Comparable"));
}

#[test]
fn explain_unknown_identifier_fails_with_the_catalog() {
    driftguard_cmd()
        .args(["explain", "no_such_kind"])
        .assert()
        .code(1)
        .stderr(contains("Unknown constraint kind or reason code"))
        .stderr(contains("version_at_least"));
}
