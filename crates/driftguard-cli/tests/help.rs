use assert_cmd::Command;

/// Helper to get a Command for the driftguard binary.
#[allow(deprecated)]
fn driftguard_cmd() -> Command {
    Command::cargo_bin("driftguard").unwrap()
}

#[test]
fn help_works() {
    driftguard_cmd().arg("--help").assert().success();
}

#[test]
fn check_help_lists_report_flags() {
    driftguard_cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicates::str::contains("--report-out"))
        .stdout(predicates::str::contains("--write-markdown"));
}
