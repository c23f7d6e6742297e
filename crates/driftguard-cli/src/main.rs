//! CLI entry point for driftguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and
//! exit codes. All business logic lives in the `driftguard-app` crate.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use driftguard_alert::{dispatch_all, should_dispatch, AlertMode};
use driftguard_app::{
    alert_sinks, format_explanation, format_not_found, render_markdown, render_summary,
    report_exit_code, run_check, run_explain, write_report, write_text, CheckInput, ExplainOutput,
    EXIT_FATAL,
};
use driftguard_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "driftguard",
    version,
    about = "Security policy drift detection for host baselines"
)]
struct Cli {
    /// Path to the policy document (.yaml, .yml, or .json).
    #[arg(long, default_value = "policy.yaml")]
    policy: Utf8PathBuf,

    /// Path to the facts file backing the file collector.
    #[arg(long, default_value = "facts.yaml")]
    facts: Utf8PathBuf,

    /// Path to driftguard config TOML.
    #[arg(long, default_value = "driftguard.toml")]
    config: Utf8PathBuf,

    /// Log filter (error|warn|info|debug|trace).
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Override severity threshold (info|low|medium|high|critical).
    #[arg(long)]
    threshold: Option<String>,

    /// Override the platform tag rules are matched against.
    #[arg(long)]
    platform: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate the policy against collected facts and write the report.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/driftguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/driftguard/report.md")]
        markdown_out: Utf8PathBuf,

        /// Dispatch alerts to the configured sinks; an optional value adds an
        /// extra file destination for the report.
        #[arg(long, value_name = "FILE", num_args = 0..=1)]
        alert: Option<Option<Utf8PathBuf>>,

        /// Dispatch alerts even when the report is compliant.
        #[arg(long)]
        always_notify: bool,
    },

    /// Explain a constraint kind or reason code with remediation guidance.
    Explain {
        /// The kind (e.g. "numeric_range") or code (e.g. "not_comparable").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.cmd {
        Commands::Check {
            ref report_out,
            write_markdown,
            ref markdown_out,
            ref alert,
            always_notify,
        } => cmd_check(
            &cli,
            report_out.clone(),
            write_markdown,
            markdown_out.clone(),
            alert.clone(),
            always_notify,
        ),
        Commands::Explain { identifier } => cmd_explain(&identifier),
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_check(
    cli: &Cli,
    report_out: Utf8PathBuf,
    write_markdown: bool,
    markdown_out: Utf8PathBuf,
    alert: Option<Option<Utf8PathBuf>>,
    always_notify: bool,
) -> anyhow::Result<()> {
    // Load config if present; missing file is allowed (defaults apply).
    let cfg_text = std::fs::read_to_string(&cli.config).unwrap_or_default();

    let overrides = Overrides {
        threshold: cli.threshold.clone(),
        platform: cli.platform.clone(),
        always_notify: always_notify.then_some(true),
    };

    let output = match run_check(CheckInput {
        policy_path: &cli.policy,
        facts_path: &cli.facts,
        config_text: &cfg_text,
        overrides,
    }) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("driftguard error: {err:#}");
            std::process::exit(EXIT_FATAL);
        }
    };

    write_report(&report_out, &output.report).context("write report json")?;
    if write_markdown {
        let md = render_markdown(&output.report);
        write_text(&markdown_out, &md).context("write markdown")?;
    }

    print!("{}", render_summary(&output.report));

    // Dispatch only on opt-in; delivery failures are logged per sink and
    // never change the verdict or the exit code.
    if let Some(extra_file) = alert {
        let mode = if output.resolved.always_notify {
            AlertMode::Always
        } else {
            AlertMode::OnDrift
        };
        if should_dispatch(mode, output.report.compliant) {
            let sinks = alert_sinks(&output.resolved, extra_file.as_ref().map(|p| p.as_str()));
            let _ = dispatch_all(&sinks, &output.report);
        }
    }

    let code = report_exit_code(&output.report);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_kinds,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_kinds, available_codes)
            );
            std::process::exit(1);
        }
    }
}
