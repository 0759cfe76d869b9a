use crate::prelude::*;
use error::Result;

pub mod error;

/// Code quality checks
#[derive(Debug, clap::Parser)]
#[command(
    long_about = "Run code quality checks on the workspace.

This command runs the following checks in order:

1. cargo fmt - Code formatting (auto-fix with --fix)
2. cargo check - Compilation check
3. cargo clippy - Linting with all warnings treated as errors
4. cargo test - Unit tests and doctests

Integration tests that need LocalStack run through `cargo xtask integration`."
)]
pub struct LintCommand {
    /// Auto-fix formatting issues
    #[arg(long)]
    pub fix: bool,
}

/// A single cargo invocation and the messages reported around it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Check {
    title: &'static str,
    args: Vec<&'static str>,
    success: &'static str,
    failure: &'static str,
}

/// Pure function: the checks to run after formatting, in order.
fn cargo_checks(verbose: bool) -> Vec<Check> {
    let quiet = |mut args: Vec<&'static str>| {
        if !verbose {
            args.push("--quiet");
        }
        args
    };

    let mut clippy = quiet(vec!["clippy", "--all-targets"]);
    clippy.extend(["--", "-D", "warnings"]);

    vec![
        Check {
            title: "Running cargo check...",
            args: quiet(vec!["check", "--all-targets"]),
            success: "Cargo check passed",
            failure: "Please fix compilation errors before proceeding",
        },
        Check {
            title: "Running cargo clippy...",
            args: clippy,
            success: "Clippy checks passed",
            failure: "Please fix clippy warnings before proceeding",
        },
        Check {
            title: "Running cargo test...",
            args: quiet(vec!["test", "--workspace"]),
            success: "All tests passed",
            failure: "Please fix failing tests before proceeding",
        },
    ]
}

pub async fn run(command: LintCommand, global: crate::Global) -> Result<()> {
    error::require_command("cargo", "Required for Rust development: https://rustup.rs/")?;

    if !global.is_silent() {
        aprintln!("{}", p_b("Running code quality checks..."));
        aprintln!();
    }

    let mut all_passed = run_cargo_fmt(&command, &global).await?;

    for check in cargo_checks(global.is_verbose()) {
        if !run_check(&check, &global).await? {
            all_passed = false;
        }
    }

    aprintln!();
    if all_passed {
        aprintln!("{} {}", p_g("✅"), p_g("All checks passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some checks failed"));
        aprintln!();
        if !global.is_silent() {
            aprintln!("{}", p_b("Quick fixes:"));
            aprintln!("  • {} - Format code", p_c("cargo xtask lint --fix"));
            aprintln!("  • {} - Auto-fix clippy issues", p_c("cargo clippy --fix"));
        }
        Err(error::LintError::ChecksFailed)
    }
}

async fn run_check(check: &Check, global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b(check.title));
    }

    let status = tokio::process::Command::new("cargo")
        .args(&check.args)
        .status()
        .await?;

    if status.success() {
        if !global.is_silent() {
            aprintln!("{} {}", p_g("✅"), check.success);
        }
        Ok(true)
    } else {
        aprintln!("{} {}", p_r("❌"), p_r(check.failure));
        Ok(false)
    }
}

async fn run_cargo_fmt(command: &LintCommand, global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b("Running cargo fmt..."));
    }

    let check_output = tokio::process::Command::new("cargo")
        .args(["fmt", "--all", "--check"])
        .output()
        .await?;

    if check_output.status.success() {
        if !global.is_silent() {
            aprintln!("{} {}", p_g("✅"), "Code formatting is correct");
        }
        return Ok(true);
    }

    if !command.fix {
        aprintln!(
            "{} {}",
            p_r("❌"),
            "Code formatting check failed. Run with --fix to auto-format"
        );
        return Ok(false);
    }

    if global.is_verbose() {
        aprintln!(
            "{} {}",
            p_y("⚠️"),
            "Code formatting issues found. Auto-fixing..."
        );
    }

    let fmt_status = tokio::process::Command::new("cargo")
        .args(["fmt", "--all"])
        .status()
        .await?;

    if fmt_status.success() {
        if !global.is_silent() {
            aprintln!("{} {}", p_g("✅"), "Code formatted");
        }
        Ok(true)
    } else {
        aprintln!("{} {}", p_r("❌"), "cargo fmt failed");
        Ok(false)
    }
}
