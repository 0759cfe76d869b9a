//! Integration test infrastructure.
//!
//! Runs the sqla integration suite against a LocalStack container.
//!
//! # Usage
//!
//! ```bash
//! # Start LocalStack, provision TEST_TABLE, run the suite, stop LocalStack
//! cargo xtask integration
//!
//! # Skip container management (assumes an emulator on localhost:4566)
//! cargo xtask integration --no-docker
//! ```

mod containers;
pub mod error;

pub use error::{IntegrationError, Result};

use std::time::Duration;

use containers::{
    detect_runtime, environment_variables, is_running, start_container, stop_container,
    wait_for_health, ContainerRuntime, LOCALSTACK_ENDPOINT, LOCALSTACK_SPEC,
};

use crate::prelude::*;

/// Integration test command.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Run integration tests against LocalStack.

This command starts a LocalStack container, deploys the TEST_TABLE fixture,
runs `cargo test -p sqla --features integration` and stops the container
afterward.

The suite runs with:
  AWS_ENDPOINT_URL=http://localhost:4566
  AWS_REGION=us-east-1
  AWS_ACCESS_KEY_ID=test
  AWS_SECRET_ACCESS_KEY=test")]
pub struct IntegrationCommand {
    /// Skip container management (assume LocalStack is already running).
    #[arg(long)]
    pub no_docker: bool,

    /// Keep the container running after tests complete.
    #[arg(long)]
    pub keep_containers: bool,

    /// Timeout in seconds for the container health check.
    #[arg(long, default_value = "60")]
    pub health_timeout: u64,
}

/// Main entry point for integration command.
pub async fn run(command: IntegrationCommand, global: crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{}", p_b("Integration Tests"));
        aprintln!("{} {}", p_b("Endpoint:"), LOCALSTACK_ENDPOINT);
        aprintln!();
    }

    let runtime = if command.no_docker {
        if !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "Skipping LocalStack container management (--no-docker)"
            );
        }
        None
    } else {
        Some(detect_runtime().await?)
    };

    let mut started = false;
    if let Some(rt) = runtime {
        started = start_localstack(command.health_timeout, &global, rt).await?;
    }

    let env_vars = environment_variables(LOCALSTACK_ENDPOINT);

    // Run the suite, then clean up regardless of the outcome.
    let outcome = match setup_test_table(&env_vars, &global).await {
        Ok(()) => run_tests(&env_vars, &global).await,
        Err(err) => Err(err),
    };

    if let Some(rt) = runtime {
        if !command.keep_containers && started {
            stop_localstack(&global, rt).await?;
        } else if command.keep_containers && !global.is_silent() {
            aprintln!(
                "{} {}",
                p_y("⚠️"),
                "Container left running (--keep-containers)"
            );
        }
    }

    aprintln!();
    if outcome? {
        aprintln!("{} {}", p_g("✅"), p_g("All integration tests passed!"));
        Ok(())
    } else {
        aprintln!("{} {}", p_r("❌"), p_r("Some integration tests failed"));
        Err(IntegrationError::TestFailed(
            "cargo test -p sqla --features integration failed".to_string(),
        ))
    }
}

/// Runs the sqla integration suite.
async fn run_tests(env_vars: &[(&str, &str)], global: &crate::Global) -> Result<bool> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🔧"), p_b("Running sqla integration tests..."));
    }

    let mut args = vec!["test", "-p", "sqla", "--features", "integration"];
    if !global.is_verbose() {
        args.push("--quiet");
    }

    let status = run_with_env("cargo", &args, env_vars).await?;
    Ok(status.success())
}

/// Starts LocalStack. Returns false when it was already running.
async fn start_localstack(
    timeout_secs: u64,
    global: &crate::Global,
    runtime: ContainerRuntime,
) -> Result<bool> {
    if is_running(runtime, LOCALSTACK_SPEC.name).await? {
        if !global.is_silent() {
            aprintln!("{} {}", p_y("⚠️"), "LocalStack container already running");
        }
        return Ok(false);
    }

    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Starting LocalStack container...");
    }

    start_container(runtime, &LOCALSTACK_SPEC).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {}",
            p_b("⏳"),
            format!("Waiting for container health (max {}s)...", timeout_secs)
        );
    }

    wait_for_health(&LOCALSTACK_SPEC, Duration::from_secs(timeout_secs)).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "LocalStack is ready");
    }

    Ok(true)
}

async fn stop_localstack(global: &crate::Global, runtime: ContainerRuntime) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("🐳"), "Stopping LocalStack container...");
    }

    stop_container(runtime, LOCALSTACK_SPEC.name).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "LocalStack container stopped");
    }

    Ok(())
}

/// Deploys TEST_TABLE through `cargo xtask dynamodb deploy`.
async fn setup_test_table(env_vars: &[(&str, &str)], global: &crate::Global) -> Result<()> {
    if !global.is_silent() {
        aprintln!("{} {}", p_b("📦"), "Setting up test table...");
    }

    let status = run_with_env(
        "cargo",
        &[
            "xtask",
            "dynamodb",
            "deploy",
            "--force",
            "--table-name",
            "TEST_TABLE",
        ],
        env_vars,
    )
    .await?;

    if !status.success() {
        return Err(IntegrationError::TableSetupFailed(
            "Failed to deploy TEST_TABLE".to_string(),
        ));
    }

    if !global.is_silent() {
        aprintln!("{} {}", p_g("✅"), "Test table ready");
    }

    Ok(())
}
