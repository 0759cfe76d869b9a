//! Container management for the LocalStack emulator.
//!
//! Follows the Functional Core - Imperative Shell pattern:
//!
//! - **Pure functions** build command arguments and the environment the
//!   integration suite runs with.
//! - **I/O functions** execute container commands and poll health.

use std::time::Duration;

use tokio::process::Command;

use super::error::{IntegrationError, Result};

// ============================================================================
// Types
// ============================================================================

/// Container runtime (Docker or Podman).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerRuntime {
    #[default]
    Docker,
    Podman,
}

/// Specification for a container.
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub image: &'static str,
    pub port: u16,
    pub env: &'static [(&'static str, &'static str)],
    pub health_check: HealthCheck,
}

/// HTTP health check: `GET http://localhost:{port}{path}` must answer
/// `expected_status`.
#[derive(Debug, Clone)]
pub struct HealthCheck {
    pub path: &'static str,
    pub expected_status: u16,
}

// ============================================================================
// Container Specifications (Constants)
// ============================================================================

/// LocalStack container specification, restricted to DynamoDB.
pub const LOCALSTACK_SPEC: ContainerSpec = ContainerSpec {
    name: "sqla-localstack",
    image: "localstack/localstack",
    port: 4566,
    env: &[("SERVICES", "dynamodb")],
    health_check: HealthCheck {
        path: "/_localstack/health",
        expected_status: 200,
    },
};

/// Endpoint the integration suite talks to.
pub const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

// ============================================================================
// Pure Functions (Functional Core)
// ============================================================================

/// Builds arguments for `docker run` / `podman run`.
pub fn container_run_args(spec: &ContainerSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "--name".to_string(),
        spec.name.to_string(),
        "-d".to_string(),
        "-p".to_string(),
        format!("{}:{}", spec.port, spec.port),
    ];

    for (key, value) in spec.env {
        args.push("-e".to_string());
        args.push(format!("{}={}", key, value));
    }

    args.push(spec.image.to_string());
    args
}

/// Environment variables the SDK needs to reach the emulator.
pub fn environment_variables(endpoint: &'static str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("AWS_ENDPOINT_URL", endpoint),
        ("AWS_REGION", "us-east-1"),
        ("AWS_ACCESS_KEY_ID", "test"),
        ("AWS_SECRET_ACCESS_KEY", "test"),
    ]
}

/// URL polled by the health check.
pub fn health_url(spec: &ContainerSpec) -> String {
    format!("http://localhost:{}{}", spec.port, spec.health_check.path)
}

// ============================================================================
// I/O Functions (Imperative Shell)
// ============================================================================

/// Returns the command name for the container runtime.
pub fn runtime_command(runtime: ContainerRuntime) -> &'static str {
    match runtime {
        ContainerRuntime::Docker => "docker",
        ContainerRuntime::Podman => "podman",
    }
}

/// Detects which container runtime is available, Docker first.
pub async fn detect_runtime() -> Result<ContainerRuntime> {
    for runtime in [ContainerRuntime::Docker, ContainerRuntime::Podman] {
        let output = Command::new(runtime_command(runtime))
            .arg("--version")
            .output()
            .await;

        if let Ok(output) = output {
            if output.status.success() {
                return Ok(runtime);
            }
        }
    }

    Err(IntegrationError::DockerNotAvailable(
        "Neither docker nor podman found in PATH".to_string(),
    ))
}

/// Returns true when a container named `name` is running.
pub async fn is_running(runtime: ContainerRuntime, name: &str) -> Result<bool> {
    let output = Command::new(runtime_command(runtime))
        .args(["ps", "-q", "-f", &format!("name={}", name)])
        .output()
        .await?;

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

/// Stops and removes a container.
///
/// Errors are ignored since the container might not exist.
pub async fn stop_container(runtime: ContainerRuntime, name: &str) -> Result<()> {
    let cmd = runtime_command(runtime);

    let _ = Command::new(cmd).args(["stop", name]).output().await;
    let _ = Command::new(cmd).args(["rm", name]).output().await;

    Ok(())
}

/// Starts a container, replacing any stopped one with the same name.
pub async fn start_container(runtime: ContainerRuntime, spec: &ContainerSpec) -> Result<()> {
    stop_container(runtime, spec.name).await?;

    let output = Command::new(runtime_command(runtime))
        .args(container_run_args(spec))
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(IntegrationError::ContainerFailed(format!(
            "Failed to start container '{}': {}",
            spec.name, stderr
        )));
    }

    Ok(())
}

/// Polls the container's health endpoint until it passes or `timeout`
/// elapses.
pub async fn wait_for_health(spec: &ContainerSpec, timeout: Duration) -> Result<()> {
    let start = std::time::Instant::now();
    let poll_interval = Duration::from_millis(500);
    let url = health_url(spec);

    while start.elapsed() < timeout {
        if check_http_health(&url, spec.health_check.expected_status).await {
            return Ok(());
        }
        tokio::time::sleep(poll_interval).await;
    }

    Err(IntegrationError::ContainerNotHealthy {
        name: spec.name.to_string(),
        timeout_secs: timeout.as_secs(),
    })
}

async fn check_http_health(url: &str, expected_status: u16) -> bool {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build();

    let Ok(client) = client else {
        return false;
    };

    match client.get(url).send().await {
        Ok(response) => response.status().as_u16() == expected_status,
        Err(_) => false,
    }
}
