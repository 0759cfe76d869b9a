//! DynamoDB fixture management commands.

mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use dialoguer::Confirm;
use sqla::{ConnectOptions, Engine};

/// DynamoDB fixture management commands.
#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

/// Available DynamoDB actions.
#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the integration test table.
    Deploy(DeployCommand),
}

/// Deploy or destroy the integration test table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the integration test table.

By default, this command creates the table the sqla integration suite runs
against: partition key `id` (S) with 1 RCU / 1 WCU of provisioned throughput.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use a local emulator (e.g., http://localhost:4566)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the table instead of creating it.
    #[arg(long)]
    pub destroy: bool,

    /// Table name to use.
    #[arg(long, default_value = config::TEST_TABLE)]
    pub table_name: String,
}

/// Main entry point for dynamodb command.
pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(deploy_cmd) => run_deploy(deploy_cmd, &global).await,
    }
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| DynamodbError::Prompt(e.to_string()))
}

async fn run_deploy(cmd: DeployCommand, global: &crate::Global) -> Result<()> {
    let options = ConnectOptions::from_env();

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), options.target_display());
        aprintln!();
    }

    let engine = Engine::with_options(&options).await;
    let current_state = deploy::get_table_state(&engine, &cmd.table_name).await?;

    if cmd.destroy {
        let plan = planning::calculate_destroy_plan(current_state.as_ref(), &cmd.table_name);

        if !global.is_silent() {
            aprintln!("{}", p_y("Destroy Plan:"));
            for line in planning::format_destroy_plan(&plan) {
                aprintln!("  {}", p_r(&line));
            }
            aprintln!();
        }

        if matches!(plan, planning::DestroyPlan::AlreadyGone { .. }) {
            if !global.is_silent() {
                aprintln!("{}", p_g("Nothing to destroy."));
            }
            return Ok(());
        }

        if !cmd.force
            && !confirm(
                "Are you sure you want to delete this table? ALL DATA WILL BE LOST",
                false,
            )?
        {
            return Err(DynamodbError::UserCancelled);
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Deleting table..."));
        }

        deploy::execute_destroy_plan(&engine, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Table destroyed successfully."));
        }
    } else {
        let table = config::test_table(&cmd.table_name)?;
        let desired = deploy::desired_request(&table)?;
        let plan = planning::calculate_deploy_plan(current_state.as_ref(), &desired);

        if !global.is_silent() {
            aprintln!("{}", p_c("Deploy Plan:"));
            for line in planning::format_deploy_plan(&plan) {
                if line.starts_with('+') {
                    aprintln!("  {}", p_g(&line));
                } else if line.starts_with('~') {
                    aprintln!("  {}", p_y(&line));
                } else {
                    aprintln!("  {}", line);
                }
            }
            aprintln!();
        }

        match &plan {
            planning::DeployPlan::NoChanges { .. } => {
                if !global.is_silent() {
                    aprintln!("{}", p_g("Fixture is up to date."));
                }
                return Ok(());
            }
            planning::DeployPlan::KeyMismatch { table_name, .. } => {
                return Err(DynamodbError::KeyMismatch {
                    table_name: table_name.clone(),
                });
            }
            planning::DeployPlan::CreateTable { .. } => {}
        }

        if !cmd.force && !confirm("Apply these changes?", true)? {
            return Err(DynamodbError::UserCancelled);
        }

        if !global.is_silent() {
            aprintln!("{}", p_b("Creating table and waiting for ACTIVE..."));
        }

        deploy::execute_deploy_plan(&engine, &table, &plan).await?;

        if !global.is_silent() {
            aprintln!("{}", p_g("Fixture deployed successfully."));
        }
    }

    Ok(())
}
