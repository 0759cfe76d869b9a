//! sqla CLI entry point.

use anyhow::Result;
use clap::Parser;
use sqla::cli::{Cli, Commands, OutputFormat};
use sqla::core::compiler::{compile, Compiled};
use sqla::core::stmt::CreateTable;
use sqla::output::{format_output, pretty};
use sqla::Engine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output stays machine readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sqla=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Dry runs never touch the network.
    if let Commands::CreateTable(cmd) = &cli.command {
        if cmd.dry_run {
            let table = cmd.to_table()?;
            if let Compiled::CreateTable(request) = compile(&CreateTable::new(&table).into())? {
                println!("{}", format_output(&request, cli.format));
            }
            return Ok(());
        }
    }

    let engine = match &cli.url {
        Some(url) => Engine::from_url(url).await?,
        None => Engine::from_env().await,
    };

    match cli.command {
        Commands::Tables => {
            let names = engine.inspector().get_table_names().await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&names, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_table_names(&names)),
            }
        }
        Commands::Describe { table } => {
            let desc = engine.inspector().describe_table(&table).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&desc, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_table_description(&desc)),
            }
        }
        Commands::Query(cmd) => {
            let mut cursor = engine.execute(cmd.to_statement()).await?;
            let rows = match cmd.limit {
                Some(limit) => cursor.fetchmany(limit),
                None => cursor.fetchall(),
            };
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&rows, cli.format)),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_rows(cursor.description(), &rows))
                }
            }
            cursor.close();
        }
        Commands::CreateTable(cmd) => {
            let table = cmd.to_table()?;
            engine.create(&table).await?;
            if !cmd.no_wait {
                engine.wait_until_exists(table.name()).await?;
            }
            if !cli.quiet {
                println!("Created table {}", table.name());
            }
        }
        Commands::DropTable { table, no_wait } => {
            engine.drop(&table).await?;
            if !no_wait {
                engine.wait_until_not_exists(&table).await?;
            }
            if !cli.quiet {
                println!("Dropped table {}", table);
            }
        }
    }

    Ok(())
}
