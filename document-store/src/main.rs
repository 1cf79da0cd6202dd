mod cli;
mod commands;

use clap::Parser;
use client_core::observability::{init_tracing, shutdown_tracing};
use document_store::config::get_configuration;
use document_store::{DocumentStore, HttpDocumentApi};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(&configuration.service_name, &configuration.logging)?;

    let api = Arc::new(HttpDocumentApi::new(configuration.api.clone()));
    let store = DocumentStore::new(api);
    let project_id = cli.project_id();

    tracing::debug!(project_id = %project_id, command = ?cli.command, "Running command");
    let result = commands::run(&store, project_id, cli.command).await;

    shutdown_tracing();

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
