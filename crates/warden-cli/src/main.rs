//! Warden CLI Application
//!
//! Command-line interface and hook entry point for the warden workflow guard.

mod args;
mod cli;
mod exit_codes;
mod mcp;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, WardenMcpServer};
use renderer::TerminalRenderer;
use warden_core::{Config, FixedBranch, WardenBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let Args {
        config,
        trunk,
        branch,
        no_color,
        command,
    } = Args::parse();

    let config = Config::load(config.as_deref()).context("Failed to load configuration")?;

    let mut builder = WardenBuilder::new()
        .with_config(config)
        .with_trunk_branch(trunk);
    if let Some(branch) = branch {
        builder = builder.with_branch_resolver(FixedBranch::new(branch));
    }
    let warden = builder.build().context("Failed to initialize warden")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Warden started");

    match command {
        Hook { payload } => Cli::new(warden, renderer).hook(payload),
        ValidatePlan { file } => Cli::new(warden, renderer).validate_plan(&file),
        CheckCommand { command } => Cli::new(warden, renderer).check_command(&command),
        Context => Cli::new(warden, renderer).context(),
        Serve => {
            info!("Starting Warden MCP server");
            run_stdio_server(WardenMcpServer::new(warden))
                .await
                .context("MCP server failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
