//! hubcap - GitHub tools for LLM agents

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hubcap_protocol::ApprovalPolicy;
use hubcap_tools::ToolRegistry;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::List => run_list(&cli),
        Commands::Schema { tool } => run_schema(&cli, tool),
        Commands::Run { tool, input } => run_tool(&cli, tool, input).await,
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_registry(cli: &Cli) -> anyhow::Result<ToolRegistry> {
    let mut builder = ToolRegistry::builder(cli.token.clone());

    if let Some(approval) = &cli.approval {
        let policy: ApprovalPolicy =
            serde_json::from_str(approval).context("invalid approval policy")?;
        builder = builder.approval_policy(policy);
    }
    if !cli.presets.is_empty() {
        builder = builder.preset_names(&cli.presets)?;
    }
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url);
    }

    Ok(builder.build()?)
}

fn run_list(cli: &Cli) -> anyhow::Result<()> {
    let registry = build_registry(cli)?;

    if registry.is_empty() {
        println!("{}", "Registry is empty for the selected presets.".dimmed());
        return Ok(());
    }

    for spec in registry.specs() {
        let gate = match spec.requires_approval {
            Some(true) => "approval required".yellow(),
            Some(false) => "auto-approved".green(),
            None => "read-only".dimmed(),
        };
        println!("{:<24} {:<20} {}", spec.name.cyan().bold(), gate, spec.description);
    }
    Ok(())
}

fn run_schema(cli: &Cli, tool: &str) -> anyhow::Result<()> {
    let registry = build_registry(cli)?;
    let spec = registry
        .specs()
        .into_iter()
        .find(|spec| spec.name == tool)
        .with_context(|| format!("no tool named {tool} in the composed registry"))?;

    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

async fn run_tool(cli: &Cli, tool: &str, input: &str) -> anyhow::Result<()> {
    let registry = build_registry(cli)?;
    let input: serde_json::Value = serde_json::from_str(input).context("input is not valid JSON")?;

    let output = registry.dispatch(tool, input).await?;
    println!("{}", serde_json::to_string_pretty(output.as_value())?);
    Ok(())
}
