use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::path::PathBuf;

mod cli;
mod config;

use cadbridge::catalog::{Operation, OperationCatalog};
use cadbridge::dispatch::Dispatcher;
use cadbridge::mcp::McpServer;
use cadbridge::rpc::RpcClient;
use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cadbridge")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("cadbridge.log");

    // stdout carries the MCP stream, so logs go to a file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Without RUST_LOG everything reaches the logger; set_log_level picks the cutoff
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(target))
        .init();
    set_log_level(LevelFilter::Info);

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// RUST_LOG, when set, wins over config and flags
fn set_log_level(level: LevelFilter) {
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level);
    }
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    let dispatcher = Dispatcher::new(RpcClient::new(config.rpc_config()));

    match &cli.command {
        None | Some(Commands::Serve) => run_server(dispatcher).await,
        Some(Commands::Tools { json }) => handle_tools_command(*json),
        Some(Commands::Call { tool, args }) => handle_call_command(&dispatcher, tool, args).await,
    }
}

async fn run_server(dispatcher: Dispatcher<RpcClient>) -> Result<()> {
    info!("Serving MCP on stdio");
    let server = McpServer::new(dispatcher);
    server.serve_stdio().await.context("MCP server failed")?;
    Ok(())
}

fn handle_tools_command(json: bool) -> Result<()> {
    let catalog = OperationCatalog::standard();
    if json {
        println!("{}", serde_json::to_string_pretty(catalog.all())?);
        return Ok(());
    }

    for op in Operation::ALL {
        println!("{} {}", op.tool_name().green().bold(), format!("({})", op.remote_method()).dimmed());
        println!("  {}", op.description());
        for param in op.params() {
            let marker = if param.required { "*".red() } else { " ".normal() };
            println!(
                "  {}{:<14} {:<7} {}",
                marker,
                param.name,
                param.kind.json_type(),
                param.description.dimmed()
            );
        }
        println!("  {} {}", "->".cyan(), op.result_shape());
    }
    Ok(())
}

async fn handle_call_command(dispatcher: &Dispatcher<RpcClient>, tool: &str, args: &str) -> Result<()> {
    info!("Calling tool {} with {}", tool, args);
    let args: serde_json::Value = serde_json::from_str(args).context("Tool arguments must be JSON")?;

    let (op, params) = OperationCatalog::standard().parse_call(tool, &args)?;
    let result = dispatcher
        .dispatch(op, params)
        .await
        .with_context(|| format!("{} failed", op))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first so config warnings are recorded
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();
    if cli.is_verbose() {
        set_log_level(LevelFilter::Debug);
    }

    // Load configuration, then layer environment and flags on top
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_env().context("Failed to read environment")?;
    config.apply_overrides(cli.host.as_deref(), cli.port);

    if !cli.is_verbose() {
        set_log_level(config.log_filter());
    }

    info!("Starting with config from: {:?}", cli.config);
    info!("CAD host at {}", config.rpc_config().address());

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
