mod adapter;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::search::SearchArgs;
use crate::cmd::ticket::{CreateArgs, ExtractArgs, GetArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::mcp::McpToolHost;

#[derive(Parser)]
#[command(
    name = "jira-assistant",
    author,
    version,
    about = "Chat and command-line front-end for a Jira tool host"
)]
struct Cli {
    /// Log tool-host traffic and internal decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to Jira in plain sentences.
    Chat,
    /// Create a ticket from explicit fields.
    Create(CreateArgs),
    /// Search tickets with JQL.
    Search(SearchArgs),
    /// Show the details of one ticket.
    Get(GetArgs),
    /// Show which ticket fields a sentence would produce, without calling Jira.
    Extract(ExtractArgs),
    /// List the tools the tool host exposes.
    Tools,
    /// Check that the tool host starts and completes the handshake.
    Status,
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli.command) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> AppResult<()> {
    let output = match command {
        Commands::Config(args) => return config_cmd::run(args.command),
        Commands::Chat => return cmd::chat::run(&build_context()?),
        Commands::Extract(args) => cmd::ticket::run_extract(args)?,
        Commands::Create(args) => cmd::ticket::run_create(&build_context()?, args)?,
        Commands::Search(args) => cmd::search::run(&build_context()?, args)?,
        Commands::Get(args) => cmd::ticket::run_get(&build_context()?, args)?,
        Commands::Tools => cmd::tools::run_list(&build_context()?)?,
        Commands::Status => cmd::tools::run_status(&build_context()?)?,
    };
    println!("{output}");
    Ok(())
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;

    for name in config.missing_credentials() {
        warn!("{name} not configured; the tool host may fail to reach Jira.");
    }

    let tool_host = Arc::new(McpToolHost::new(config.tool_host.clone()));
    Ok(AppContext::new(config, tool_host))
}
