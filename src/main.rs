mod cache;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod session;
mod view;
mod workflow;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::console;
use crate::cmd::ticket::{self, CloseArgs, ListArgs, SubmitArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GithubClient;

#[derive(Parser)]
#[command(
    name = "helpdesk",
    version,
    about = "Helpdesk ticket console backed by a GitHub issues repository"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: login, then list, file, and close tickets.
    Console,
    /// File a single ticket and exit.
    Submit(SubmitArgs),
    /// Print the current ticket list.
    List(ListArgs),
    /// Close one ticket by id.
    Close(CloseArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Console => console::run(&build_context()?).await,
        Commands::Submit(args) => ticket::submit(&build_context()?, args).await,
        Commands::List(args) => ticket::list(&build_context()?, args).await,
        Commands::Close(args) => ticket::close(&build_context()?, args).await,
    }
}

fn build_context() -> AppResult<AppContext> {
    let config = AppConfig::load()?;
    let tracker = Arc::new(GithubClient::new(
        config.api_url.clone(),
        config.owner.clone(),
        config.repo.clone(),
    )?);
    Ok(AppContext::new(config, tracker))
}
