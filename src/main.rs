mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
#[cfg(test)]
mod test_support;
mod workflow;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::commit::CommitArgs;
use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::prune::PruneArgs;
use crate::cmd::start::StartArgs;
use crate::config::{AppConfig, default_config_path};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::github::GitHubClient;
use crate::infra::prompt::TerminalPrompter;
use crate::services::PullRequestService;

const LOG_ENV: &str = "GITTY_LOG";
const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Parser)]
#[command(
    name = "gitty",
    author,
    version,
    about = "Commit summaries and safe branch cleanup for git"
)]
struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, env = "GITTY_CONFIG")]
    config: Option<PathBuf>,
    /// Run as if started in this directory.
    #[arg(short = 'C', long = "repo", global = true)]
    repo: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize staged changes into a commit message and commit them.
    Commit(CommitArgs),
    /// Interactively delete local branches that are safe to remove.
    Prune(PruneArgs),
    /// Create (or switch to) a branch named after a short summary.
    Start(StartArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = run(cli).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("gitty={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> AppResult<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command, &config_path),
        Commands::Commit(args) => {
            let context = build_context(cli.repo, &config_path)?;
            cmd::commit::run(&context, args)
        }
        Commands::Prune(args) => {
            let context = build_context(cli.repo, &config_path)?;
            cmd::prune::run(&context, args).await
        }
        Commands::Start(args) => {
            let context = build_context(cli.repo, &config_path)?;
            cmd::start::run(&context, args)
        }
    }
}

fn build_context(repo: Option<PathBuf>, config_path: &Path) -> AppResult<AppContext> {
    let workspace_root = match repo {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let env_token = std::env::var(TOKEN_ENV).ok();
    let config = AppConfig::load(&workspace_root, config_path, env_token)?;
    tracing::debug!(
        config = %config.config_path.display(),
        workspace = %config.workspace_root.display(),
        "loaded configuration"
    );

    let pull_requests: Option<Arc<dyn PullRequestService>> =
        config.github_token.as_ref().map(|token| {
            Arc::new(GitHubClient::new(
                config.github_api_url.clone(),
                token.clone(),
            )) as Arc<dyn PullRequestService>
        });
    if pull_requests.is_none() {
        tracing::info!("GitHub token not configured; pull request awareness disabled");
    }

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    Ok(AppContext::new(
        config,
        git,
        pull_requests,
        Arc::new(TerminalPrompter::new()),
    ))
}
