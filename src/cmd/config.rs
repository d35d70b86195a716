use std::io::{self, Write};
use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::{DEFAULT_GITHUB_API_URL, StoredConfig};
use crate::domain::branch::ProtectedBranches;
use crate::domain::pull_request::RepoSlug;
use crate::error::{AppError, AppResult};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand, config_path: &Path) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(config_path),
        ConfigCommand::Show => run_show(config_path),
    }
}

fn run_init(config_path: &Path) -> AppResult<()> {
    let mut cfg = StoredConfig::load(config_path)?;

    println!("Configuring gitty.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("The token is stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_prompt("GitHub token", &mut cfg.github_token, true)?;
    apply_prompt(
        "GitHub repository (owner/repo; empty to detect from origin)",
        &mut cfg.github_repo,
        false,
    )?;
    apply_prompt(
        &format!("GitHub API URL (default {DEFAULT_GITHUB_API_URL})"),
        &mut cfg.github_api_url,
        false,
    )?;

    let mut protected = cfg.protected_branches.as_ref().map(|names| names.join(", "));
    apply_prompt(
        "Protected branches (comma separated; release/* is always protected)",
        &mut protected,
        false,
    )?;
    cfg.protected_branches = protected
        .map(|value| split_list(&value))
        .filter(|names| !names.is_empty());

    if let Some(repo) = cfg.github_repo.as_deref() {
        if RepoSlug::parse(repo).is_none() {
            return Err(AppError::Configuration(format!(
                "github repository must look like 'owner/repo', got '{repo}'"
            )));
        }
    }

    cfg.save(config_path)?;
    println!("\nConfiguration saved to {}", config_path.display());
    Ok(())
}

fn run_show(config_path: &Path) -> AppResult<()> {
    let cfg = StoredConfig::load(config_path)?;

    println!("Configuration file: {}", config_path.display());
    println!("GitHub token: {}", mask_secret(&cfg.github_token));
    println!("GitHub repository: {}", display_value(&cfg.github_repo));
    println!("GitHub API URL: {}", display_value(&cfg.github_api_url));
    let protected = match &cfg.protected_branches {
        Some(names) if !names.is_empty() => names.join(", "),
        _ => ProtectedBranches::default().names().collect::<Vec<_>>().join(", ") + " (default)",
    };
    println!("Protected branches: {protected}, release/*");

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(PromptAction::parse(&input))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars = token.chars().collect::<Vec<_>>();
            let prefix = chars[..3].iter().collect::<String>();
            let suffix = chars[chars.len() - 3..].iter().collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}

impl PromptAction {
    fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PromptAction::Keep
        } else if trimmed == "-" {
            PromptAction::Clear
        } else {
            PromptAction::Set(trimmed.to_string())
        }
    }
}
