use tracing::info;

use crate::context::AppContext;
use crate::domain::branch::BranchName;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Created(BranchName),
    SwitchedToExisting(BranchName),
}

pub fn start_branch(ctx: &AppContext, prefix: Option<&str>, summary: &str) -> AppResult<StartOutcome> {
    if summary.trim().is_empty() {
        return Err(AppError::Configuration(
            "branch summary must not be empty".to_string(),
        ));
    }

    let branch = BranchName::from_summary(prefix, summary);
    if ctx.config.protected.is_protected(branch.as_str()) {
        return Err(AppError::Configuration(format!(
            "'{}' is a protected branch name",
            branch.as_str()
        )));
    }

    let vcs = ctx.version_control.as_ref();
    if vcs.branch_exists(&branch)? {
        vcs.checkout_branch(&branch)?;
        info!(branch = branch.as_str(), "switched to existing branch");
        return Ok(StartOutcome::SwitchedToExisting(branch));
    }

    vcs.create_branch(&branch)?;
    info!(branch = branch.as_str(), "created branch");
    Ok(StartOutcome::Created(branch))
}
