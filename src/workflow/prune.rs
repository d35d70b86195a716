use tracing::{debug, info};

use crate::context::AppContext;
use crate::domain::branch::deletion_candidates;
use crate::domain::pull_request::{OpenPullRequest, RepoSlug};
use crate::domain::reconcile::{BranchPrMatches, plan_deletion_choices};
use crate::error::AppResult;
use crate::services::{DeleteMode, SelectOption, VersionControlService};

const ORIGIN: &str = "origin";

#[derive(Debug, Clone, Default)]
pub struct PruneOptions {
    pub include_open_prs: bool,
    pub skip_pull_requests: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchFailure {
    pub branch: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<BranchFailure>,
}

impl BatchOutcome {
    pub fn failed_branches(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|failure| failure.branch.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
    pub force_deleted: Vec<String>,
    /// Branches still present when the flow ended, with the last error.
    pub remaining: Vec<BranchFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneOutcome {
    NoCandidates,
    NothingSelected,
    Declined,
    Completed(DeletionReport),
}

pub fn delete_batch(
    version_control: &dyn VersionControlService,
    branches: &[String],
    mode: DeleteMode,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for branch in branches {
        match version_control.delete_branch(branch, mode) {
            Ok(()) => {
                debug!(%branch, ?mode, "deleted branch");
                outcome.deleted.push(branch.clone());
            }
            Err(err) => {
                debug!(%branch, ?mode, error = %err, "branch deletion failed");
                outcome.failed.push(BranchFailure {
                    branch: branch.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }
    outcome
}

pub async fn prune_branches(ctx: &AppContext, options: PruneOptions) -> AppResult<PruneOutcome> {
    let vcs = ctx.version_control.as_ref();

    let branches = vcs.local_branches()?;
    let current = vcs.current_branch()?;
    let candidates = deletion_candidates(&branches, current.as_deref(), &ctx.config.protected);
    info!(
        total = branches.len(),
        candidates = candidates.len(),
        "listed deletion candidates"
    );
    if candidates.is_empty() {
        return Ok(PruneOutcome::NoCandidates);
    }

    let pull_requests = if options.skip_pull_requests {
        Vec::new()
    } else {
        fetch_pull_requests(ctx).await?
    };

    let matches = BranchPrMatches::correlate(&candidates, &pull_requests);
    info!(
        matched = matches.matched_count(),
        "correlated branches with open pull requests"
    );
    let choices = plan_deletion_choices(&candidates, &matches, options.include_open_prs);
    for choice in &choices {
        if let Some(pr) = &choice.pull_request {
            debug!(
                branch = %choice.branch,
                number = pr.number,
                url = %pr.url,
                "branch has an open pull request"
            );
        }
    }

    let select_options = choices
        .iter()
        .map(|choice| SelectOption {
            label: choice.label(),
            disabled: !choice.selectable,
        })
        .collect::<Vec<_>>();
    let picked = ctx
        .prompter
        .multi_select("Branches available for deletion:", &select_options)?;

    let selected = picked
        .into_iter()
        .filter_map(|index| choices.get(index))
        .filter(|choice| choice.selectable)
        .map(|choice| choice.branch.clone())
        .collect::<Vec<_>>();
    if selected.is_empty() {
        return Ok(PruneOutcome::NothingSelected);
    }

    let confirm = format!(
        "Delete {}: {}?",
        plural(selected.len(), "branch", "branches"),
        selected.join(", ")
    );
    if !ctx.prompter.confirm(&confirm, false)? {
        return Ok(PruneOutcome::Declined);
    }

    let safe = delete_batch(vcs, &selected, DeleteMode::Safe);
    let mut report = DeletionReport {
        deleted: safe.deleted.clone(),
        ..DeletionReport::default()
    };
    if safe.failed.is_empty() {
        return Ok(PruneOutcome::Completed(report));
    }

    let failed = safe.failed_branches();
    let confirm_force = format!(
        "{} could not be deleted safely ({}). Force delete?",
        plural(failed.len(), "branch", "branches"),
        failed.join(", ")
    );
    if !ctx.prompter.confirm(&confirm_force, false)? {
        report.remaining = safe.failed;
        return Ok(PruneOutcome::Completed(report));
    }

    let forced = delete_batch(vcs, &failed, DeleteMode::Force);
    report.force_deleted = forced.deleted;
    report.remaining = forced.failed;
    Ok(PruneOutcome::Completed(report))
}

async fn fetch_pull_requests(ctx: &AppContext) -> AppResult<Vec<OpenPullRequest>> {
    let Some(service) = &ctx.pull_requests else {
        info!("no GitHub token configured; skipping pull request lookup");
        return Ok(Vec::new());
    };

    let repo = match &ctx.config.github_repo {
        Some(repo) => Some(repo.clone()),
        None => ctx
            .version_control
            .remote_url(ORIGIN)?
            .as_deref()
            .and_then(RepoSlug::from_remote_url),
    };
    let Some(repo) = repo else {
        info!("could not determine the GitHub repository; skipping pull request lookup");
        return Ok(Vec::new());
    };

    Ok(service.open_pull_requests(&repo).await)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}
