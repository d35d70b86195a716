use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::prune::{PruneOptions, PruneOutcome, prune_branches};

#[derive(Args, Debug, Clone)]
pub struct PruneArgs {
    /// Allow deleting branches that still have an open pull request.
    #[arg(long)]
    pub include_open_prs: bool,
    /// Do not look up open pull requests.
    #[arg(long, conflicts_with = "include_open_prs")]
    pub no_prs: bool,
}

pub async fn run(ctx: &AppContext, args: PruneArgs) -> AppResult<()> {
    let outcome = prune_branches(
        ctx,
        PruneOptions {
            include_open_prs: args.include_open_prs,
            skip_pull_requests: args.no_prs,
        },
    )
    .await?;

    match outcome {
        PruneOutcome::NoCandidates => println!("No branches available for deletion."),
        PruneOutcome::NothingSelected => println!("No branches selected."),
        PruneOutcome::Declined => println!("Nothing deleted."),
        PruneOutcome::Completed(report) => {
            for branch in &report.deleted {
                println!("Deleted {branch}");
            }
            for branch in &report.force_deleted {
                println!("Force deleted {branch}");
            }
            for failure in &report.remaining {
                eprintln!("Kept {}: {}", failure.branch, failure.reason);
            }
        }
    }
    Ok(())
}
