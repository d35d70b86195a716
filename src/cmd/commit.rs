use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::commit::{CommitOptions, CommitOutcome, commit_staged_changes};

#[derive(Args, Debug, Clone)]
pub struct CommitArgs {
    /// Stage all changes (including untracked files) before summarizing.
    #[arg(short, long)]
    pub all: bool,
    /// Commit without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,
    /// Print the generated message without committing.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &AppContext, args: CommitArgs) -> AppResult<()> {
    let outcome = commit_staged_changes(
        ctx,
        CommitOptions {
            stage_all: args.all,
            assume_yes: args.yes,
            dry_run: args.dry_run,
        },
    )?;

    match outcome {
        CommitOutcome::Committed(message) => println!("Committed: {}", message.subject),
        CommitOutcome::Previewed(message) => {
            println!("{}\n\n{}", message.subject, message.body());
        }
        CommitOutcome::Declined(_) => println!("Commit cancelled."),
    }
    Ok(())
}
