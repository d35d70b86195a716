use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::start::{StartOutcome, start_branch};

#[derive(Args, Debug, Clone)]
pub struct StartArgs {
    /// Short description of the work; turned into the branch name.
    #[arg(required = true, num_args = 1..)]
    pub summary: Vec<String>,
    /// Branch prefix, e.g. `feature` or `fix`.
    #[arg(short, long)]
    pub prefix: Option<String>,
}

pub fn run(ctx: &AppContext, args: StartArgs) -> AppResult<()> {
    let summary = args.summary.join(" ");
    match start_branch(ctx, args.prefix.as_deref(), &summary)? {
        StartOutcome::Created(branch) => println!("Created and switched to {}", branch.as_str()),
        StartOutcome::SwitchedToExisting(branch) => {
            println!("Switched to existing branch {}", branch.as_str())
        }
    }
    Ok(())
}
