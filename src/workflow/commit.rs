use tracing::info;

use crate::context::AppContext;
use crate::domain::change::ChangeBuckets;
use crate::domain::message::CommitMessage;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// Stage every change in the working tree first.
    pub stage_all: bool,
    /// Commit without asking for confirmation.
    pub assume_yes: bool,
    /// Only produce the message.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed(CommitMessage),
    Previewed(CommitMessage),
    Declined(CommitMessage),
}

pub fn commit_staged_changes(ctx: &AppContext, options: CommitOptions) -> AppResult<CommitOutcome> {
    let vcs = ctx.version_control.as_ref();
    if options.stage_all {
        vcs.stage_all()?;
    }

    let buckets = ChangeBuckets::from_name_status(&vcs.staged_changes()?);
    if buckets.is_empty() {
        return Err(AppError::VersionControl(
            "nothing staged to commit (use --all to stage every change)".to_string(),
        ));
    }
    info!(files = buckets.total(), "classified staged changes");

    let message = CommitMessage::from_buckets(&buckets);
    if options.dry_run {
        return Ok(CommitOutcome::Previewed(message));
    }

    let prompt = format!("Commit with subject \"{}\"?", message.subject);
    if !options.assume_yes && !ctx.prompter.confirm(&prompt, true)? {
        return Ok(CommitOutcome::Declined(message));
    }

    vcs.commit(&message)?;
    info!(subject = %message.subject, "created commit");
    Ok(CommitOutcome::Committed(message))
}
