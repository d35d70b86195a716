use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::error::AppResult;

/// Safe deletion only removes fully merged branches; forced deletion
/// removes the branch unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    Safe,
    Force,
}

/// The version-control operations the workflows rely on. Every call either
/// returns the tool's output or fails with its error text.
pub trait VersionControlService: Send + Sync {
    /// `None` on a detached HEAD.
    fn current_branch(&self) -> AppResult<Option<String>>;
    fn local_branches(&self) -> AppResult<Vec<String>>;
    /// Staged changes as `status<TAB>path` / `status<TAB>from<TAB>to` lines.
    fn staged_changes(&self) -> AppResult<String>;
    fn stage_all(&self) -> AppResult<()>;
    fn commit(&self, message: &CommitMessage) -> AppResult<()>;
    fn branch_exists(&self, branch: &BranchName) -> AppResult<bool>;
    fn create_branch(&self, branch: &BranchName) -> AppResult<()>;
    fn checkout_branch(&self, branch: &BranchName) -> AppResult<()>;
    fn delete_branch(&self, branch: &str, mode: DeleteMode) -> AppResult<()>;
    fn remote_url(&self, remote: &str) -> AppResult<Option<String>>;
}
