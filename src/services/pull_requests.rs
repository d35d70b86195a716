use async_trait::async_trait;

use crate::domain::pull_request::{OpenPullRequest, RepoSlug};

/// Lookup of open pull requests. Implementations never fail: any error
/// yields an empty list, which callers treat as "no PR data".
#[async_trait]
pub trait PullRequestService: Send + Sync {
    async fn open_pull_requests(&self, repo: &RepoSlug) -> Vec<OpenPullRequest>;
}
