use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{AppConfig, StoredConfig};
use crate::context::AppContext;
use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::domain::pull_request::{OpenPullRequest, RepoSlug};
use crate::error::{AppError, AppResult};
use crate::services::{
    DeleteMode, Prompter, PullRequestService, SelectOption, VersionControlService,
};

/// In-memory repository that records every mutating call.
#[derive(Default)]
pub struct FakeGit {
    pub current: Option<String>,
    pub branches: Mutex<Vec<String>>,
    pub staged: Mutex<String>,
    pub unstaged: String,
    pub remote: Option<String>,
    /// Branches whose safe delete fails as "not fully merged".
    pub unmerged: HashSet<String>,
    /// Branches whose forced delete fails too.
    pub undeletable: HashSet<String>,
    pub deleted: Mutex<Vec<(String, DeleteMode)>>,
    pub commits: Mutex<Vec<CommitMessage>>,
    pub checkouts: Mutex<Vec<String>>,
}

impl FakeGit {
    pub fn with_branches(current: Option<&str>, branches: &[&str]) -> Self {
        Self {
            current: current.map(str::to_string),
            branches: Mutex::new(branches.iter().map(|name| name.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn deleted(&self) -> Vec<(String, DeleteMode)> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn commits(&self) -> Vec<CommitMessage> {
        self.commits.lock().unwrap().clone()
    }
}

impl VersionControlService for FakeGit {
    fn current_branch(&self) -> AppResult<Option<String>> {
        Ok(self.current.clone())
    }

    fn local_branches(&self) -> AppResult<Vec<String>> {
        Ok(self.branches.lock().unwrap().clone())
    }

    fn staged_changes(&self) -> AppResult<String> {
        Ok(self.staged.lock().unwrap().clone())
    }

    fn stage_all(&self) -> AppResult<()> {
        let mut staged = self.staged.lock().unwrap();
        staged.push_str(&self.unstaged);
        Ok(())
    }

    fn commit(&self, message: &CommitMessage) -> AppResult<()> {
        self.commits.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn branch_exists(&self, branch: &BranchName) -> AppResult<bool> {
        Ok(self
            .branches
            .lock()
            .unwrap()
            .iter()
            .any(|name| name == branch.as_str()))
    }

    fn create_branch(&self, branch: &BranchName) -> AppResult<()> {
        self.branches.lock().unwrap().push(branch.as_str().to_string());
        self.checkouts.lock().unwrap().push(branch.as_str().to_string());
        Ok(())
    }

    fn checkout_branch(&self, branch: &BranchName) -> AppResult<()> {
        self.checkouts.lock().unwrap().push(branch.as_str().to_string());
        Ok(())
    }

    fn delete_branch(&self, branch: &str, mode: DeleteMode) -> AppResult<()> {
        let refused = match mode {
            DeleteMode::Safe => self.unmerged.contains(branch) || self.undeletable.contains(branch),
            DeleteMode::Force => self.undeletable.contains(branch),
        };
        if refused {
            return Err(AppError::VersionControl(format!(
                "error: the branch '{branch}' is not fully merged"
            )));
        }
        self.deleted.lock().unwrap().push((branch.to_string(), mode));
        Ok(())
    }

    fn remote_url(&self, _remote: &str) -> AppResult<Option<String>> {
        Ok(self.remote.clone())
    }
}

/// Replays canned answers and records what was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    selections: Mutex<VecDeque<Vec<usize>>>,
    confirmations: Mutex<VecDeque<bool>>,
    pub shown: Mutex<Vec<Vec<SelectOption>>>,
    pub confirm_prompts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(selections: Vec<Vec<usize>>, confirmations: Vec<bool>) -> Self {
        Self {
            selections: Mutex::new(selections.into()),
            confirmations: Mutex::new(confirmations.into()),
            ..Self::default()
        }
    }

    pub fn shown(&self) -> Vec<Vec<SelectOption>> {
        self.shown.lock().unwrap().clone()
    }

    pub fn confirm_prompts(&self) -> Vec<String> {
        self.confirm_prompts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn multi_select(&self, _prompt: &str, options: &[SelectOption]) -> AppResult<Vec<usize>> {
        self.shown.lock().unwrap().push(options.to_vec());
        self.selections
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::Prompt("unexpected selection prompt".to_string()))
    }

    fn confirm(&self, prompt: &str, _default: bool) -> AppResult<bool> {
        self.confirm_prompts.lock().unwrap().push(prompt.to_string());
        self.confirmations
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::Prompt(format!("unexpected confirmation: {prompt}")))
    }
}

pub struct StaticPullRequests(pub Vec<OpenPullRequest>);

#[async_trait]
impl PullRequestService for StaticPullRequests {
    async fn open_pull_requests(&self, _repo: &RepoSlug) -> Vec<OpenPullRequest> {
        self.0.clone()
    }
}

pub fn pull_request(number: u64, head_ref: &str) -> OpenPullRequest {
    OpenPullRequest {
        number,
        title: format!("Work on {head_ref}"),
        url: format!("https://github.com/acme/widgets/pull/{number}"),
        is_draft: false,
        head_ref: head_ref.to_string(),
    }
}

pub fn test_config(github_repo: Option<&str>) -> AppConfig {
    let stored = StoredConfig {
        github_repo: github_repo.map(str::to_string),
        ..StoredConfig::default()
    };
    AppConfig::from_stored(
        Path::new("/work"),
        Path::new("/config.json"),
        stored,
        Some("token".to_string()),
    )
    .unwrap()
}

pub fn context(
    git: Arc<FakeGit>,
    pull_requests: Option<Arc<dyn PullRequestService>>,
    prompter: Arc<ScriptedPrompter>,
) -> AppContext {
    AppContext::new(test_config(Some("acme/widgets")), git, pull_requests, prompter)
}
