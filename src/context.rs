use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{Prompter, PullRequestService, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    /// `None` when no token is configured; PR awareness is then disabled.
    pub pull_requests: Option<Arc<dyn PullRequestService>>,
    pub prompter: Arc<dyn Prompter>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        pull_requests: Option<Arc<dyn PullRequestService>>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            config,
            version_control,
            pull_requests,
            prompter,
        }
    }
}
