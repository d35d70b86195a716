pub mod prompt;
pub mod pull_requests;
pub mod version_control;

pub use prompt::{Prompter, SelectOption};
pub use pull_requests::PullRequestService;
pub use version_control::{DeleteMode, VersionControlService};
