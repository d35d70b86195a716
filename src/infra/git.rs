use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::branch::BranchName;
use crate::domain::message::CommitMessage;
use crate::error::{AppError, AppResult};
use crate::services::{DeleteMode, VersionControlService};

/// Shells out to the `git` binary inside the workspace root.
pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new("git");
        command.current_dir(&self.workspace_root).args(args);
        command
    }

    fn run(&self, args: &[&str]) -> AppResult<String> {
        debug!(?args, root = %self.workspace_root.display(), "running git");
        let output = self.command(args).output().map_err(|err| {
            AppError::VersionControl(format!("failed to run git {}: {err}", args.join(" ")))
        })?;

        if !output.status.success() {
            return Err(AppError::VersionControl(failure_text(args, &output.stderr)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run_with_stdin(&self, args: &[&str], input: &str) -> AppResult<String> {
        debug!(?args, "running git with stdin");
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                AppError::VersionControl(format!("failed to run git {}: {err}", args.join(" ")))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(AppError::VersionControl(failure_text(args, &output.stderr)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn failure_text(args: &[&str], stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("git {} failed", args.join(" "))
    } else {
        stderr.to_string()
    }
}

fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl VersionControlService for GitCli {
    fn current_branch(&self) -> AppResult<Option<String>> {
        let name = self.run(&["branch", "--show-current"])?;
        let name = name.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    fn local_branches(&self) -> AppResult<Vec<String>> {
        let listing = self.run(&["for-each-ref", "--format=%(refname:lstrip=2)", "refs/heads"])?;
        Ok(non_empty_lines(&listing))
    }

    fn staged_changes(&self) -> AppResult<String> {
        self.run(&[
            "-c",
            "core.quotePath=false",
            "diff",
            "--cached",
            "--name-status",
            "-M",
            "-C",
        ])
    }

    fn stage_all(&self) -> AppResult<()> {
        self.run(&["add", "--all"])?;
        Ok(())
    }

    fn commit(&self, message: &CommitMessage) -> AppResult<()> {
        let text = format!("{}\n\n{}\n", message.subject, message.body());
        self.run_with_stdin(&["commit", "--file", "-"], &text)?;
        Ok(())
    }

    fn branch_exists(&self, branch: &BranchName) -> AppResult<bool> {
        let reference = format!("refs/heads/{}", branch.as_str());
        let output = self
            .command(&["show-ref", "--verify", "--quiet", &reference])
            .output()?;
        Ok(output.status.success())
    }

    fn create_branch(&self, branch: &BranchName) -> AppResult<()> {
        if branch.as_str().is_empty() {
            return Err(AppError::VersionControl(
                "branch name cannot be empty".to_string(),
            ));
        }
        self.run(&["checkout", "-b", branch.as_str()])?;
        Ok(())
    }

    fn checkout_branch(&self, branch: &BranchName) -> AppResult<()> {
        self.run(&["checkout", branch.as_str()])?;
        Ok(())
    }

    fn delete_branch(&self, branch: &str, mode: DeleteMode) -> AppResult<()> {
        let flag = match mode {
            DeleteMode::Safe => "-d",
            DeleteMode::Force => "-D",
        };
        self.run(&["branch", flag, branch])?;
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> AppResult<Option<String>> {
        let output = self.command(&["remote", "get-url", remote]).output()?;
        if !output.status.success() {
            debug!(remote, "remote not configured");
            return Ok(None);
        }
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok((!url.is_empty()).then_some(url))
    }
}
