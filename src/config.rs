use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::branch::ProtectedBranches;
use crate::domain::pull_request::RepoSlug;
use crate::error::{AppError, AppResult};

const CONFIG_DIR_NAME: &str = "gitty";
const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Settings persisted in the user's config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_branches: Option<Vec<String>>,
}

impl StoredConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Self::default()),
            Ok(contents) => serde_json::from_str::<StoredConfig>(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

pub fn default_config_path() -> AppResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        AppError::Configuration("unable to determine the user config directory".to_string())
    })?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Runtime configuration, resolved once at the entry point.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workspace_root: PathBuf,
    pub config_path: PathBuf,
    pub github_token: Option<String>,
    pub github_repo: Option<RepoSlug>,
    pub github_api_url: String,
    pub protected: ProtectedBranches,
}

impl AppConfig {
    pub fn load(
        workspace_root: &Path,
        config_path: &Path,
        env_token: Option<String>,
    ) -> AppResult<Self> {
        let stored = StoredConfig::load(config_path)?;
        Self::from_stored(workspace_root, config_path, stored, env_token)
    }

    pub fn from_stored(
        workspace_root: &Path,
        config_path: &Path,
        stored: StoredConfig,
        env_token: Option<String>,
    ) -> AppResult<Self> {
        let github_repo = match stored.github_repo.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(RepoSlug::parse(value).ok_or_else(|| {
                AppError::Configuration(format!(
                    "github_repo must look like 'owner/repo', got '{value}'"
                ))
            })?),
            _ => None,
        };

        let protected = match stored.protected_branches {
            Some(names) if !names.is_empty() => ProtectedBranches::new(names),
            _ => ProtectedBranches::default(),
        };

        let github_token = stored
            .github_token
            .filter(|token| !token.trim().is_empty())
            .or_else(|| env_token.filter(|token| !token.trim().is_empty()));

        let github_api_url = stored
            .github_api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        Ok(Self {
            workspace_root: workspace_root.to_path_buf(),
            config_path: config_path.to_path_buf(),
            github_token,
            github_repo,
            github_api_url,
            protected,
        })
    }
}
