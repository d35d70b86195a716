use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::pull_request::{OpenPullRequest, RepoSlug};
use crate::error::{AppError, AppResult};
use crate::services::PullRequestService;

const PAGE_SIZE: u32 = 100;
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: String, token: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            token,
        }
    }

    fn pulls_endpoint(api_url: &str, repo: &RepoSlug) -> String {
        format!(
            "{}/repos/{}/{}/pulls",
            api_url.trim_end_matches('/'),
            repo.owner,
            repo.repo
        )
    }

    async fn fetch(&self, repo: &RepoSlug) -> AppResult<Vec<OpenPullRequest>> {
        let response = self
            .http
            .get(Self::pulls_endpoint(&self.api_url, repo))
            .query(&[("state", "open".to_string()), ("per_page", PAGE_SIZE.to_string())])
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(USER_AGENT, concat!("gitty/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|err| AppError::PullRequests(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::PullRequests(format!(
                "GitHub responded with {status}: {body}"
            )));
        }

        let payload: Vec<GitHubPull> = response.json().await.map_err(|err| {
            AppError::PullRequests(format!("failed to parse GitHub response: {err}"))
        })?;

        Ok(payload.into_iter().map(OpenPullRequest::from).collect())
    }
}

#[async_trait]
impl PullRequestService for GitHubClient {
    async fn open_pull_requests(&self, repo: &RepoSlug) -> Vec<OpenPullRequest> {
        match self.fetch(repo).await {
            Ok(pulls) => {
                debug!(%repo, count = pulls.len(), "fetched open pull requests");
                pulls
            }
            Err(err) => {
                warn!(%repo, error = %err, "pull request lookup failed; continuing without PR data");
                Vec::new()
            }
        }
    }
}

#[derive(Deserialize)]
struct GitHubPull {
    number: u64,
    title: String,
    html_url: String,
    #[serde(default)]
    draft: bool,
    head: GitHubRef,
}

#[derive(Deserialize)]
struct GitHubRef {
    #[serde(rename = "ref")]
    name: String,
}

impl From<GitHubPull> for OpenPullRequest {
    fn from(pull: GitHubPull) -> Self {
        Self {
            number: pull.number,
            title: pull.title,
            url: pull.html_url,
            is_draft: pull.draft,
            head_ref: pull.head.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serves one canned HTTP response and returns the base URL.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn builds_pulls_endpoint() {
        let repo = RepoSlug::parse("acme/widgets").unwrap();
        assert_eq!(
            GitHubClient::pulls_endpoint("https://api.github.com/", &repo),
            "https://api.github.com/repos/acme/widgets/pulls"
        );
    }

    #[test]
    fn maps_api_payload() {
        let body = r#"[
            {
                "number": 42,
                "title": "Add parser",
                "html_url": "https://github.com/acme/widgets/pull/42",
                "draft": true,
                "state": "open",
                "head": { "ref": "feature/parser", "sha": "abc123" }
            },
            {
                "number": 43,
                "title": "Fix typo",
                "html_url": "https://github.com/acme/widgets/pull/43",
                "head": { "ref": "fix/typo" }
            }
        ]"#;

        let pulls = serde_json::from_str::<Vec<GitHubPull>>(body)
            .unwrap()
            .into_iter()
            .map(OpenPullRequest::from)
            .collect::<Vec<_>>();

        assert_eq!(
            pulls[0],
            OpenPullRequest {
                number: 42,
                title: "Add parser".to_string(),
                url: "https://github.com/acme/widgets/pull/42".to_string(),
                is_draft: true,
                head_ref: "feature/parser".to_string(),
            }
        );
        assert!(!pulls[1].is_draft);
        assert_eq!(pulls[1].head_ref, "fix/typo");
    }

    #[tokio::test]
    async fn unreachable_api_degrades_to_empty_list() {
        let client = GitHubClient::new("http://127.0.0.1:9".to_string(), "token".to_string());
        let repo = RepoSlug::parse("acme/widgets").unwrap();
        assert!(client.open_pull_requests(&repo).await.is_empty());
    }

    #[tokio::test]
    async fn error_status_degrades_to_empty_list() {
        let url = serve_once("401 Unauthorized", r#"{"message":"Bad credentials"}"#);
        let client = GitHubClient::new(url, "token".to_string());
        let repo = RepoSlug::parse("acme/widgets").unwrap();
        assert!(client.open_pull_requests(&repo).await.is_empty());
    }

    #[tokio::test]
    async fn unparseable_payload_degrades_to_empty_list() {
        let url = serve_once("200 OK", "<html>not json</html>");
        let client = GitHubClient::new(url, "token".to_string());
        let repo = RepoSlug::parse("acme/widgets").unwrap();
        assert!(client.open_pull_requests(&repo).await.is_empty());
    }

    #[tokio::test]
    async fn served_payload_is_mapped() {
        let url = serve_once(
            "200 OK",
            r#"[{"number":7,"title":"Wip","html_url":"https://github.com/acme/widgets/pull/7","draft":true,"head":{"ref":"feature/wip"}}]"#,
        );
        let client = GitHubClient::new(url, "token".to_string());
        let repo = RepoSlug::parse("acme/widgets").unwrap();
        let pulls = client.open_pull_requests(&repo).await;
        assert_eq!(pulls.len(), 1);
        assert_eq!(pulls[0].head_ref, "feature/wip");
        assert!(pulls[0].is_draft);
    }
}
