use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;
use serde_json::json;

use crate::config::RepoSlug;
use crate::error::{AppError, AppResult};
use crate::services::{PullRequestDetails, PullRequestService};

const API_BASE_URL: &str = "https://api.github.com";
const USER_AGENT_VALUE: &str = concat!("jiralink/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    repo: RepoSlug,
    auth_header: String,
}

impl GitHubClient {
    pub fn new(token: &str, repo: RepoSlug) -> Self {
        Self {
            http: Client::new(),
            repo,
            auth_header: format!("Bearer {token}"),
        }
    }

    fn pull_endpoint(&self, number: u64) -> String {
        format!(
            "{API_BASE_URL}/repos/{}/{}/pulls/{number}",
            self.repo.owner, self.repo.name
        )
    }

    async fn fail_from_response(
        context: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> AppError {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        AppError::SourceControl(format!("{context}: GitHub responded with {status}: {body}"))
    }
}

#[async_trait]
impl PullRequestService for GitHubClient {
    async fn pull_request(&self, number: u64) -> AppResult<PullRequestDetails> {
        let response = self
            .http
            .get(self.pull_endpoint(number))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|err| AppError::SourceControl(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::fail_from_response("fetching pull request", status, response).await);
        }

        let payload: PullResponse = response.json().await.map_err(|err| {
            AppError::SourceControl(format!("failed to parse GitHub response: {err}"))
        })?;

        Ok(PullRequestDetails {
            number: payload.number,
            title: payload.title.unwrap_or_default(),
            body: payload.body,
            head_branch: payload.head.branch,
        })
    }

    async fn update_description(&self, number: u64, body: &str) -> AppResult<()> {
        let response = self
            .http
            .patch(self.pull_endpoint(number))
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(&json!({ "body": body }))
            .send()
            .await
            .map_err(|err| AppError::SourceControl(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::fail_from_response("updating pull request", status, response).await);
        }

        Ok(())
    }
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    title: Option<String>,
    body: Option<String>,
    head: PullHead,
}

#[derive(Deserialize)]
struct PullHead {
    #[serde(rename = "ref")]
    branch: String,
}
