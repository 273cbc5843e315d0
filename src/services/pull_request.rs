use async_trait::async_trait;

use crate::error::AppResult;

/// The slice of pull-request metadata the sync workflow consumes.
#[derive(Debug, Clone)]
pub struct PullRequestDetails {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub head_branch: String,
}

#[async_trait]
pub trait PullRequestService: Send + Sync {
    async fn pull_request(&self, number: u64) -> AppResult<PullRequestDetails>;
    async fn update_description(&self, number: u64, body: &str) -> AppResult<()>;
}
