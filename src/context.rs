use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{IssueTrackerService, PullRequestService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub pull_requests: Arc<dyn PullRequestService>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        issue_tracker: Arc<dyn IssueTrackerService>,
        pull_requests: Arc<dyn PullRequestService>,
    ) -> Self {
        Self {
            config,
            issue_tracker,
            pull_requests,
        }
    }
}
