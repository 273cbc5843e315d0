mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::Parser;

use crate::config::{AppConfig, RawInputs};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::jira::JiraClient;
use crate::workflow::sync;

/// Keeps a pull request's description in sync with the Jira tickets its
/// title or branch name references.
#[derive(Parser)]
#[command(name = "jiralink", version, about)]
struct Cli {
    /// Jira API token, pre-encoded as base64(email:api_token) unless
    /// --encode-jira-token is set.
    #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
    jira_token: String,

    /// Base URL of the Jira instance, e.g. https://company.atlassian.net
    #[arg(long, env = "JIRA_BASE_URL")]
    jira_base_url: String,

    /// Base64-encode the Jira token before use.
    #[arg(long, env = "ENCODE_JIRA_TOKEN")]
    encode_jira_token: bool,

    /// GitHub token with permission to update the pull request.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,

    /// Repository the pull request lives in, as owner/name.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Number of the pull request to update.
    #[arg(long, env = "PR_NUMBER")]
    pr_number: u64,

    /// CI event that triggered this run; anything other than pull_request
    /// is a no-op.
    #[arg(long, env = "GITHUB_EVENT_NAME", default_value = "pull_request")]
    event_name: String,

    /// Regex of branch names to leave alone, in addition to the built-in
    /// bot and default-branch rules. Empty never matches.
    #[arg(long, env = "SKIP_BRANCHES", default_value = "")]
    skip_branches: String,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_inputs(RawInputs {
        jira_base_url: cli.jira_base_url,
        jira_token: cli.jira_token,
        encode_jira_token: cli.encode_jira_token,
        github_token: cli.github_token,
        repository: cli.repository,
        pr_number: cli.pr_number,
        event_name: cli.event_name,
        branch_ignore_pattern: cli.skip_branches,
    })?;

    let issue_tracker = Arc::new(JiraClient::new(
        config.jira_base_url.clone(),
        &config.jira_token,
        config.encode_jira_token,
    ));
    let pull_requests = Arc::new(GitHubClient::new(
        &config.github_token,
        config.repository.clone(),
    ));

    let context = AppContext::new(config, issue_tracker, pull_requests);

    let outcome = sync::sync_description(&context).await?;
    println!("{outcome}");

    Ok(())
}
