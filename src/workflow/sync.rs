use std::fmt;

use futures::future::try_join_all;

use crate::context::AppContext;
use crate::domain::branch::{SkipReason, skip_reason};
use crate::domain::description::{compose_body, render_fragment};
use crate::domain::keys::{extract_keys, extract_stamped_keys};
use crate::domain::ticket::TicketKey;
use crate::domain::update::needs_update;
use crate::error::AppResult;

const PULL_REQUEST_EVENT: &str = "pull_request";

/// Terminal result of one sync run. Every variant is a success from the
/// process's point of view; only `AppError` maps to a non-zero exit.
#[derive(Debug)]
pub enum SyncOutcome {
    NotPullRequestEvent,
    BranchSkipped { branch: String, reason: SkipReason },
    NoKeysFound,
    AlreadyUpToDate,
    Updated { keys: Vec<TicketKey> },
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::NotPullRequestEvent => {
                write!(f, "this tool is meant to run only on pull request events")
            }
            SyncOutcome::BranchSkipped { branch, reason } => {
                write!(f, "skipping branch '{branch}': {reason}")
            }
            SyncOutcome::NoKeysFound => {
                write!(f, "no ticket keys found in the PR title or branch name")
            }
            SyncOutcome::AlreadyUpToDate => {
                write!(f, "description already references the current tickets")
            }
            SyncOutcome::Updated { keys } => {
                let keys: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
                write!(f, "description updated with tickets {}", keys.join(", "))
            }
        }
    }
}

/// Reconciles the PR description against the ticket keys referenced by the
/// PR title (falling back to the head branch name), rewriting the managed
/// block only when the referenced set actually changed.
pub async fn sync_description(ctx: &AppContext) -> AppResult<SyncOutcome> {
    if ctx.config.event_name != PULL_REQUEST_EVENT {
        return Ok(SyncOutcome::NotPullRequestEvent);
    }

    let pr = ctx.pull_requests.pull_request(ctx.config.pr_number).await?;

    if let Some(reason) = skip_reason(&pr.head_branch, &ctx.config.branch_ignore_pattern)? {
        return Ok(SyncOutcome::BranchSkipped {
            branch: pr.head_branch,
            reason,
        });
    }
    println!(
        "branch '{}' matches no skip rule, continuing",
        pr.head_branch
    );

    let Some(keys) = extract_keys(&pr.title).or_else(|| extract_keys(&pr.head_branch)) else {
        return Ok(SyncOutcome::NoKeysFound);
    };

    let stamped = extract_stamped_keys(pr.body.as_deref());
    if !needs_update(&stamped, &keys) {
        return Ok(SyncOutcome::AlreadyUpToDate);
    }

    println!(
        "fetching details for tickets {}",
        keys.iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    // Unordered fan-out; try_join_all hands results back in key order, which
    // fixes the row order in the rendered table.
    let tickets = try_join_all(keys.iter().map(|key| ctx.issue_tracker.ticket_details(key))).await?;

    let fragment = render_fragment(&tickets);
    let new_body = compose_body(pr.body.as_deref().unwrap_or(""), &fragment);

    ctx.pull_requests
        .update_description(pr.number, &new_body)
        .await?;

    Ok(SyncOutcome::Updated { keys })
}
