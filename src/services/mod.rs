pub mod issue_tracker;
pub mod pull_request;

pub use issue_tracker::IssueTrackerService;
pub use pull_request::{PullRequestDetails, PullRequestService};
