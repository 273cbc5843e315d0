use async_trait::async_trait;

use crate::domain::ticket::{TicketDetails, TicketKey};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn ticket_details(&self, key: &TicketKey) -> AppResult<TicketDetails>;
}
