use async_trait::async_trait;

use crate::domain::ticket::{Ticket, TicketDraft};
use crate::error::AppResult;

/// The three operations the helpdesk needs from the remote tracker. The
/// tracker is the system of record; callers re-list after mutations rather
/// than trusting a mutation response.
#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    async fn create_ticket(&self, credential: &str, draft: &TicketDraft) -> AppResult<Ticket>;

    /// Returns tickets in whatever order the service chose; the order is
    /// passed through verbatim. An empty list is a valid result.
    async fn list_tickets(&self, credential: &str) -> AppResult<Vec<Ticket>>;

    /// Marks a ticket closed. The updated ticket is not returned; re-list to
    /// observe the transition.
    async fn close_ticket(&self, credential: &str, ticket_id: u64) -> AppResult<()>;
}
