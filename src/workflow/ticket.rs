use std::sync::Arc;

use crate::domain::ticket::{Ticket, TicketDraft};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;
use crate::session::Session;
use crate::view::ListView;

/// Orchestrates the login / submit / list / close loop against the tracker.
/// Owns the session outright so no credential lives in global state, and
/// returns `ListView` values instead of rendering anything itself.
pub struct TicketWorkflow {
    session: Session,
    tracker: Arc<dyn IssueTrackerService>,
}

impl TicketWorkflow {
    pub fn new(tracker: Arc<dyn IssueTrackerService>) -> Self {
        Self {
            session: Session::new(),
            tracker,
        }
    }

    /// Stores the credential without touching the network. One-shot commands
    /// use this; the interactive flow goes through `login`.
    pub fn authenticate(&mut self, token: &str) -> AppResult<()> {
        self.session.login(token)
    }

    /// Stores the credential and immediately fetches the list. An empty token
    /// propagates the validation error and no fetch happens.
    pub async fn login(&mut self, token: &str) -> AppResult<ListView> {
        self.session.login(token)?;
        Ok(self.refresh().await)
    }

    /// Files a new ticket. On success the draft is done with; the displayed
    /// list is deliberately left stale until the next refresh. On failure the
    /// error propagates and the caller keeps the draft for retry.
    pub async fn submit(&self, draft: &TicketDraft) -> AppResult<Ticket> {
        let credential = self.credential()?;
        draft.validate()?;
        self.tracker.create_ticket(credential, draft).await
    }

    /// Re-fetches the full list from the tracker, folding any failure into the
    /// view. Overlapping refreshes are not sequenced; the last one to complete
    /// wins.
    pub async fn refresh(&self) -> ListView {
        let result = match self.credential() {
            Ok(credential) => self.tracker.list_tickets(credential).await,
            Err(err) => Err(err),
        };
        ListView::from_result(result)
    }

    /// Closes a ticket and, on success, returns a freshly fetched view. On
    /// failure the error propagates and the previously displayed list stays
    /// stale; nothing is retried.
    pub async fn close(&self, ticket_id: u64) -> AppResult<ListView> {
        let credential = self.credential()?;
        self.tracker.close_ticket(credential, ticket_id).await?;
        Ok(self.refresh().await)
    }

    fn credential(&self) -> AppResult<&str> {
        self.session.credential().ok_or(AppError::Unauthenticated)
    }
}
