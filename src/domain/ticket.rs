use crate::error::{AppError, AppResult};

/// A user-reported issue as the remote tracker knows it. The id is the
/// tracker-assigned issue number; this crate never fabricates or reuses ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub state: TicketState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    Open,
    Closed,
}

impl TicketState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketState::Open => "open",
            TicketState::Closed => "closed",
        }
    }
}

/// Input pending submission. Discarded after a successful submission,
/// kept around for retry when the submission fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub body: String,
}

impl TicketDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("ticket title required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_with_title_is_valid() {
        let draft = TicketDraft::new("Printer broken", "No toner");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_without_title_is_rejected() {
        let draft = TicketDraft::new("   ", "body text");
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn state_names_match_the_wire_values() {
        assert_eq!(TicketState::Open.as_str(), "open");
        assert_eq!(TicketState::Closed.as_str(), "closed");
    }
}
