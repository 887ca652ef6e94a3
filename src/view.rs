use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};

/// Display model for the ticket list. Fetch completion produces one of these;
/// rendering is a pure function over the value, so the network path and the
/// display path stay independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Loaded(Vec<Ticket>),
    Failed(FetchFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The credential is missing or the tracker refused it.
    Authorization(String),
    /// The tracker answered, but with a non-success status.
    Remote(String),
    /// No response at all (DNS, TLS, timeout, connection reset).
    Network(String),
}

impl ListView {
    pub fn from_result(result: AppResult<Vec<Ticket>>) -> Self {
        match result {
            Ok(tickets) => ListView::Loaded(tickets),
            Err(err) => ListView::Failed(FetchFailure::from_error(err)),
        }
    }

    pub fn render(&self) -> String {
        match self {
            ListView::Loading => "Loading tickets...".to_string(),
            ListView::Loaded(tickets) if tickets.is_empty() => "No tickets.".to_string(),
            ListView::Loaded(tickets) => {
                let mut out = String::new();
                for ticket in tickets {
                    out.push_str(&render_ticket_line(ticket));
                    out.push('\n');
                }
                out.pop();
                out
            }
            ListView::Failed(FetchFailure::Authorization(message)) => {
                format!("Could not load tickets: authorization failed ({message}). Check your access token.")
            }
            ListView::Failed(FetchFailure::Remote(message)) => {
                format!("Could not load tickets: {message}")
            }
            ListView::Failed(FetchFailure::Network(message)) => {
                format!("Could not load tickets: network error ({message})")
            }
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        match self {
            ListView::Loaded(tickets) => tickets,
            _ => &[],
        }
    }
}

impl FetchFailure {
    pub fn from_error(err: AppError) -> Self {
        if err.is_authorization() {
            return FetchFailure::Authorization(err.to_string());
        }
        match err {
            AppError::Transport(message) => FetchFailure::Network(message),
            other => FetchFailure::Remote(other.to_string()),
        }
    }
}

fn render_ticket_line(ticket: &Ticket) -> String {
    format!("#{:<5} [{}] {}", ticket.id, ticket.state.as_str(), ticket.title)
}
