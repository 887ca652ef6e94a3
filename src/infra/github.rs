use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::{Deserialize, Serialize};

use crate::domain::ticket::{Ticket, TicketDraft, TicketState};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const USER_AGENT: &str = concat!("helpdesk/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github+json";

pub struct GithubClient {
    http: Client,
    api_url: String,
    owner: String,
    repo: String,
}

impl GithubClient {
    pub fn new(api_url: String, owner: String, repo: String) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            api_url,
            owner,
            repo,
        })
    }

    fn issues_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    fn issue_endpoint(&self, ticket_id: u64) -> String {
        format!("{}/{}", self.issues_endpoint(), ticket_id)
    }

    fn require_credential(credential: &str) -> AppResult<()> {
        if credential.is_empty() {
            return Err(AppError::Unauthenticated);
        }
        Ok(())
    }

    fn bearer(credential: &str) -> String {
        format!("Bearer {credential}")
    }
}

#[async_trait]
impl IssueTrackerService for GithubClient {
    async fn create_ticket(&self, credential: &str, draft: &TicketDraft) -> AppResult<Ticket> {
        Self::require_credential(credential)?;
        draft.validate()?;

        let request_body = CreateIssueRequest {
            title: draft.title.trim(),
            body: &draft.body,
        };

        let response = self
            .http
            .post(self.issues_endpoint())
            .header(AUTHORIZATION, Self::bearer(credential))
            .header(ACCEPT, ACCEPT_JSON)
            .json(&request_body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        parse_ticket(&body)
    }

    async fn list_tickets(&self, credential: &str) -> AppResult<Vec<Ticket>> {
        Self::require_credential(credential)?;

        let response = self
            .http
            .get(self.issues_endpoint())
            .header(AUTHORIZATION, Self::bearer(credential))
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        parse_ticket_list(&body)
    }

    async fn close_ticket(&self, credential: &str, ticket_id: u64) -> AppResult<()> {
        Self::require_credential(credential)?;
        if ticket_id == 0 {
            return Err(AppError::Validation(
                "ticket id must be a positive number".to_string(),
            ));
        }

        let request_body = UpdateIssueRequest { state: "closed" };

        let response = self
            .http
            .patch(self.issue_endpoint(ticket_id))
            .header(AUTHORIZATION, Self::bearer(credential))
            .header(ACCEPT, ACCEPT_JSON)
            .json(&request_body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(transport)?;
            return Err(rejection(status, &body));
        }

        // Callers re-list to observe the new state; the response body is not
        // trusted as a view of the ticket.
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> AppError {
    AppError::Transport(err.to_string())
}

/// Non-2xx responses carry a structured `{"message": ...}` body on this API;
/// fall back to a generic line when the body is something else.
fn rejection(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorRepr>(body)
        .ok()
        .map(|repr| repr.message)
        .unwrap_or_else(|| "tracker request failed".to_string());

    AppError::RemoteRejected {
        status: status.as_u16(),
        message,
    }
}

fn parse_ticket(body: &str) -> AppResult<Ticket> {
    let repr: IssueRepr = serde_json::from_str(body)
        .map_err(|err| AppError::Transport(format!("unreadable tracker response: {err}")))?;
    Ok(repr.into_ticket())
}

fn parse_ticket_list(body: &str) -> AppResult<Vec<Ticket>> {
    let reprs: Vec<IssueRepr> = serde_json::from_str(body)
        .map_err(|err| AppError::Transport(format!("unreadable tracker response: {err}")))?;
    Ok(reprs.into_iter().map(IssueRepr::into_ticket).collect())
}

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct UpdateIssueRequest {
    state: &'static str,
}

#[derive(Deserialize)]
struct ErrorRepr {
    message: String,
}

#[derive(Deserialize)]
struct IssueRepr {
    number: u64,
    title: String,
    #[serde(default)]
    body: Option<String>,
    state: String,
}

impl IssueRepr {
    fn into_ticket(self) -> Ticket {
        // The tracker only emits "open" and "closed"; anything unexpected is
        // shown as open rather than failing the whole list.
        let state = if self.state == "closed" {
            TicketState::Closed
        } else {
            TicketState::Open
        };

        Ticket {
            id: self.number,
            title: self.title,
            body: self.body.unwrap_or_default(),
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_created_issue() {
        let body = r#"{"number":42,"title":"T","body":"B","state":"open"}"#;
        let ticket = parse_ticket(body).unwrap();
        assert_eq!(
            ticket,
            Ticket {
                id: 42,
                title: "T".to_string(),
                body: "B".to_string(),
                state: TicketState::Open,
            }
        );
    }

    #[test]
    fn null_body_becomes_empty_string() {
        let body = r#"{"number":7,"title":"No body","body":null,"state":"closed"}"#;
        let ticket = parse_ticket(body).unwrap();
        assert_eq!(ticket.body, "");
        assert_eq!(ticket.state, TicketState::Closed);
    }

    #[test]
    fn empty_array_is_an_empty_list_not_an_error() {
        let tickets = parse_ticket_list("[]").unwrap();
        assert!(tickets.is_empty());
    }

    #[test]
    fn list_order_is_passed_through_verbatim() {
        let body = r#"[
            {"number":3,"title":"c","body":"","state":"open"},
            {"number":1,"title":"a","body":"","state":"closed"},
            {"number":2,"title":"b","body":"","state":"open"}
        ]"#;
        let tickets = parse_ticket_list(body).unwrap();
        let ids: Vec<u64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn rejection_extracts_the_service_message() {
        let err = rejection(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"bad request"}"#);
        match err {
            AppError::RemoteRejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "bad request");
            }
            other => panic!("expected RemoteRejected, got {other:?}"),
        }
    }

    #[test]
    fn rejection_without_structured_body_is_generic() {
        let err = rejection(StatusCode::BAD_GATEWAY, "<html>upstream sad</html>");
        match err {
            AppError::RemoteRejected { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "tracker request failed");
            }
            other => panic!("expected RemoteRejected, got {other:?}"),
        }
    }

    #[test]
    fn unauthorized_rejection_reads_as_an_authorization_failure() {
        let err = rejection(StatusCode::UNAUTHORIZED, r#"{"message":"Bad credentials"}"#);
        assert!(err.is_authorization());
        let err = rejection(StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#);
        assert!(!err.is_authorization());
    }

    #[test]
    fn malformed_success_body_maps_to_transport() {
        assert!(matches!(
            parse_ticket("not json"),
            Err(AppError::Transport(_))
        ));
    }

    #[test]
    fn endpoints_are_built_from_the_configured_coordinates() {
        let client = GithubClient::new(
            "https://api.github.com/".to_string(),
            "acme".to_string(),
            "helpdesk".to_string(),
        )
        .unwrap();
        assert_eq!(
            client.issues_endpoint(),
            "https://api.github.com/repos/acme/helpdesk/issues"
        );
        assert_eq!(
            client.issue_endpoint(42),
            "https://api.github.com/repos/acme/helpdesk/issues/42"
        );
    }
}
