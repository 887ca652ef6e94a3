use std::io::{self, Write};

use crate::context::AppContext;
use crate::domain::ticket::TicketDraft;
use crate::error::AppResult;
use crate::view::ListView;
use crate::workflow::TicketWorkflow;

/// Interactive session: prompt for a token, fetch the list, then loop over
/// user actions until `quit`. Action failures are printed and the loop keeps
/// going; only a closed stdin or a local IO failure ends it early.
pub async fn run(ctx: &AppContext) -> AppResult<()> {
    let mut workflow = TicketWorkflow::new(ctx.issue_tracker.clone());
    let mut pending: Option<TicketDraft> = None;

    println!("Helpdesk console for {}.", ctx.config.repo_slug());

    loop {
        let token = prompt("Access token")?;
        println!("{}", ListView::Loading.render());
        match workflow.login(&token).await {
            Ok(view) => {
                println!("{}", view.render());
                break;
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    println!("Commands: list, new, close <id>, retry, quit.");

    loop {
        let line = prompt(">")?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => {}
            Some("list") => {
                println!("{}", ListView::Loading.render());
                println!("{}", workflow.refresh().await.render());
            }
            Some("new") => {
                let title = prompt("Title")?;
                let body = prompt("Body")?;
                submit(&workflow, TicketDraft::new(title, body), &mut pending).await;
            }
            Some("retry") => match pending.take() {
                Some(draft) => submit(&workflow, draft, &mut pending).await,
                None => println!("No pending draft to retry."),
            },
            Some("close") => match parts.next().and_then(|raw| raw.parse::<u64>().ok()) {
                Some(id) => match workflow.close(id).await {
                    Ok(view) => {
                        println!("Ticket #{id} closed.");
                        println!("{}", view.render());
                    }
                    // The displayed list stays as it was; nothing is retried.
                    Err(err) => eprintln!("alert: could not close ticket #{id}: {err}"),
                },
                None => println!("Usage: close <id>"),
            },
            Some("quit") | Some("exit") => return Ok(()),
            Some(other) => println!("Unknown command '{other}'."),
        }
    }
}

async fn submit(
    workflow: &TicketWorkflow,
    draft: TicketDraft,
    pending: &mut Option<TicketDraft>,
) {
    match workflow.submit(&draft).await {
        Ok(ticket) => {
            println!("Ticket #{} filed. Run 'list' to refresh.", ticket.id);
            *pending = None;
        }
        Err(err) => {
            eprintln!("Submission failed: {err}");
            eprintln!("Draft kept; 'retry' submits it again.");
            *pending = Some(draft);
        }
    }
}

fn prompt(label: &str) -> AppResult<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{label}: ")?;
    stdout.flush()?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
    }
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
