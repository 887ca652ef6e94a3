use std::env;

use clap::Args;

use crate::cache::PendingDraftCache;
use crate::context::AppContext;
use crate::domain::ticket::TicketDraft;
use crate::error::{AppError, AppResult};
use crate::view::ListView;
use crate::workflow::TicketWorkflow;

#[derive(Args, Debug, Clone)]
pub struct TokenArg {
    /// Access token for the tracker; falls back to HELPDESK_TOKEN.
    #[arg(short, long)]
    pub token: Option<String>,
}

impl TokenArg {
    fn resolve(self) -> String {
        self.token
            .or_else(|| env::var("HELPDESK_TOKEN").ok())
            .unwrap_or_default()
    }
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub auth: TokenArg,
    /// Ticket title.
    #[arg(short = 'T', long)]
    pub title: Option<String>,
    /// Ticket body text.
    #[arg(short, long, default_value = "")]
    pub body: String,
    /// Re-submit the draft kept from the last failed submission.
    #[arg(long)]
    pub retry: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub auth: TokenArg,
}

#[derive(Args, Debug, Clone)]
pub struct CloseArgs {
    #[command(flatten)]
    pub auth: TokenArg,
    /// Ticket id, as shown in the list output.
    pub id: u64,
}

pub async fn submit(ctx: &AppContext, args: SubmitArgs) -> AppResult<()> {
    let mut cache = PendingDraftCache::load()?;
    let slug = ctx.config.repo_slug();

    let draft = if args.retry {
        cache.get(&slug).ok_or_else(|| {
            AppError::Validation("no pending draft to retry for this repository".to_string())
        })?
    } else {
        let title = args
            .title
            .ok_or_else(|| AppError::Validation("ticket title required (--title)".to_string()))?;
        TicketDraft::new(title, args.body)
    };

    let mut workflow = TicketWorkflow::new(ctx.issue_tracker.clone());
    workflow.authenticate(&args.auth.resolve())?;

    match workflow.submit(&draft).await {
        Ok(ticket) => {
            cache.clear(&slug);
            cache.save()?;
            println!("Ticket #{} filed: {}", ticket.id, ticket.title);
            Ok(())
        }
        Err(err) => {
            cache.store(&slug, &draft);
            cache.save()?;
            eprintln!("Draft kept; retry with 'helpdesk submit --retry'.");
            Err(err)
        }
    }
}

pub async fn list(ctx: &AppContext, args: ListArgs) -> AppResult<()> {
    let mut workflow = TicketWorkflow::new(ctx.issue_tracker.clone());
    workflow.authenticate(&args.auth.resolve())?;

    println!("{}", ListView::Loading.render());
    println!("{}", workflow.refresh().await.render());
    Ok(())
}

pub async fn close(ctx: &AppContext, args: CloseArgs) -> AppResult<()> {
    let mut workflow = TicketWorkflow::new(ctx.issue_tracker.clone());
    workflow.authenticate(&args.auth.resolve())?;

    let view = workflow.close(args.id).await?;
    println!("Ticket #{} closed.", args.id);
    println!("{}", view.render());
    Ok(())
}
