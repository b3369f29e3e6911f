use clap::Args;

use crate::context::AppContext;
use crate::domain::extract::extract_draft;
use crate::error::{AppError, AppResult};
use crate::workflow::ticket::{self, form_fields};
use crate::workflow::tool_result;

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Project key (e.g., KAN). Falls back to the configured default project.
    #[arg(short, long)]
    pub project: Option<String>,
    /// Ticket title/summary.
    #[arg(short, long)]
    pub title: String,
    /// Ticket description.
    #[arg(short, long)]
    pub description: String,
    /// Issue type. Falls back to the configured default issue type.
    #[arg(short = 'y', long = "type")]
    pub issue_type: Option<String>,
    /// Assignee name or account ID.
    #[arg(short, long)]
    pub assignee: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GetArgs {
    /// Ticket key (e.g., KAN-1).
    #[arg(short, long)]
    pub id: String,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Free-text request to parse, e.g. "Create a bug in KAN titled 'Fix login'".
    #[arg(required = true)]
    pub text: Vec<String>,
}

pub fn run_create(ctx: &AppContext, args: CreateArgs) -> AppResult<String> {
    let project = args
        .project
        .or_else(|| ctx.config.default_project.clone())
        .unwrap_or_default();
    let issue_type = args
        .issue_type
        .unwrap_or_else(|| ctx.config.default_issue_type.clone());
    let fields = form_fields(
        &project,
        &args.title,
        &args.description,
        &issue_type,
        args.assignee.as_deref(),
    )?;
    ticket::create_ticket(ctx, &fields)
}

pub fn run_get(ctx: &AppContext, args: GetArgs) -> AppResult<String> {
    let key = args.id.trim();
    if key.is_empty() {
        return Err(AppError::InvalidInput("ticket ID is required".to_string()));
    }
    tool_result(ctx.jira.get_ticket(key))
}

pub fn run_extract(args: ExtractArgs) -> AppResult<String> {
    let draft = extract_draft(&args.text.join(" "));
    serde_json::to_string_pretty(&draft)
        .map_err(|err| AppError::InvalidInput(format!("failed to render draft: {err}")))
}
