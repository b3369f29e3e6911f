use clap::Args;

use crate::context::AppContext;
use crate::domain::intent::scope_to_project;
use crate::error::AppResult;
use crate::workflow::search::run_search;
use crate::workflow::tool_result;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// JQL search query.
    #[arg(short, long)]
    pub query: String,
    /// Project key to limit the search to.
    #[arg(short, long)]
    pub project: Option<String>,
}

pub fn run(ctx: &AppContext, args: SearchArgs) -> AppResult<String> {
    let jql = scope_to_project(args.query.trim(), args.project.as_deref());
    tool_result(run_search(ctx, &jql))
}
