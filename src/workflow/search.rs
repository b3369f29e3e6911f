use serde::Deserialize;
use tracing::info;

use crate::adapter::{ERROR_PREFIX, is_error_text};
use crate::context::AppContext;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
}

pub fn run_search(ctx: &AppContext, jql: &str) -> String {
    info!(%jql, "searching tickets");
    humanize_search_error(ctx.jira.search(jql))
}

/// Rewrites a raw Jira `errorMessages` payload into one readable line.
/// Anything that is not such a payload passes through untouched.
pub fn humanize_search_error(result: String) -> String {
    if !is_error_text(&result) {
        return result;
    }
    let body = result.trim_start_matches(ERROR_PREFIX).trim();
    let Ok(parsed) = serde_json::from_str::<JiraErrorBody>(body) else {
        return result;
    };
    let Some(message) = parsed.error_messages.first() else {
        return result;
    };

    if message.contains("does not exist for the field 'project'") {
        "Error: Could not find the specified project. Please check the project key.".to_string()
    } else if message.contains("does not exist for the field 'assignee'") {
        "Error: Could not find the specified assignee. Please check the assignee name.".to_string()
    } else {
        format!("{ERROR_PREFIX} {message}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::context::testing::context_with;
    use crate::services::tool_host::fake::FakeToolHost;

    #[test]
    fn passes_results_through() {
        assert_eq!(
            humanize_search_error("Found tickets: KAN-1".to_string()),
            "Found tickets: KAN-1"
        );
        assert_eq!(
            humanize_search_error("Error: connection refused".to_string()),
            "Error: connection refused"
        );
    }

    #[test]
    fn rewrites_jira_error_payloads() {
        let raw = r#"Error: {"errorMessages":["The value 'NOPE' does not exist for the field 'project'."],"errors":{}}"#;
        assert_eq!(
            humanize_search_error(raw.to_string()),
            "Error: Could not find the specified project. Please check the project key."
        );

        let raw = r#"Error: {"errorMessages":["Error in the JQL Query: Expecting operator."]}"#;
        assert_eq!(
            humanize_search_error(raw.to_string()),
            "Error: Error in the JQL Query: Expecting operator."
        );
    }

    #[test]
    fn sends_query_parameter() {
        let host = Arc::new(FakeToolHost::new().reply("search_jira_tickets", "No tickets found"));
        let ctx = context_with(host.clone(), None);
        assert_eq!(run_search(&ctx, "project = KAN"), "No tickets found");
        assert_eq!(
            host.calls()[0].arguments.get("query").map(String::as_str),
            Some("project = KAN")
        );
    }
}
