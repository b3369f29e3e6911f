use tracing::info;

use crate::context::AppContext;
use crate::domain::ticket::{TicketDraft, TicketFields};
use crate::error::{AppError, AppResult};
use crate::workflow::tool_result;

/// Turns an extracted draft into creation fields. Gaps are filled from
/// configuration where possible; the issue type falls back to the
/// configured default and a missing description gets a generic sentence.
pub fn complete_draft(
    draft: &TicketDraft,
    default_project: Option<&str>,
    default_issue_type: &str,
) -> AppResult<TicketFields> {
    let project_key = draft
        .project_key
        .clone()
        .or_else(|| default_project.map(str::to_string));
    let summary = draft
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|summary| !summary.is_empty());

    let mut missing = Vec::new();
    if project_key.is_none() {
        missing.push("project key");
    }
    if summary.is_none() {
        missing.push("summary/title");
    }
    let (Some(project_key), Some(summary)) = (project_key, summary) else {
        return Err(AppError::InvalidInput(format!(
            "Could not determine the following fields: {}. Please provide all required information.",
            missing.join(", ")
        )));
    };

    let issue_type = draft
        .issue_type
        .map(|issue_type| issue_type.as_str().to_string())
        .unwrap_or_else(|| default_issue_type.to_string());
    let description = draft
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "This {} requires attention. Please see the summary for details.",
                issue_type.to_lowercase()
            )
        });

    Ok(TicketFields {
        project_key,
        summary: summary.to_string(),
        description,
        issue_type,
        assignee: draft.assignee.clone(),
    })
}

/// Validates fields entered through the `create` form.
pub fn form_fields(
    project_key: &str,
    summary: &str,
    description: &str,
    issue_type: &str,
    assignee: Option<&str>,
) -> AppResult<TicketFields> {
    let required = [
        ("project key", project_key),
        ("summary/title", summary),
        ("description", description),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::InvalidInput(format!("{field} is required")));
        }
    }

    Ok(TicketFields {
        project_key: project_key.trim().to_string(),
        summary: summary.trim().to_string(),
        description: description.trim().to_string(),
        issue_type: match issue_type.trim() {
            "" => "Task".to_string(),
            other => other.to_string(),
        },
        assignee: assignee
            .map(str::trim)
            .filter(|assignee| !assignee.is_empty())
            .map(str::to_string),
    })
}

/// Creates the ticket and returns the tool host's answer. Host failures are
/// surfaced as [`AppError::ToolHost`] so the CLI exits non-zero.
pub fn create_ticket(ctx: &AppContext, fields: &TicketFields) -> AppResult<String> {
    info!(project = %fields.project_key, issue_type = %fields.issue_type, "creating ticket");
    tool_result(ctx.jira.create_ticket(fields))
}

pub fn create_from_draft(ctx: &AppContext, draft: &TicketDraft) -> AppResult<String> {
    let fields = complete_draft(
        draft,
        ctx.config.default_project.as_deref(),
        &ctx.config.default_issue_type,
    )?;
    create_ticket(ctx, &fields)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::context::testing::context_with;
    use crate::domain::extract::extract_draft;
    use crate::domain::ticket::IssueType;
    use crate::services::tool_host::fake::FakeToolHost;

    #[test]
    fn completes_draft_with_defaults() {
        let draft = TicketDraft {
            summary: Some("Rotate API keys".to_string()),
            ..TicketDraft::default()
        };
        let fields = complete_draft(&draft, Some("OPS"), "Task").unwrap();
        assert_eq!(fields.project_key, "OPS");
        assert_eq!(fields.issue_type, "Task");
        assert_eq!(
            fields.description,
            "This task requires attention. Please see the summary for details."
        );
    }

    #[test]
    fn keeps_extracted_values() {
        let draft = TicketDraft {
            project_key: Some("KAN".to_string()),
            summary: Some("Fix login".to_string()),
            description: Some("Error on submit".to_string()),
            issue_type: Some(IssueType::Bug),
            assignee: Some("Pawan".to_string()),
        };
        let fields = complete_draft(&draft, Some("OPS"), "Task").unwrap();
        assert_eq!(fields.project_key, "KAN");
        assert_eq!(fields.issue_type, "Bug");
        assert_eq!(fields.description, "Error on submit");
        assert_eq!(fields.assignee.as_deref(), Some("Pawan"));
    }

    #[test]
    fn reports_undeterminable_fields() {
        let err = complete_draft(&TicketDraft::default(), None, "Task").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid input: Could not determine the following fields: project key, summary/title. Please provide all required information."
        );
    }

    #[test]
    fn form_requires_core_fields() {
        let err = form_fields("KAN", "Fix login", "  ", "Bug", None).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(message) if message == "description is required"));

        let fields = form_fields(" KAN ", "Fix login", "Broken", "", Some("")).unwrap();
        assert_eq!(fields.project_key, "KAN");
        assert_eq!(fields.issue_type, "Task");
        assert_eq!(fields.assignee, None);
    }

    #[test]
    fn creates_ticket_from_draft() {
        let host = Arc::new(FakeToolHost::new().reply("create_jira_ticket", "Ticket created: KAN-7"));
        let ctx = context_with(host.clone(), None);
        let draft = extract_draft("Create a bug in KAN titled 'Fix login' description 'Error on submit'");

        assert_eq!(create_from_draft(&ctx, &draft).unwrap(), "Ticket created: KAN-7");

        let calls = host.calls();
        assert_eq!(calls.len(), 1);
        let args = &calls[0].arguments;
        assert_eq!(args.get("project_key").map(String::as_str), Some("KAN"));
        assert_eq!(args.get("summary").map(String::as_str), Some("Fix login"));
        assert_eq!(args.get("description").map(String::as_str), Some("Error on submit"));
        assert_eq!(args.get("issue_type").map(String::as_str), Some("Bug"));
    }

    #[test]
    fn incomplete_text_never_reaches_host() {
        let host = Arc::new(FakeToolHost::new().reply("create_jira_ticket", "Ticket created: KAN-7"));
        let ctx = context_with(host.clone(), None);
        let err = create_from_draft(&ctx, &extract_draft("create a task please")).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn host_error_becomes_tool_host_error() {
        let host = Arc::new(FakeToolHost::new().fail("create_jira_ticket", "issue type is invalid"));
        let ctx = context_with(host, None);
        let fields = form_fields("KAN", "Fix login", "Broken", "Bug", None).unwrap();
        let err = create_ticket(&ctx, &fields).unwrap_err();
        assert_eq!(err.to_string(), "tool host error: issue type is invalid");
    }
}
