//! Names and parameter spellings of the Jira tools exposed by the tool host.

use crate::adapter::ToolAdapter;
use crate::domain::ticket::TicketFields;
use crate::domain::tool::ToolCall;

pub const CREATE_TICKET: &str = "create_jira_ticket";
pub const SEARCH_TICKETS: &str = "search_jira_tickets";
pub const GET_TICKET: &str = "get_jira_ticket";

pub struct JiraTools {
    adapter: ToolAdapter,
}

impl JiraTools {
    pub fn new(adapter: ToolAdapter) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &ToolAdapter {
        &self.adapter
    }

    pub fn create_ticket(&self, fields: &TicketFields) -> String {
        self.adapter.invoke(&create_ticket_call(fields))
    }

    pub fn search(&self, jql: &str) -> String {
        self.adapter.invoke(&search_call(jql))
    }

    pub fn get_ticket(&self, issue_key: &str) -> String {
        self.adapter.invoke(&get_ticket_call(issue_key))
    }
}

pub fn create_ticket_call(fields: &TicketFields) -> ToolCall {
    let call = ToolCall::new(CREATE_TICKET)
        .arg("project_key", fields.project_key.as_str())
        .arg("summary", fields.summary.as_str())
        .arg("description", fields.description.as_str())
        .arg("issue_type", fields.issue_type.as_str());
    match &fields.assignee {
        Some(assignee) => call.arg("assignee", assignee.as_str()),
        None => call,
    }
}

pub fn search_call(jql: &str) -> ToolCall {
    ToolCall::new(SEARCH_TICKETS).arg("query", jql)
}

pub fn get_ticket_call(issue_key: &str) -> ToolCall {
    ToolCall::new(GET_TICKET).arg("issue_key", issue_key.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_call_uses_host_parameter_names() {
        let fields = TicketFields {
            project_key: "KAN".to_string(),
            summary: "Fix login".to_string(),
            description: "Error on submit".to_string(),
            issue_type: "Bug".to_string(),
            assignee: None,
        };
        let call = create_ticket_call(&fields);
        assert_eq!(call.name, "create_jira_ticket");
        let keys: Vec<&str> = call.arguments.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["description", "issue_type", "project_key", "summary"]);

        let call = create_ticket_call(&TicketFields {
            assignee: Some("Pawan Kumar".to_string()),
            ..fields
        });
        assert_eq!(
            call.arguments.get("assignee").map(String::as_str),
            Some("Pawan Kumar")
        );
    }

    #[test]
    fn get_call_trims_issue_key() {
        let call = get_ticket_call(" KAN-9 ");
        assert_eq!(call.name, "get_jira_ticket");
        assert_eq!(call.arguments.get("issue_key").map(String::as_str), Some("KAN-9"));
    }
}
