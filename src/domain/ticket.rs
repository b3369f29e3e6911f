use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TICKET_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][A-Z0-9]*-\d+)\b").expect("valid ticket key regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueType {
    Bug,
    Task,
    Story,
    Epic,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "Bug",
            IssueType::Task => "Task",
            IssueType::Story => "Story",
            IssueType::Epic => "Epic",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "bug" => Some(IssueType::Bug),
            "task" => Some(IssueType::Task),
            "story" => Some(IssueType::Story),
            "epic" => Some(IssueType::Epic),
            _ => None,
        }
    }
}

/// Partial ticket record guessed from free text. Every populated field
/// came from a matching pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketDraft {
    pub project_key: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub issue_type: Option<IssueType>,
    pub assignee: Option<String>,
}

/// Everything the create tool needs, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketFields {
    pub project_key: String,
    pub summary: String,
    pub description: String,
    pub issue_type: String,
    pub assignee: Option<String>,
}

/// First Jira-style issue key (`KAN-123`) in `text`.
pub fn find_ticket_key(text: &str) -> Option<String> {
    TICKET_KEY
        .captures(text)
        .map(|captures| captures[1].to_string())
}
