//! Routing of chat utterances to the operation they ask for.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::extract::{extract_assignee, extract_draft, extract_project_key};
use crate::domain::ticket::{IssueType, TicketDraft, find_ticket_key};

static CREATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:create|add)\s+(?:an?\s+|new\s+)*(?:ticket|task|bug|story|epic|issue)\b")
        .expect("valid regex")
});
static RECENTLY_CREATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:just|recently|last)\s+(?:created|made)\b").expect("valid regex")
});
static SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:find|search|list|show)\b.*?\b(?:tickets|issues|tasks|bugs|stories|epics)\b|\b(?:tickets|issues|tasks|bugs)\b.*?\b(?:assigned|containing|contains|about|related)\b",
    )
    .expect("valid regex")
});
static EXPLICIT_QUERY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:using\s+)?query\s*:\s*(.+?)\s*$").expect("valid regex")
});
static RAW_JQL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*project\s*=\s*[A-Z0-9]+\b").expect("valid regex"));
static SEARCH_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:containing|contains|about|mentioning|related\s+to)\s+(?:"([^"]+)"|'([^']+)'|([\w-]+))"#,
    )
    .expect("valid regex")
});
static PLURAL_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(bugs|epics|stories)\b").expect("valid regex"));
static OPEN_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:open|unresolved)\b").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Create(TicketDraft),
    /// `None` means "the ticket we just created".
    Details(Option<String>),
    Search(SearchRequest),
    Help,
}

pub fn classify(text: &str) -> Intent {
    if CREATE.is_match(text) {
        return Intent::Create(extract_draft(text));
    }
    if let Some(key) = find_ticket_key(text) {
        return Intent::Details(Some(key));
    }
    if RECENTLY_CREATED.is_match(text) {
        return Intent::Details(None);
    }
    if EXPLICIT_QUERY.is_match(text) || RAW_JQL.is_match(text) || SEARCH.is_match(text) {
        return Intent::Search(SearchRequest::parse(text));
    }
    Intent::Help
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    /// Caller-supplied JQL, used verbatim.
    pub jql: Option<String>,
    pub project: Option<String>,
    pub assignee: Option<String>,
    pub text: Option<String>,
    pub issue_type: Option<IssueType>,
    pub open_only: bool,
}

impl SearchRequest {
    pub fn parse(text: &str) -> Self {
        if let Some(captures) = EXPLICIT_QUERY.captures(text) {
            return Self {
                jql: Some(captures[1].to_string()),
                ..Self::default()
            };
        }
        if RAW_JQL.is_match(text) {
            return Self {
                jql: Some(text.trim().to_string()),
                ..Self::default()
            };
        }

        let search_text = SEARCH_TEXT.captures(text).and_then(|captures| {
            captures
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|group| group.as_str().to_string())
        });

        Self {
            jql: None,
            project: extract_project_key(text),
            assignee: extract_assignee(text),
            text: search_text,
            issue_type: PLURAL_TYPE
                .captures(text)
                .and_then(|captures| plural_issue_type(&captures[1])),
            open_only: OPEN_ONLY.is_match(text),
        }
    }

    pub fn to_jql(&self, default_project: Option<&str>) -> String {
        if let Some(jql) = &self.jql {
            return jql.clone();
        }

        let mut clauses = Vec::new();
        if let Some(project) = self.project.as_deref().or(default_project) {
            clauses.push(format!("project = {project}"));
        }
        if let Some(issue_type) = self.issue_type {
            clauses.push(format!("issuetype = {}", issue_type.as_str()));
        }
        if let Some(assignee) = &self.assignee {
            clauses.push(format!("assignee = \"{}\"", escape_jql(assignee)));
        }
        if self.open_only {
            clauses.push("statusCategory != Done".to_string());
        }
        if let Some(text) = &self.text {
            clauses.push(format!("text ~ \"{}\"", escape_jql(text)));
        }

        if clauses.is_empty() {
            "ORDER BY created DESC".to_string()
        } else {
            format!("{} ORDER BY created DESC", clauses.join(" AND "))
        }
    }
}

/// Restricts a JQL query to `project` unless it already names a project.
pub fn scope_to_project(query: &str, project: Option<&str>) -> String {
    match project {
        Some(project) if !query.to_lowercase().contains("project") => {
            format!("project = {project} AND {query}")
        }
        _ => query.to_string(),
    }
}

fn plural_issue_type(word: &str) -> Option<IssueType> {
    match word.to_lowercase().as_str() {
        "bugs" => Some(IssueType::Bug),
        "epics" => Some(IssueType::Epic),
        "stories" => Some(IssueType::Story),
        _ => None,
    }
}

fn escape_jql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
