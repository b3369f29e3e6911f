//! Best-effort field extraction from one free-text request such as
//! `Create a bug in KAN titled 'Fix login' description 'Error on submit'`.
//!
//! Each field has its own pattern and the first match in reading order wins.
//! A field whose pattern does not match stays `None`; nothing is guessed.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::ticket::{IssueType, TicketDraft};

static PROJECT_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?i:project\s*[=:]\s*|project\s+(?:key\s+)?|in\s+)["']?([A-Z0-9]+)\b"#)
        .expect("valid regex")
});
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?i:titled?|summary)\s*[=:]?\s*(?:"([^"]*)"|'([^'"]*)')"#).expect("valid regex")
});
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(?i:description)\s*[=:]?\s*(?:"([^"]*)"|'([^'"]*)')"#).expect("valid regex")
});
static ISSUE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:(?:an?\s+)?(bug|task|story|epic))\b").expect("valid regex")
});
static ASSIGNEE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?i:assign(?:ed)?\s+(?:it\s+)?to)\s+([A-Za-z][\w.@-]*(?:\s+[A-Z][\w-]*)?)")
        .expect("valid regex")
});

pub fn extract_draft(text: &str) -> TicketDraft {
    TicketDraft {
        project_key: extract_project_key(text),
        summary: quoted_capture(&SUMMARY, text),
        description: quoted_capture(&DESCRIPTION, text),
        issue_type: extract_issue_type(text),
        assignee: extract_assignee(text),
    }
}

pub fn extract_assignee(text: &str) -> Option<String> {
    ASSIGNEE
        .captures(text)
        .map(|captures| captures[1].to_string())
}

pub fn extract_project_key(text: &str) -> Option<String> {
    PROJECT_KEY
        .captures(text)
        .map(|captures| captures[1].to_string())
}

pub fn extract_issue_type(text: &str) -> Option<IssueType> {
    ISSUE_TYPE
        .captures(text)
        .and_then(|captures| IssueType::from_str(&captures[1]))
}

fn quoted_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern.captures(text).and_then(|captures| first_group(&captures))
}

fn first_group(captures: &Captures<'_>) -> Option<String> {
    captures
        .iter()
        .skip(1)
        .flatten()
        .next()
        .map(|group| group.as_str().to_string())
}
