pub mod jira;
pub mod mcp;
