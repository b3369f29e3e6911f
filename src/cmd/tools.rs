use crate::context::AppContext;
use crate::domain::tool::ToolDescriptor;
use crate::error::AppResult;
use crate::workflow::tool_error;

pub fn run_list(ctx: &AppContext) -> AppResult<String> {
    let tools = ctx.tools().list_tools().map_err(tool_error)?;
    Ok(render_catalog(&tools))
}

pub fn run_status(ctx: &AppContext) -> AppResult<String> {
    ctx.tools().check().map_err(tool_error)?;
    Ok("Tool host is responding correctly.".to_string())
}

fn render_catalog(tools: &[ToolDescriptor]) -> String {
    let mut out = format!("Found {} tools:", tools.len());
    for tool in tools {
        out.push_str(&format!(
            "\n  - {}: {}",
            tool.name,
            tool.description.as_deref().unwrap_or("(no description)")
        ));
        let required = tool.required_parameters();
        if !required.is_empty() {
            out.push_str(&format!("\n    Required parameters: {}", required.join(", ")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::context::testing::context_with;
    use crate::services::tool_host::fake::FakeToolHost;

    #[test]
    fn renders_catalog() {
        let tools = vec![
            ToolDescriptor {
                name: "get_jira_ticket".to_string(),
                description: Some("Get details of a Jira ticket".to_string()),
                input_schema: json!({"type": "object", "required": ["issue_key"]}),
            },
            ToolDescriptor {
                name: "ping".to_string(),
                description: None,
                input_schema: json!({}),
            },
        ];
        assert_eq!(
            render_catalog(&tools),
            "Found 2 tools:\n  - get_jira_ticket: Get details of a Jira ticket\n    Required parameters: issue_key\n  - ping: (no description)"
        );
    }

    #[test]
    fn lists_empty_catalog() {
        let ctx = context_with(Arc::new(FakeToolHost::new().with_tools(Vec::new())), None);
        assert_eq!(run_list(&ctx).unwrap(), "Found 0 tools:");
    }
}
