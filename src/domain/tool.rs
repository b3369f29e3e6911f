use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One named invocation against the tool host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: BTreeMap<String, String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }
}

/// Catalog entry as advertised by the tool host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema", default)]
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn required_parameters(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|required| required.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Payload fields of non-text elements (`data`, `mimeType`, `resource`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    #[serde(default)]
    pub content: Vec<ContentElement>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
    /// Anything else the host sent, such as `structuredContent` or `_meta`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolResponse {
    /// Text of the first content element, if that element carries text.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(|item| item.text.as_deref())
    }

    /// The string shown to the user: the first text element verbatim, or
    /// a rendering of the whole response when there is none.
    pub fn display_text(&self) -> String {
        match self.first_text() {
            Some(text) => text.to_string(),
            None => serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_tool_call_arguments() {
        let call = ToolCall::new("get_jira_ticket").arg("issue_key", "KAN-1");
        assert_eq!(call.name, "get_jira_ticket");
        assert_eq!(call.arguments.get("issue_key").map(String::as_str), Some("KAN-1"));
    }

    #[test]
    fn display_text_prefers_first_text_element() {
        let response: ToolResponse = serde_json::from_value(json!({
            "content": [
                {"type": "text", "text": "Ticket created: KAN-7"},
                {"type": "text", "text": "ignored"}
            ]
        }))
        .unwrap();
        assert_eq!(response.display_text(), "Ticket created: KAN-7");
        assert!(!response.is_error);
    }

    #[test]
    fn display_text_falls_back_to_rendering() {
        let response: ToolResponse = serde_json::from_value(json!({
            "content": [{"type": "image", "data": "aGk=", "mimeType": "image/png"}],
            "structuredContent": {"k": 1},
            "_meta": {"trace": "abc"}
        }))
        .unwrap();
        assert_eq!(response.first_text(), None);

        let rendered: Value = serde_json::from_str(&response.display_text()).unwrap();
        assert_eq!(
            rendered,
            json!({
                "content": [{"type": "image", "data": "aGk=", "mimeType": "image/png"}],
                "isError": false,
                "structuredContent": {"k": 1},
                "_meta": {"trace": "abc"}
            })
        );

        let empty = ToolResponse::default();
        assert_eq!(empty.display_text(), r#"{"content":[],"isError":false}"#);
    }

    #[test]
    fn reads_required_parameters() {
        let descriptor: ToolDescriptor = serde_json::from_value(json!({
            "name": "create_jira_ticket",
            "description": "Create a new Jira ticket",
            "inputSchema": {
                "type": "object",
                "required": ["project_key", "summary", "description"]
            }
        }))
        .unwrap();
        assert_eq!(
            descriptor.required_parameters(),
            vec!["project_key", "summary", "description"]
        );
    }
}
