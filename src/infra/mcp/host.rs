use async_trait::async_trait;
use tracing::debug;

use crate::config::ToolHostConfig;
use crate::domain::tool::{ToolCall, ToolDescriptor, ToolResponse};
use crate::error::{AdapterError, AdapterResult};
use crate::infra::mcp::protocol::{
    ListToolsResult, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST, call_tool_params,
};
use crate::infra::mcp::session::StdioSession;
use crate::services::ToolHost;

const CLIENT_NAME: &str = env!("CARGO_PKG_NAME");
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool host reached through a fresh subprocess per operation. Nothing is
/// pooled: every call spawns, handshakes, sends one request and closes.
pub struct McpToolHost {
    config: ToolHostConfig,
}

impl McpToolHost {
    pub fn new(config: ToolHostConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> AdapterResult<StdioSession> {
        let mut session = StdioSession::spawn(&self.config)?;
        if let Err(err) = session.initialize(CLIENT_NAME, CLIENT_VERSION).await {
            session.close().await;
            return Err(err);
        }
        Ok(session)
    }
}

#[async_trait]
impl ToolHost for McpToolHost {
    async fn ping(&self) -> AdapterResult<()> {
        let session = self.connect().await?;
        session.close().await;
        Ok(())
    }

    async fn list_tools(&self) -> AdapterResult<Vec<ToolDescriptor>> {
        let mut session = self.connect().await?;
        let outcome = session.request(METHOD_TOOLS_LIST, None).await;
        session.close().await;

        let listing: ListToolsResult = serde_json::from_value(outcome?)
            .map_err(|err| AdapterError::Protocol(format!("invalid tool listing: {err}")))?;
        debug!(count = listing.tools.len(), "tool host catalog received");
        Ok(listing.tools)
    }

    async fn call_tool(&self, call: &ToolCall) -> AdapterResult<ToolResponse> {
        let mut session = self.connect().await?;
        debug!(tool = %call.name, "invoking tool");
        let outcome = session
            .request(METHOD_TOOLS_CALL, Some(call_tool_params(call)))
            .await;
        session.close().await;

        serde_json::from_value(outcome?)
            .map_err(|err| AdapterError::Protocol(format!("invalid tool result: {err}")))
    }
}
