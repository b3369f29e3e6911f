use async_trait::async_trait;

use crate::domain::tool::{ToolCall, ToolDescriptor, ToolResponse};
use crate::error::AdapterResult;

#[async_trait]
pub trait ToolHost: Send + Sync {
    /// Completes the handshake and nothing else.
    async fn ping(&self) -> AdapterResult<()>;
    async fn list_tools(&self) -> AdapterResult<Vec<ToolDescriptor>>;
    async fn call_tool(&self, call: &ToolCall) -> AdapterResult<ToolResponse>;
}
