//! Synchronous front door to the tool host.
//!
//! Every operation runs to completion on a scoped worker thread that owns a
//! single-use current-thread runtime, so callers never need an executor of
//! their own and may call in from inside one. Failures never escape as
//! errors from [`ToolAdapter::invoke`]: they come back as `"Error: ..."`.

use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::domain::tool::{ToolCall, ToolDescriptor};
use crate::error::{AdapterError, AdapterResult};
use crate::services::ToolHost;

pub const ERROR_PREFIX: &str = "Error:";

#[derive(Clone)]
pub struct ToolAdapter {
    host: Arc<dyn ToolHost>,
}

impl ToolAdapter {
    pub fn new(host: Arc<dyn ToolHost>) -> Self {
        Self { host }
    }

    /// Invokes one tool and returns the text to show the user.
    pub fn invoke(&self, call: &ToolCall) -> String {
        debug!(tool = %call.name, arguments = ?call.arguments, "tool invocation");
        match self.try_invoke(call) {
            Ok(text) => text,
            Err(err) => {
                warn!(tool = %call.name, "tool invocation failed: {err}");
                error_text(&err)
            }
        }
    }

    /// Like [`ToolAdapter::invoke`] but keeps the failure category.
    pub fn try_invoke(&self, call: &ToolCall) -> AdapterResult<String> {
        let response = run_to_completion(self.host.call_tool(call))?;
        if response.is_error {
            return Err(AdapterError::ToolFailed(response.display_text()));
        }
        Ok(response.display_text())
    }

    pub fn list_tools(&self) -> Result<Vec<ToolDescriptor>, String> {
        run_to_completion(self.host.list_tools()).map_err(|err| {
            warn!("failed to list tools: {err}");
            error_text(&err)
        })
    }

    pub fn check(&self) -> Result<(), String> {
        run_to_completion(self.host.ping()).map_err(|err| error_text(&err))
    }
}

/// Renders a failure for the user. Tool-reported messages that already
/// start with the prefix are passed through as-is.
pub fn error_text(err: &AdapterError) -> String {
    let message = err.to_string();
    if is_error_text(&message) {
        return message;
    }
    format!("{ERROR_PREFIX} {message}")
}

pub fn is_error_text(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX)
}

/// Drives `future` on a fresh runtime in a scoped thread and blocks until
/// it finishes. The runtime is dropped before this returns.
fn run_to_completion<F, T>(future: F) -> AdapterResult<T>
where
    F: Future<Output = AdapterResult<T>> + Send,
    T: Send,
{
    thread::scope(|scope| {
        scope
            .spawn(|| {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|err| AdapterError::Runtime(err.to_string()))?;
                runtime.block_on(future)
            })
            .join()
            .unwrap_or_else(|_| Err(AdapterError::Runtime("tool call panicked".to_string())))
    })
}
