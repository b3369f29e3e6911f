use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::config::ToolHostConfig;
use crate::error::{AdapterError, AdapterResult};
use crate::infra::mcp::protocol::{
    InitializeResult, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, METHOD_INITIALIZE,
    METHOD_INITIALIZED, PROTOCOL_VERSION, initialize_params,
};

const CLOSE_GRACE: Duration = Duration::from_millis(500);

/// One spawned tool-host process speaking newline-delimited JSON-RPC over
/// its standard streams.
///
/// The child is spawned with `kill_on_drop`, so dropping a session on an
/// error path still tears the process down. [`StdioSession::close`] is the
/// orderly path: it closes stdin, gives the host a moment to exit, then
/// kills and reaps it.
pub struct StdioSession {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    request_timeout: Option<Duration>,
}

impl StdioSession {
    pub fn spawn(config: &ToolHostConfig) -> AdapterResult<Self> {
        debug!(command = %config.command, args = ?config.args, "spawning tool host");

        let mut command = Command::new(&config.command);
        command
            .args(&config.args)
            .envs(&config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|err| AdapterError::Spawn {
            command: config.command.clone(),
            reason: err.to_string(),
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AdapterError::Transport("tool host stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AdapterError::Transport("tool host stdout unavailable".to_string()))?;
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_stderr(stderr));
        }

        Ok(Self {
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout).lines(),
            next_id: 1,
            request_timeout: config.request_timeout,
        })
    }

    /// Runs the `initialize` exchange followed by the `initialized` notification.
    pub async fn initialize(&mut self, client_name: &str, client_version: &str) -> AdapterResult<()> {
        let result = self
            .request(
                METHOD_INITIALIZE,
                Some(initialize_params(client_name, client_version)),
            )
            .await
            .map_err(|err| AdapterError::Handshake(err.to_string()))?;

        let init: InitializeResult = serde_json::from_value(result)
            .map_err(|err| AdapterError::Handshake(format!("invalid initialize result: {err}")))?;
        if init.protocol_version != PROTOCOL_VERSION {
            debug!(
                server = %init.protocol_version,
                client = PROTOCOL_VERSION,
                "tool host negotiated a different protocol version"
            );
        }
        if let Some(server) = &init.server_info {
            info!(name = %server.name, version = ?server.version, "connected to tool host");
        }

        self.notify(METHOD_INITIALIZED, None).await
    }

    pub async fn request(&mut self, method: &str, params: Option<Value>) -> AdapterResult<Value> {
        let id = self.next_id;
        self.next_id += 1;

        self.send(&JsonRpcRequest::new(id, method, params)).await?;

        let response = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.read_response(id))
                .await
                .map_err(|_| AdapterError::Timeout(limit))??,
            None => self.read_response(id).await?,
        };

        if let Some(error) = response.error {
            return Err(AdapterError::Remote {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    pub async fn notify(&mut self, method: &str, params: Option<Value>) -> AdapterResult<()> {
        self.send(&JsonRpcNotification::new(method, params)).await
    }

    pub async fn close(mut self) {
        drop(self.stdin.take());

        match tokio::time::timeout(CLOSE_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => debug!(%status, "tool host exited"),
            Ok(Err(err)) => warn!("failed to wait for tool host: {err}"),
            Err(_) => {
                debug!("tool host still running after stdin closed; killing it");
                if let Err(err) = self.child.kill().await {
                    warn!("failed to kill tool host: {err}");
                }
            }
        }
    }

    async fn send<T: Serialize>(&mut self, message: &T) -> AdapterResult<()> {
        let mut line = serde_json::to_string(message)
            .map_err(|err| AdapterError::Protocol(format!("failed to encode message: {err}")))?;
        debug!("-> {line}");
        line.push('\n');

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| AdapterError::Transport("tool host stdin already closed".to_string()))?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.flush().await?;
        Ok(())
    }

    async fn read_response(&mut self, id: u64) -> AdapterResult<JsonRpcResponse> {
        loop {
            let line = self.stdout.next_line().await?.ok_or_else(|| {
                AdapterError::Transport("tool host closed the connection".to_string())
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!("<- {line}");

            match serde_json::from_str::<JsonRpcResponse>(line) {
                Ok(response) if response.answers(id) => return Ok(response),
                Ok(other) => debug!(method = ?other.method, "skipping unrelated message"),
                Err(err) => debug!("skipping non JSON-RPC output: {err}"),
            }
        }
    }
}

async fn forward_stderr(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!(target: "tool_host", "{line}");
    }
}
