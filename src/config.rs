use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

const APP_DIR_NAME: &str = "jira-assistant";
const CONFIG_FILE_NAME: &str = "config.json";

const DEFAULT_SERVER_COMMAND: &str = "python";
const DEFAULT_SERVER_PATH: &str = "../Jira_mcp/mcp_server.py";
const DEFAULT_ISSUE_TYPE: &str = "Task";

/// Credential variables forwarded to the tool host process.
const CREDENTIAL_VARS: [&str; 3] = ["JIRA_URL", "JIRA_EMAIL", "JIRA_API_TOKEN"];

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::Configuration("could not locate a config directory".to_string()))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// The on-disk configuration edited by `config init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    pub jira_base_url: Option<String>,
    pub jira_email: Option<String>,
    pub jira_token: Option<String>,
    pub default_project: Option<String>,
    pub default_issue_type: Option<String>,
    pub server_command: Option<String>,
    pub server_path: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        Self::load_from(&config_file_path()?)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!("invalid config file {}: {err}", path.display()))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to encode config: {err}")))?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// How to launch the tool host. Passed explicitly into the host client.
#[derive(Clone, PartialEq, Eq)]
pub struct ToolHostConfig {
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub request_timeout: Option<Duration>,
}

impl ToolHostConfig {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: BTreeMap::new(),
            request_timeout: None,
        }
    }
}

impl fmt::Debug for ToolHostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolHostConfig")
            .field("command", &self.command)
            .field("args", &self.args)
            .field("env", &self.env.keys().collect::<Vec<_>>())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_project: Option<String>,
    pub default_issue_type: String,
    pub tool_host: ToolHostConfig,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        Self::resolve(stored, |name| std::env::var(name).ok())
    }

    /// Layers environment overrides on top of the stored file.
    pub fn resolve<F>(stored: StoredConfig, env: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str, stored: Option<String>| {
            env(name)
                .filter(|value| !value.trim().is_empty())
                .or(stored)
                .filter(|value| !value.trim().is_empty())
        };

        let command = lookup("JIRA_ASSISTANT_SERVER_COMMAND", stored.server_command)
            .unwrap_or_else(|| DEFAULT_SERVER_COMMAND.to_string());
        let server_path = lookup("MCP_SERVER_PATH", stored.server_path)
            .unwrap_or_else(|| DEFAULT_SERVER_PATH.to_string());

        let mut tool_host = ToolHostConfig::new(command, vec![server_path]);
        let credentials = [stored.jira_base_url, stored.jira_email, stored.jira_token];
        for (name, stored_value) in CREDENTIAL_VARS.into_iter().zip(credentials) {
            if let Some(value) = lookup(name, stored_value) {
                tool_host.env.insert(name.to_string(), value);
            }
        }
        tool_host.request_timeout = stored
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self {
            default_project: lookup("JIRA_ASSISTANT_DEFAULT_PROJECT", stored.default_project),
            default_issue_type: stored
                .default_issue_type
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
            tool_host,
        })
    }

    /// Names of Jira credentials the tool host will not receive.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        CREDENTIAL_VARS
            .into_iter()
            .filter(|name| !self.tool_host.env.contains_key(*name))
            .collect()
    }
}
