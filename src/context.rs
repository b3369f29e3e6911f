use std::sync::Arc;

use crate::adapter::ToolAdapter;
use crate::config::AppConfig;
use crate::infra::jira::JiraTools;
use crate::services::ToolHost;

pub struct AppContext {
    pub config: AppConfig,
    pub jira: JiraTools,
}

impl AppContext {
    pub fn new(config: AppConfig, tool_host: Arc<dyn ToolHost>) -> Self {
        Self {
            config,
            jira: JiraTools::new(ToolAdapter::new(tool_host)),
        }
    }

    pub fn tools(&self) -> &ToolAdapter {
        self.jira.adapter()
    }
}
