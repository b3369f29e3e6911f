pub mod tool_host;

pub use tool_host::ToolHost;
