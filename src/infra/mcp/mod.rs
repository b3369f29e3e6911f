//! Client side of the Model Context Protocol over a subprocess's stdio.

pub mod host;
pub mod protocol;
pub mod session;

pub use host::McpToolHost;
