// MCP (Model Context Protocol) host adapter: serves the tool registry over stdio

pub mod protocol;
pub mod server;

pub use server::McpServer;
