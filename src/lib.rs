//! OpenTools - install MCP servers for desktop AI clients.
//!
//! The CLI edits each client's configuration in place: Claude Desktop's
//! `mcpServers` map, Continue's experimental transport list, or the VS Code
//! family's external `--add-mcp` registration command. The server catalog is
//! embedded in the binary; install-time parameters (API keys, paths) are
//! collected interactively.

pub mod cli;
pub mod client;
pub mod core;
pub mod mcp;
pub mod prompt;
pub mod registry;
pub mod restart;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
