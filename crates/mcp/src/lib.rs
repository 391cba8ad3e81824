pub mod cli;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod logging;
pub mod server;
pub mod tools;
pub mod transport;

pub use dispatch::{Dispatcher, ToolResponse};
pub use error::ToolError;
pub use server::McpServer;
