use thiserror::Error;
use uim_core::ApiError;

/// Everything that can go wrong inside a single tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("UIM client not initialized. Please check environment variables.")]
    NotInitialized,
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ToolError {
    pub fn invalid(tool: &'static str, reason: impl Into<String>) -> Self {
        ToolError::InvalidArguments {
            tool,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::NotInitialized => "not_initialized",
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::InvalidArguments { .. } => "validation",
            ToolError::Api(_) => "upstream",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ToolError::Api(e) => e.status(),
            _ => None,
        }
    }
}
