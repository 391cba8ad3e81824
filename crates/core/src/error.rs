use thiserror::Error;

use crate::catalog::Method;

/// Failure of a single upstream call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{status} {reason} for {method} {path}{}", body_suffix(.body))]
    Http {
        method: Method,
        path: String,
        status: u16,
        reason: String,
        body: String,
    },
    #[error("request {method} {path} failed: {}", source_chain(.source))]
    Network {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid JSON in response to {method} {path}: {source}")]
    Decode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build HTTP client: {}", source_chain(.0))]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// Upstream HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Render an error followed by every distinct cause, joined with `: `.
///
/// reqwest keeps the useful part (refused, timed out, TLS) on the source chain.
pub fn source_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        let text = e.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = e.source();
    }
    message
}

const MAX_BODY_IN_MESSAGE: usize = 200;

fn body_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    match body.char_indices().nth(MAX_BODY_IN_MESSAGE) {
        Some((cut, _)) => format!(": {}...", &body[..cut]),
        None => format!(": {}", body),
    }
}
