use serde_json::{json, Value};
use std::collections::HashMap;
use uim_core::{Operation, UimClient};

use crate::error::ToolError;
use crate::tools::{handler, Handler};

/// Text reply for one tool call, as placed in an MCP `content` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    pub text: String,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(err: &ToolError) -> Self {
        Self {
            text: format!("Error: {}", err),
            is_error: true,
        }
    }

    pub fn into_value(self) -> Value {
        json!({
            "content": [{
                "type": "text",
                "text": self.text
            }],
            "isError": self.is_error
        })
    }
}

/// Routes tool calls to their handlers. Holds no per-call state.
pub struct Dispatcher {
    client: Option<UimClient>,
    handlers: HashMap<&'static str, Handler>,
}

impl Dispatcher {
    pub fn new(client: UimClient) -> Self {
        Self {
            client: Some(client),
            handlers: handler_table(),
        }
    }

    /// A dispatcher with no client; every call reports that it is not initialized.
    pub fn uninitialized() -> Self {
        Self {
            client: None,
            handlers: handler_table(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    pub fn call(&self, name: &str, arguments: &Value) -> Result<String, ToolError> {
        let client = self.client.as_ref().ok_or(ToolError::NotInitialized)?;
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        handler(client, arguments)
    }

    /// Like [`Dispatcher::call`], but every failure becomes an `Error: ...` reply.
    pub fn handle(&self, name: &str, arguments: &Value) -> ToolResponse {
        match self.call(name, arguments) {
            Ok(text) => {
                tracing::debug!(tool = name, "tool call succeeded");
                ToolResponse::text(text)
            }
            Err(err) => {
                tracing::error!(
                    tool = name,
                    arguments = %arguments,
                    kind = err.kind(),
                    status = ?err.status(),
                    error = %err,
                    "tool call failed"
                );
                ToolResponse::error(&err)
            }
        }
    }
}

fn handler_table() -> HashMap<&'static str, Handler> {
    Operation::ALL
        .into_iter()
        .map(|op| (op.key(), handler(op)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uim_core::{ApiError, ApiRequest, HttpTransport};

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl HttpTransport for Counting {
        fn send(&self, _request: &ApiRequest) -> Result<Value, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "critical": 1, "major": 4 }))
        }
    }

    fn dispatcher() -> (Dispatcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = UimClient::with_transport(Counting {
            calls: calls.clone(),
        });
        (Dispatcher::new(client), calls)
    }

    #[test]
    fn table_covers_every_operation() {
        let (dispatcher, _) = dispatcher();
        assert_eq!(dispatcher.handlers.len(), Operation::ALL.len());
    }

    #[test]
    fn uninitialized_reports_error() {
        let dispatcher = Dispatcher::uninitialized();
        assert!(!dispatcher.is_initialized());

        let err = dispatcher.call("list_devices", &json!({})).unwrap_err();
        assert!(matches!(err, ToolError::NotInitialized));

        let response = dispatcher.handle("list_devices", &json!({}));
        assert!(response.is_error);
        assert_eq!(
            response.text,
            "Error: UIM client not initialized. Please check environment variables."
        );
    }

    #[test]
    fn unknown_tool_is_lookup_miss() {
        let (dispatcher, calls) = dispatcher();
        let err = dispatcher.call("nonexistent_tool", &json!({})).unwrap_err();

        assert!(matches!(err, ToolError::UnknownTool(ref n) if n == "nonexistent_tool"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_required_argument_skips_network() {
        let (dispatcher, calls) = dispatcher();
        let err = dispatcher.call("get_device_info", &json!({})).unwrap_err();

        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("device_id"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn out_of_range_severity_is_rejected() {
        let (dispatcher, calls) = dispatcher();

        let err = dispatcher.call("list_alarms", &json!({ "severity": 6 })).unwrap_err();
        assert!(err.to_string().contains("severity must be between 0 and 5"));

        let err = dispatcher.call("list_alarms", &json!({ "severity": -1 })).unwrap_err();
        assert_eq!(err.kind(), "validation");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn wrong_argument_type_is_validation_error() {
        let (dispatcher, _) = dispatcher();
        let err = dispatcher
            .call("get_device_info", &json!({ "device_id": 42 }))
            .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn success_issues_one_request() {
        let (dispatcher, calls) = dispatcher();
        let response = dispatcher.handle("get_alarm_summary", &Value::Null);

        assert!(!response.is_error);
        assert!(response.text.starts_with("Alarm Summary:\n\n"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn response_value_shape() {
        let value = ToolResponse::text("hello").into_value();
        assert_eq!(value["content"][0]["type"], "text");
        assert_eq!(value["content"][0]["text"], "hello");
        assert_eq!(value["isError"], false);
    }
}
