mod alarms;
mod devices;
mod infrastructure;
mod metrics;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uim_core::{Operation, UimClient};

use crate::error::ToolError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    fn new(operation: Operation, description: &str, input_schema: Value) -> Self {
        Self {
            name: operation.key().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Runs one tool against the client and renders the text reply.
pub type Handler = fn(&UimClient, &Value) -> Result<String, ToolError>;

pub fn list_tools() -> Vec<ToolDefinition> {
    let mut tools = Vec::new();
    tools.extend(devices::definitions());
    tools.extend(alarms::definitions());
    tools.extend(metrics::definitions());
    tools.extend(infrastructure::definitions());
    tools
}

pub fn handler(operation: Operation) -> Handler {
    match operation {
        Operation::ListDevices => devices::list_devices,
        Operation::GetDevice => devices::get_device_info,
        Operation::ListAlarms => alarms::list_alarms,
        Operation::AlarmSummary => alarms::get_alarm_summary,
        Operation::AcknowledgeAlarm => alarms::acknowledge_alarm,
        Operation::AcceptAlarm => alarms::accept_alarm,
        Operation::AssignAlarm => alarms::assign_alarm,
        Operation::ListMetrics => metrics::list_metrics,
        Operation::MetricDefinitions => metrics::get_metric_definitions,
        Operation::GetMetric => metrics::get_metric_by_id,
        Operation::ListProbes => infrastructure::list_probes,
        Operation::ListRobots => infrastructure::list_robots,
    }
}

fn empty_schema() -> Value {
    json!({
        "type": "object",
        "properties": {}
    })
}

#[derive(Debug, Deserialize)]
struct NoArgs {}

/// Deserialize tool arguments, treating `null` as an empty object.
fn parse_args<T: DeserializeOwned>(operation: Operation, arguments: &Value) -> Result<T, ToolError> {
    let empty = json!({});
    let arguments = if arguments.is_null() { &empty } else { arguments };
    T::deserialize(arguments).map_err(|e| ToolError::invalid(operation.key(), e.to_string()))
}

fn require_non_empty<'a>(
    operation: Operation,
    field: &str,
    value: &'a str,
) -> Result<&'a str, ToolError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ToolError::invalid(
            operation.key(),
            format!("{} must not be empty", field),
        ));
    }
    Ok(trimmed)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_is_advertised_once() {
        let tools = list_tools();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        let keys: Vec<&str> = Operation::ALL.iter().map(|op| op.key()).collect();

        assert_eq!(names, keys);
    }

    #[test]
    fn schemas_are_objects() {
        for tool in list_tools() {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(tool.input_schema["properties"].is_object(), "{}", tool.name);
            assert!(!tool.description.is_empty());
        }
    }

    #[test]
    fn severity_is_bounded() {
        let tools = list_tools();
        let list_alarms = tools.iter().find(|t| t.name == "list_alarms").unwrap();
        let severity = &list_alarms.input_schema["properties"]["severity"];

        assert_eq!(severity["minimum"], 0);
        assert_eq!(severity["maximum"], 5);
        assert_eq!(list_alarms.input_schema["properties"]["limit"]["default"], 100);
    }

    #[test]
    fn required_arguments_are_declared() {
        let tools = list_tools();
        let required = |name: &str| {
            tools.iter().find(|t| t.name == name).unwrap().input_schema["required"].clone()
        };

        assert_eq!(required("get_device_info"), json!(["device_id"]));
        assert_eq!(required("assign_alarm"), json!(["alarm_id", "username"]));
        assert_eq!(required("get_metric_by_id"), json!(["metric_id"]));
        assert_eq!(required("list_devices"), Value::Null);
    }

    #[test]
    fn null_arguments_parse_as_empty() {
        let args: Result<NoArgs, _> = parse_args(Operation::ListProbes, &Value::Null);
        assert!(args.is_ok());
    }

    #[test]
    fn blank_required_value_is_rejected() {
        let err = require_non_empty(Operation::GetDevice, "device_id", "  ").unwrap_err();
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("device_id must not be empty"));
    }
}
