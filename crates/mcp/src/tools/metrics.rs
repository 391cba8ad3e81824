use serde::Deserialize;
use serde_json::{json, Value};
use uim_core::{Operation, UimClient};

use super::{empty_schema, parse_args, require_non_empty, NoArgs, ToolDefinition};
use crate::error::ToolError;
use crate::format::{render, render_list};

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            Operation::ListMetrics,
            "List all available metrics in the system",
            empty_schema(),
        ),
        ToolDefinition::new(
            Operation::MetricDefinitions,
            "Get complete list of UIM metric definitions with their properties",
            empty_schema(),
        ),
        ToolDefinition::new(
            Operation::GetMetric,
            "Get specific metric data by its ID",
            json!({
                "type": "object",
                "properties": {
                    "metric_id": {
                        "type": "string",
                        "description": "The metric identifier (e.g., 'M0AEA025E353AEC88F86A55481CDAFA6A')"
                    }
                },
                "required": ["metric_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct MetricIdArgs {
    metric_id: String,
}

pub fn list_metrics(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let _: NoArgs = parse_args(Operation::ListMetrics, arguments)?;

    let result = client.list_metrics()?;
    Ok(render_list("metrics", &result))
}

pub fn get_metric_definitions(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let _: NoArgs = parse_args(Operation::MetricDefinitions, arguments)?;

    let result = client.metric_definitions()?;
    Ok(render("Metric Definitions:", &result))
}

pub fn get_metric_by_id(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let args: MetricIdArgs = parse_args(Operation::GetMetric, arguments)?;
    let metric_id = require_non_empty(Operation::GetMetric, "metric_id", &args.metric_id)?;

    let result = client.get_metric(metric_id)?;
    Ok(render("Metric Data:", &result))
}
