use serde_json::Value;
use uim_core::{Operation, UimClient};

use super::{empty_schema, parse_args, NoArgs, ToolDefinition};
use crate::error::ToolError;
use crate::format::render_list;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            Operation::ListProbes,
            "List all probes in the UIM infrastructure",
            empty_schema(),
        ),
        ToolDefinition::new(
            Operation::ListRobots,
            "List all robots in the UIM infrastructure",
            empty_schema(),
        ),
    ]
}

pub fn list_probes(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let _: NoArgs = parse_args(Operation::ListProbes, arguments)?;

    let result = client.list_probes()?;
    Ok(render_list("probes", &result))
}

pub fn list_robots(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let _: NoArgs = parse_args(Operation::ListRobots, arguments)?;

    let result = client.list_robots()?;
    Ok(render_list("robots", &result))
}
