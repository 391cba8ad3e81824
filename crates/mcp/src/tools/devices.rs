use serde::Deserialize;
use serde_json::{json, Value};
use uim_core::{DeviceFilter, Operation, UimClient};

use super::{non_empty, parse_args, require_non_empty, ToolDefinition};
use crate::error::ToolError;
use crate::format::{render, render_list};

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            Operation::ListDevices,
            "List all devices/systems in DX UIM. Optionally filter by domain or hub.",
            json!({
                "type": "object",
                "properties": {
                    "domain": {
                        "type": "string",
                        "description": "Filter by domain name (optional)"
                    },
                    "hub": {
                        "type": "string",
                        "description": "Filter by hub name (optional)"
                    }
                }
            }),
        ),
        ToolDefinition::new(
            Operation::GetDevice,
            "Get detailed information about a specific device by its ID",
            json!({
                "type": "object",
                "properties": {
                    "device_id": {
                        "type": "string",
                        "description": "The device identifier"
                    }
                },
                "required": ["device_id"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct ListDevicesArgs {
    domain: Option<String>,
    hub: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeviceInfoArgs {
    device_id: String,
}

pub fn list_devices(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let args: ListDevicesArgs = parse_args(Operation::ListDevices, arguments)?;
    let filter = DeviceFilter {
        domain: non_empty(&args.domain).map(String::from),
        hub: non_empty(&args.hub).map(String::from),
    };

    let result = client.list_devices(&filter)?;
    Ok(render_list("devices", &result))
}

pub fn get_device_info(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let args: DeviceInfoArgs = parse_args(Operation::GetDevice, arguments)?;
    let device_id = require_non_empty(Operation::GetDevice, "device_id", &args.device_id)?;

    let result = client.get_device(device_id)?;
    Ok(render("Device Information:", &result))
}
