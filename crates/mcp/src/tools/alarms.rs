use serde::Deserialize;
use serde_json::{json, Value};
use uim_core::{AlarmFilter, Operation, UimClient, DEFAULT_ALARM_LIMIT};

use super::{empty_schema, non_empty, parse_args, require_non_empty, NoArgs, ToolDefinition};
use crate::error::ToolError;
use crate::format::{render, render_list};

const MAX_SEVERITY: u8 = 5;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            Operation::ListAlarms,
            "List alarms from DX UIM with optional filtering by severity and source",
            json!({
                "type": "object",
                "properties": {
                    "severity": {
                        "type": "integer",
                        "description": "Filter by severity: 0=clear, 1=info, 2=warning, 3=minor, 4=major, 5=critical",
                        "minimum": 0,
                        "maximum": MAX_SEVERITY
                    },
                    "source": {
                        "type": "string",
                        "description": "Filter by source/device name"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of alarms to return",
                        "minimum": 0,
                        "default": DEFAULT_ALARM_LIMIT
                    }
                }
            }),
        ),
        ToolDefinition::new(
            Operation::AlarmSummary,
            "Get a summary of alarms with counts by severity level",
            empty_schema(),
        ),
        ToolDefinition::new(
            Operation::AcknowledgeAlarm,
            "Acknowledge an alarm by its ID",
            json!({
                "type": "object",
                "properties": {
                    "alarm_id": {
                        "type": "string",
                        "description": "The alarm identifier"
                    },
                    "message": {
                        "type": "string",
                        "description": "Optional acknowledgment message"
                    }
                },
                "required": ["alarm_id"]
            }),
        ),
        ToolDefinition::new(
            Operation::AcceptAlarm,
            "Accept an alarm by its ID",
            json!({
                "type": "object",
                "properties": {
                    "alarm_id": {
                        "type": "string",
                        "description": "The alarm identifier"
                    }
                },
                "required": ["alarm_id"]
            }),
        ),
        ToolDefinition::new(
            Operation::AssignAlarm,
            "Assign an alarm to a specific user",
            json!({
                "type": "object",
                "properties": {
                    "alarm_id": {
                        "type": "string",
                        "description": "The alarm identifier"
                    },
                    "username": {
                        "type": "string",
                        "description": "Username to assign the alarm to"
                    }
                },
                "required": ["alarm_id", "username"]
            }),
        ),
    ]
}

#[derive(Debug, Deserialize)]
struct ListAlarmsArgs {
    severity: Option<u8>,
    source: Option<String>,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct AcknowledgeArgs {
    alarm_id: String,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AlarmIdArgs {
    alarm_id: String,
}

#[derive(Debug, Deserialize)]
struct AssignArgs {
    alarm_id: String,
    username: String,
}

pub fn list_alarms(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let args: ListAlarmsArgs = parse_args(Operation::ListAlarms, arguments)?;

    if let Some(severity) = args.severity.filter(|s| *s > MAX_SEVERITY) {
        return Err(ToolError::invalid(
            Operation::ListAlarms.key(),
            format!("severity must be between 0 and {}, got {}", MAX_SEVERITY, severity),
        ));
    }

    let filter = AlarmFilter {
        severity: args.severity,
        source: non_empty(&args.source).map(String::from),
        limit: args.limit.unwrap_or(DEFAULT_ALARM_LIMIT),
    };

    let result = client.list_alarms(&filter)?;
    Ok(render_list("alarms", &result))
}

pub fn get_alarm_summary(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let _: NoArgs = parse_args(Operation::AlarmSummary, arguments)?;

    let result = client.alarm_summary()?;
    Ok(render("Alarm Summary:", &result))
}

pub fn acknowledge_alarm(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let args: AcknowledgeArgs = parse_args(Operation::AcknowledgeAlarm, arguments)?;
    let alarm_id = require_non_empty(Operation::AcknowledgeAlarm, "alarm_id", &args.alarm_id)?;

    let result = client.acknowledge_alarm(alarm_id, non_empty(&args.message))?;
    Ok(render("Alarm acknowledged successfully:", &result))
}

pub fn accept_alarm(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let args: AlarmIdArgs = parse_args(Operation::AcceptAlarm, arguments)?;
    let alarm_id = require_non_empty(Operation::AcceptAlarm, "alarm_id", &args.alarm_id)?;

    let result = client.accept_alarm(alarm_id)?;
    Ok(render("Alarm accepted successfully:", &result))
}

pub fn assign_alarm(client: &UimClient, arguments: &Value) -> Result<String, ToolError> {
    let args: AssignArgs = parse_args(Operation::AssignAlarm, arguments)?;
    let alarm_id = require_non_empty(Operation::AssignAlarm, "alarm_id", &args.alarm_id)?;
    let username = require_non_empty(Operation::AssignAlarm, "username", &args.username)?;

    let result = client.assign_alarm(alarm_id, username)?;
    Ok(render(
        &format!("Alarm assigned successfully to {}:", username),
        &result,
    ))
}
