use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every UIM REST call this crate knows how to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListDevices,
    GetDevice,
    ListAlarms,
    AlarmSummary,
    AcknowledgeAlarm,
    AcceptAlarm,
    AssignAlarm,
    ListMetrics,
    MetricDefinitions,
    GetMetric,
    ListProbes,
    ListRobots,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl Operation {
    pub const ALL: [Operation; 12] = [
        Operation::ListDevices,
        Operation::GetDevice,
        Operation::ListAlarms,
        Operation::AlarmSummary,
        Operation::AcknowledgeAlarm,
        Operation::AcceptAlarm,
        Operation::AssignAlarm,
        Operation::ListMetrics,
        Operation::MetricDefinitions,
        Operation::GetMetric,
        Operation::ListProbes,
        Operation::ListRobots,
    ];

    /// Tool name the operation is published under.
    pub fn key(&self) -> &'static str {
        match self {
            Operation::ListDevices => "list_devices",
            Operation::GetDevice => "get_device_info",
            Operation::ListAlarms => "list_alarms",
            Operation::AlarmSummary => "get_alarm_summary",
            Operation::AcknowledgeAlarm => "acknowledge_alarm",
            Operation::AcceptAlarm => "accept_alarm",
            Operation::AssignAlarm => "assign_alarm",
            Operation::ListMetrics => "list_metrics",
            Operation::MetricDefinitions => "get_metric_definitions",
            Operation::GetMetric => "get_metric_by_id",
            Operation::ListProbes => "list_probes",
            Operation::ListRobots => "list_robots",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Operation::AcknowledgeAlarm | Operation::AcceptAlarm | Operation::AssignAlarm => {
                Method::Put
            }
            _ => Method::Get,
        }
    }

    /// Endpoint relative to the base URL; `{name}` marks a path parameter.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::ListDevices => "/devices",
            Operation::GetDevice => "/devices/{id}",
            Operation::ListAlarms => "/alarms",
            Operation::AlarmSummary => "/alarms/summary",
            Operation::AcknowledgeAlarm => "/alarms/{id}/ack",
            Operation::AcceptAlarm => "/alarms/{id}/accept",
            Operation::AssignAlarm => "/alarms/{id}/assign/{username}",
            Operation::ListMetrics => "/metrics",
            Operation::MetricDefinitions => "/configuration_items/metricdefinitions",
            Operation::GetMetric => "/configuration_items/metrics/{id}",
            Operation::ListProbes => "/probes",
            Operation::ListRobots => "/robots",
        }
    }

    /// Start a request shaped for this operation. Placeholders are filled with
    /// [`ApiRequest::path_param`].
    pub fn request(&self) -> ApiRequest {
        ApiRequest {
            operation: *self,
            method: self.method(),
            path: self.endpoint().to_string(),
            query: Vec::new(),
            body: None,
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.key() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A fully described upstream call, independent of the HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub operation: Operation,
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn path_param(mut self, name: &str, value: &str) -> Self {
        let placeholder = format!("{{{}}}", name);
        self.path = self
            .path
            .replace(&placeholder, &urlencoding::encode(value));
        self
    }

    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when a non-empty value is given.
    pub fn query_opt(self, name: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.query(name, v),
            None => self,
        }
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}
