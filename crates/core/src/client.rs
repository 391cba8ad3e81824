use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::{json, Value};

use crate::catalog::{ApiRequest, Method, Operation};
use crate::config::UimConfig;
use crate::error::ApiError;

pub const DEFAULT_ALARM_LIMIT: u32 = 100;

const USER_AGENT: &str = concat!("uim-mcp/", env!("CARGO_PKG_VERSION"));

/// Performs one upstream request and decodes its JSON body.
pub trait HttpTransport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<Value, ApiError>;
}

pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl ReqwestTransport {
    pub fn new(config: &UimConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        tracing::debug!(
            operation = %request.operation,
            method = %request.method,
            path = %request.path,
            query = ?request.query,
            "sending UIM request"
        );

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self
            .client
            .request(method, self.url(&request.path))
            .basic_auth(&self.username, Some(&self.password));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| network_error(request, e))?;
        let status = response.status();
        let text = response.text().map_err(|e| network_error(request, e))?;

        if !status.is_success() {
            return Err(ApiError::Http {
                method: request.method,
                path: request.path.clone(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body: text,
            });
        }

        decode_body(request, &text)
    }
}

fn network_error(request: &ApiRequest, source: reqwest::Error) -> ApiError {
    ApiError::Network {
        method: request.method,
        path: request.path.clone(),
        source,
    }
}

/// An empty body decodes to `{}`.
pub fn decode_body(request: &ApiRequest, text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(text).map_err(|source| ApiError::Decode {
        method: request.method,
        path: request.path.clone(),
        source,
    })
}

#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub domain: Option<String>,
    pub hub: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AlarmFilter {
    /// 0=clear, 1=info, 2=warning, 3=minor, 4=major, 5=critical
    pub severity: Option<u8>,
    pub source: Option<String>,
    /// Zero leaves the server default in place.
    pub limit: u32,
}

impl Default for AlarmFilter {
    fn default() -> Self {
        Self {
            severity: None,
            source: None,
            limit: DEFAULT_ALARM_LIMIT,
        }
    }
}

/// Typed access to the UIM REST API. Each method issues exactly one request.
pub struct UimClient {
    transport: Box<dyn HttpTransport>,
}

impl UimClient {
    pub fn new(config: &UimConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }

    pub fn with_transport(transport: impl HttpTransport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.transport.send(&request)
    }

    pub fn list_devices(&self, filter: &DeviceFilter) -> Result<Value, ApiError> {
        self.execute(
            Operation::ListDevices
                .request()
                .query_opt("domain", filter.domain.as_deref())
                .query_opt("hub", filter.hub.as_deref()),
        )
    }

    pub fn get_device(&self, device_id: &str) -> Result<Value, ApiError> {
        self.execute(Operation::GetDevice.request().path_param("id", device_id))
    }

    pub fn list_alarms(&self, filter: &AlarmFilter) -> Result<Value, ApiError> {
        let mut request = Operation::ListAlarms.request();
        if filter.limit > 0 {
            request = request.query("limit", filter.limit);
        }
        if let Some(severity) = filter.severity {
            request = request.query("severity", severity);
        }
        self.execute(request.query_opt("source", filter.source.as_deref()))
    }

    pub fn alarm_summary(&self) -> Result<Value, ApiError> {
        self.execute(Operation::AlarmSummary.request())
    }

    pub fn acknowledge_alarm(&self, alarm_id: &str, message: Option<&str>) -> Result<Value, ApiError> {
        let body = match message.filter(|m| !m.is_empty()) {
            Some(message) => json!({ "message": message }),
            None => json!({}),
        };
        self.execute(
            Operation::AcknowledgeAlarm
                .request()
                .path_param("id", alarm_id)
                .json(body),
        )
    }

    pub fn accept_alarm(&self, alarm_id: &str) -> Result<Value, ApiError> {
        self.execute(Operation::AcceptAlarm.request().path_param("id", alarm_id))
    }

    pub fn assign_alarm(&self, alarm_id: &str, username: &str) -> Result<Value, ApiError> {
        self.execute(
            Operation::AssignAlarm
                .request()
                .path_param("id", alarm_id)
                .path_param("username", username),
        )
    }

    pub fn list_metrics(&self) -> Result<Value, ApiError> {
        self.execute(Operation::ListMetrics.request())
    }

    pub fn metric_definitions(&self) -> Result<Value, ApiError> {
        self.execute(Operation::MetricDefinitions.request())
    }

    pub fn get_metric(&self, metric_id: &str) -> Result<Value, ApiError> {
        self.execute(Operation::GetMetric.request().path_param("id", metric_id))
    }

    pub fn list_probes(&self) -> Result<Value, ApiError> {
        self.execute(Operation::ListProbes.request())
    }

    pub fn list_robots(&self) -> Result<Value, ApiError> {
        self.execute(Operation::ListRobots.request())
    }
}
