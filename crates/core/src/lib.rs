pub mod catalog;
pub mod client;
pub mod config;
pub mod error;

pub use catalog::{ApiRequest, Method, Operation, UnknownOperation};
pub use client::{
    decode_body, AlarmFilter, DeviceFilter, HttpTransport, ReqwestTransport, UimClient,
    DEFAULT_ALARM_LIMIT,
};
pub use config::{parse_verify_ssl, ConfigError, UimConfig, DEFAULT_TIMEOUT};
pub use error::{source_chain, ApiError};
