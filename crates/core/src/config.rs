use std::time::Duration;
use thiserror::Error;

pub const ENV_BASE_URL: &str = "UIM_BASE_URL";
pub const ENV_USERNAME: &str = "UIM_USERNAME";
pub const ENV_PASSWORD: &str = "UIM_PASSWORD";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// Connection settings for one UIM server, fixed for the life of the process.
#[derive(Clone)]
pub struct UimConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub verify_ssl: bool,
    pub timeout: Duration,
}

impl UimConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            username: username.into(),
            password: password.into(),
            verify_ssl: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a config from optional raw values, reporting every missing one.
    ///
    /// Empty strings count as missing.
    pub fn from_parts(
        base_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ConfigError> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let base_url = present(base_url);
        let username = present(username);
        let password = present(password);

        let mut missing = Vec::new();
        if base_url.is_none() {
            missing.push(ENV_BASE_URL);
        }
        if username.is_none() {
            missing.push(ENV_USERNAME);
        }
        if password.is_none() {
            missing.push(ENV_PASSWORD);
        }

        match (base_url, username, password) {
            (Some(base_url), Some(username), Some(password)) => {
                Ok(Self::new(base_url, username, password))
            }
            _ => Err(ConfigError::Missing(missing)),
        }
    }

    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The password never reaches logs through Debug.
impl std::fmt::Debug for UimConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UimConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify_ssl", &self.verify_ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Absent means verify; otherwise only a case-insensitive `true` enables it.
pub fn parse_verify_ssl(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().eq_ignore_ascii_case("true"))
}

pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
