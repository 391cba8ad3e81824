use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uim_core::{parse_verify_ssl, ConfigError, UimConfig};

/// MCP server exposing Broadcom DX UIM over stdio.
#[derive(Debug, Parser)]
#[command(name = "uim-mcp", version, about)]
pub struct Cli {
    /// Base URL of the UIM REST API (e.g. https://uim-server:8443/uimapi)
    #[arg(long, env = "UIM_BASE_URL")]
    pub base_url: Option<String>,

    /// API username
    #[arg(long, env = "UIM_USERNAME")]
    pub username: Option<String>,

    /// API password or token
    #[arg(long, env = "UIM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Verify TLS certificates; anything other than "true" disables it
    #[arg(long, env = "UIM_VERIFY_SSL")]
    pub verify_ssl: Option<String>,

    /// Timeout for each UIM request, in seconds
    #[arg(
        long,
        env = "UIM_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "UIM_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn config(&self) -> Result<UimConfig, ConfigError> {
        let config = UimConfig::from_parts(
            self.base_url.clone(),
            self.username.clone(),
            self.password.clone(),
        )?;

        Ok(config
            .with_verify_ssl(parse_verify_ssl(self.verify_ssl.as_deref()))
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

/// Load a `.env` file into the environment so the `env` fallbacks above see it.
///
/// Variables already set in the environment win. With no path, `.env` is looked
/// up from the working directory upwards.
pub fn load_dotenv(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => dotenvy::from_path(path).ok().map(|_| path.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Explicit flags win over the environment, so these do not depend on it.
    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("uim-mcp").chain(args.iter().copied()))
    }

    #[test]
    fn flags_build_config() {
        let cli = parse(&[
            "--base-url",
            "https://uim:8443/uimapi/",
            "--username",
            "admin",
            "--password",
            "secret",
            "--verify-ssl",
            "FALSE",
            "--timeout-secs",
            "5",
        ]);
        let config = cli.config().unwrap();

        assert_eq!(config.base_url, "https://uim:8443/uimapi");
        assert!(!config.verify_ssl);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn empty_credentials_are_reported() {
        let cli = parse(&[
            "--base-url",
            "https://uim",
            "--username",
            "",
            "--password",
            "",
        ]);
        let err = cli.config().unwrap_err();

        assert_eq!(
            err.to_string(),
            "missing required environment variables: UIM_USERNAME, UIM_PASSWORD"
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = Cli::try_parse_from([
            "uim-mcp",
            "--base-url",
            "https://uim",
            "--timeout-secs",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn dotenv_values_reach_env_fallbacks() {
        let dir = TempDir::new().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "# local overrides\nUIM_LOG=uim_core=trace\n").unwrap();

        assert_eq!(load_dotenv(Some(&env_file)), Some(env_file.clone()));

        // UIM_LOG is read by no other test, so setting it here cannot leak.
        let cli = parse(&["--base-url", "https://uim"]);
        assert_eq!(cli.log_level, "uim_core=trace");
    }

    #[test]
    fn missing_dotenv_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_dotenv(Some(&dir.path().join(".env"))), None);
    }
}
