use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use uim_core::UimClient;
use uim_mcp::cli::{self, Cli};
use uim_mcp::{logging, Dispatcher, McpServer};

fn main() -> Result<()> {
    let dotenv = cli::load_dotenv(None);
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    if let Some(path) = &dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let config = cli
        .config()
        .inspect_err(|e| tracing::error!(error = %e, "failed to initialize UIM client"))
        .context("invalid UIM configuration")?;
    let client = UimClient::new(&config).context("failed to initialize UIM client")?;
    tracing::info!(
        base_url = %config.base_url,
        verify_ssl = config.verify_ssl,
        timeout_secs = config.timeout.as_secs(),
        "initialized UIM client"
    );

    let mut server = McpServer::new(Dispatcher::new(client));

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = server.handle_request(&line);
        if let Some(resp) = response {
            writeln!(stdout, "{}", resp)?;
            stdout.flush()?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
