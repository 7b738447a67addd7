//! glassfrog - fetch a Glassfrog resource and print it as JSON
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `GLASSFROG_API_KEY`: API key (required)
//! - `GLASSFROG_ENDPOINT`: API address (optional)
//! - `GLASSFROG_TIMEOUT_SECS`: transport timeout (optional)
//!
//! # Usage
//!
//! ```bash
//! # List circles
//! ./glassfrog
//!
//! # Any GET-able resource path
//! GLASSFROG_API_KEY=xxx ./glassfrog circles/42/roles
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use glassfrog::{config, Config, GlassfrogClient, Method, Params};

const DEFAULT_RESOURCE: &str = "circles";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries only the JSON result
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glassfrog=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let resource = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_RESOURCE.to_string());
    let path = format!("/{}", resource.trim_start_matches('/'));

    let endpoint = config::endpoint_from_env();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(endpoint = %endpoint, ?config, "Configuration loaded");

    let client =
        GlassfrogClient::new(endpoint.as_str(), config).context("Failed to create client")?;

    if let Err(e) = client.test_connection().await {
        tracing::error!(error = %e, "Connection test failed");
        tracing::warn!("Continuing; the request below will likely fail as well");
    }

    let body = client
        .request(Method::GET, &path, &Params::new())
        .await
        .map_err(|e| anyhow::anyhow!(e.sanitized_display(client.api_key())))
        .with_context(|| format!("GET {} failed", path))?;

    let pretty = serde_json::to_string_pretty(&body).context("Failed to format response")?;
    println!("{}", pretty);

    Ok(())
}
