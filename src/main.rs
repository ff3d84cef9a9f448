//! `RunPod` MCP server binary.
//!
//! Speaks MCP over stdio: stdout carries the protocol, so all logging goes to
//! stderr. A failure to establish the transport terminates the process with a
//! non-zero exit.
//!
//! ## Usage
//!
//! Register the binary with an MCP client, e.g.:
//!
//! ```json
//! { "mcpServers": { "runpod": { "command": "runpod_mcp" } } }
//! ```

use rmcp::{ServiceExt, transport::stdio};
use runpod_mcp::RunpodMcpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let server = RunpodMcpServer::from_env()?;
    tracing::info!("runpod mcp server listening on stdio");

    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    tracing::info!("runpod mcp server shutdown");
    Ok(())
}
