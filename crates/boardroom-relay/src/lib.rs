//! HTTP front of the chat relay.
//!
//! # Endpoints
//!
//! | Method  | Path         | Description                              |
//! |---------|--------------|------------------------------------------|
//! | POST    | /api/claude  | Relay a conversation to the Claude API   |
//! | OPTIONS | /api/claude  | CORS preflight, always 200               |
//! | other   | /api/claude  | 405 `{"error": "Method not allowed"}`    |

mod router;

pub use router::build_router;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use boardroom_core::config::RelayConfig;
use boardroom_interaction::{ChatRelay, ClaudeHttpUpstream};

/// Builds a relay talking to the configured upstream.
pub fn relay_from_config(config: &RelayConfig, server_api_key: Option<String>) -> Result<ChatRelay> {
    let timeout = config.request_timeout_secs.map(Duration::from_secs);
    let upstream = ClaudeHttpUpstream::new(config.upstream_url.clone(), timeout)
        .context("Failed to create Claude API client")?;

    Ok(ChatRelay::new(Arc::new(upstream))
        .with_config(config)
        .with_server_api_key(server_api_key))
}

/// Serves the relay on `listen_addr` until Ctrl-C.
pub async fn serve(listen_addr: &str, relay: Arc<ChatRelay>) -> Result<()> {
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", listen_addr))?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        "[Relay] Listening on http://{}/api/claude (model: {}, server key: {})",
        local_addr,
        relay.model(),
        if relay.has_server_api_key() { "configured" } else { "none" }
    );

    axum::serve(listener, build_router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Relay server failed")?;

    tracing::info!("[Relay] Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[Relay] Failed to listen for Ctrl-C: {}", e);
    }
}
