//! Relay server startup

use crate::config::Config;
use crate::error::{AcmeBotError, Result};
use crate::providers::create_provider;
use crate::relay::{router, RelaySettings, RelayState};
use std::net::SocketAddr;

/// Resolve the configured listen address
fn listen_addr(config: &Config) -> Result<SocketAddr> {
    format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| {
            AcmeBotError::Config(format!(
                "Invalid listen address {}:{}: {}",
                config.server.host, config.server.port, e
            ))
            .into()
        })
}

/// Run the relay server until the process is stopped
///
/// # Errors
///
/// Returns error if the provider cannot be created or the address cannot
/// be bound
pub async fn start_server(config: &Config) -> Result<()> {
    let provider = create_provider(&config.provider)?;
    let app = router(RelayState::new(provider, RelaySettings::from_config(config)));

    let addr = listen_addr(config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Relay server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
