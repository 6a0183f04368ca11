//! Webflow CMS manager API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod state;

use std::io::ErrorKind;

use flowcms_core::AppError;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api_config::ApiConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;
    let app_state = api_services::build_app_state(&config).await?;
    let app = api_router::build_router(app_state, &config.frontend_origins)?;

    let listener = bind_with_fallback(&config).await?;
    let address = listener
        .local_addr()
        .map_err(|error| AppError::Internal(format!("failed to read listener address: {error}")))?;

    info!(%address, "flowcms-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

/// Binds the configured port, moving to the next port while the address is in use.
async fn bind_with_fallback(config: &ApiConfig) -> Result<TcpListener, AppError> {
    let mut port = config.api_port;
    let mut attempts_left = config.port_fallback_attempts;

    loop {
        let address = config.socket_address(port)?;
        match TcpListener::bind(address).await {
            Ok(listener) => return Ok(listener),
            Err(error) if error.kind() == ErrorKind::AddrInUse && attempts_left > 0 => {
                let next_port = port.checked_add(1).ok_or_else(|| {
                    AppError::Internal(format!("no free port above {port}"))
                })?;
                warn!(port, next_port, "port in use, trying the next one");
                port = next_port;
                attempts_left -= 1;
            }
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to bind listener on {address}: {error}"
                )));
            }
        }
    }
}
