//! API server setup

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::error::{MyBudgetError, MyBudgetResult};
use crate::storage::Storage;

use super::routes::build_app;
use super::state::AppState;

/// Build the served router and resolve the bind address
pub fn create_server(storage: Arc<Storage>, settings: &Settings) -> MyBudgetResult<(Router, SocketAddr)> {
    let router = build_app(AppState::new(storage), settings.server.enable_cors);

    let addr: SocketAddr = settings.server.bind_address().parse().map_err(|e| {
        MyBudgetError::Config(format!(
            "Invalid bind address {}: {}",
            settings.server.bind_address(),
            e
        ))
    })?;

    Ok((router, addr))
}

/// Run the API server until Ctrl-C
pub async fn run_server(storage: Arc<Storage>, settings: &Settings) -> MyBudgetResult<()> {
    let (router, addr) = create_server(storage, settings)?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| MyBudgetError::Io(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("MyBudget API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MyBudgetError::Io(format!("Server error: {}", e)))?;

    tracing::info!("MyBudget API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
