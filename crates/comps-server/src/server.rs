//! API Server setup

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use comps_core::CompSetService;

use crate::error::ServerError;
use crate::routes::create_router;
use crate::state::{ApiConfig, AppState};

/// Build the router with middleware and resolve the listen address.
pub fn create_server(config: &ApiConfig) -> Result<(Router, SocketAddr), ServerError> {
    let service = CompSetService::open(&config.comp_sets_dir, &config.comparables_path)?;
    let state = AppState::new(service);

    let mut router = create_router(state).layer(TraceLayer::new_for_http());
    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let address = format!("{}:{}", config.host, config.port);
    let addr = address
        .parse()
        .map_err(|source| ServerError::Address { address, source })?;

    Ok((router, addr))
}

/// Serve until Ctrl-C.
pub async fn run_server(config: ApiConfig) -> Result<(), ServerError> {
    let (router, addr) = create_server(&config)?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        comp_sets_dir = %config.comp_sets_dir.display(),
        comparables = %config.comparables_path.display(),
        "comps API listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("comps API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
