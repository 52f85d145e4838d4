//! HTTP front-end for the ligand pipeline.
//!
//! Routes:
//!
//! - `GET /api/v1/pdb/:ligand_id` returns PDB text (200), or a JSON error body with 400 for
//!   malformed ids, 404 when no structure carries the ligand, and 500 for upstream or
//!   conversion failures.
//! - `GET /health` returns `OK`.
//!
//! Authentication is expected to happen in front of this service.

mod error;
mod handlers;

pub use error::ApiError;

use crate::io::ConvertOptions;
use crate::remote::{StructureCache, StructureSource};
use axum::{Router, routing::get};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 3000;

/// Shared per-process state handed to every request.
#[derive(Debug)]
pub struct AppState<S> {
    pub source: S,
    pub cache: StructureCache,
    pub convert_options: ConvertOptions,
}

impl<S> AppState<S> {
    pub fn new(source: S, cache: StructureCache, convert_options: ConvertOptions) -> Self {
        Self {
            source,
            cache,
            convert_options,
        }
    }
}

/// Listening address for [`serve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

pub fn router<S: StructureSource + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/api/v1/pdb/:ligand_id", get(handlers::get_pdb::<S>))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Binds `config` and serves the router until Ctrl-C.
///
/// # Errors
///
/// Returns the underlying I/O error if the address cannot be bound or the accept loop
/// fails.
pub async fn serve<S: StructureSource + 'static>(
    config: ServerConfig,
    state: AppState<S>,
) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    log::info!("  - Ligand endpoint: /api/v1/pdb/:ligand_id");
    log::info!("  - Health endpoint: /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
