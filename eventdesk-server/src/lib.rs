//! Local HTTP server hosting an in-memory events collection.
//!
//! Stands in for the REST service eventdesk talks to during development
//! and in integration tests.

pub mod routes;
pub mod state;

use axum::Router;
use eventdesk_core::memory::MemoryCollection;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub const DEFAULT_PORT: u16 = 3000;

/// Build the application router over `collection`.
pub fn router(collection: MemoryCollection) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::events::router())
        .with_state(AppState::new(collection))
        .layer(cors)
}

/// Serve `collection` on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, collection: MemoryCollection) -> std::io::Result<()> {
    axum::serve(listener, router(collection)).await
}
