//! Axum-based HTTP server.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use vox_node::Node;

use crate::error::RpcError;
use crate::handlers;

/// Build the application router over a shared [`Node`].
pub fn router(node: Arc<Node>) -> Router {
    Router::new()
        .route("/email", post(handlers::request_code))
        .route("/email/verify", post(handlers::check_code))
        .route("/votes", get(handlers::list_polls))
        .route("/votes", put(handlers::cast_vote))
        .layer(CorsLayer::permissive())
        .with_state(node)
}

/// The HTTP server, configured with a port and the assembled node.
pub struct RpcServer {
    pub port: u16,
    pub node: Arc<Node>,
}

impl RpcServer {
    pub fn new(port: u16, node: Arc<Node>) -> Self {
        Self { port, node }
    }

    /// Start serving. Runs until the process is shut down.
    pub async fn start(&self) -> Result<(), RpcError> {
        let app = router(self.node.clone());
        let addr = format!("0.0.0.0:{}", self.port);
        info!("HTTP server listening on {}", addr);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        axum::serve(listener, app)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        Ok(())
    }
}
