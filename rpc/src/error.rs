//! RPC error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("store error: {0}")]
    Store(String),

    #[error("server error: {0}")]
    Server(String),
}

impl From<vox_verification::VerificationError> for RpcError {
    fn from(e: vox_verification::VerificationError) -> Self {
        RpcError::Store(e.to_string())
    }
}

impl From<vox_ballot::LedgerError> for RpcError {
    fn from(e: vox_ballot::LedgerError) -> Self {
        RpcError::Store(e.to_string())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": "internal error" })),
        )
            .into_response()
    }
}
