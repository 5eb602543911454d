//! Request handlers and their DTOs.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use vox_ballot::CastOutcome;
use vox_node::Node;
use vox_types::{EmailAddress, Timestamp, VerificationCode};
use vox_verification::{CheckOutcome, RequestOutcome};

use crate::error::RpcError;

// ── Email verification ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Deserialize)]
pub struct CheckCodeBody {
    pub email: String,
    pub code: String,
}

/// `POST /email` — issue a verification code.
///
/// 200 when issued, 202 while a live code is pending, 400 on a malformed
/// address.
pub async fn request_code(
    State(node): State<Arc<Node>>,
    Json(body): Json<RequestCodeBody>,
) -> Result<Response, RpcError> {
    let address = match EmailAddress::parse(&body.email) {
        Ok(address) => address,
        Err(e) => return Ok(field_error("email", &e.to_string())),
    };

    match node.verification().request_code(&address, Timestamp::now())? {
        RequestOutcome::Issued => Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "detail": format!("please check your inbox at '{address}'")
            })),
        )
            .into_response()),
        RequestOutcome::RateLimited { retry_after_secs } => Ok((
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "detail": format!("please wait {retry_after_secs} seconds")
            })),
        )
            .into_response()),
    }
}

/// `POST /email/verify` — check a code.
///
/// 200 on activation, 401 on a wrong/expired/absent code, 400 on a
/// malformed address or code shape.
pub async fn check_code(
    State(node): State<Arc<Node>>,
    Json(body): Json<CheckCodeBody>,
) -> Result<Response, RpcError> {
    let address = match EmailAddress::parse(&body.email) {
        Ok(address) => address,
        Err(e) => return Ok(field_error("email", &e.to_string())),
    };
    let code = match VerificationCode::parse(&body.code, node.params().code_length) {
        Ok(code) => code,
        Err(e) => return Ok(field_error("code", &e.to_string())),
    };

    match node
        .verification()
        .check_code(&address, &code, Timestamp::now())?
    {
        CheckOutcome::Activated(_) => Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "detail": "successful" })),
        )
            .into_response()),
        CheckOutcome::Rejected => Ok((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "detail": "code is not correct" })),
        )
            .into_response()),
    }
}

// ── Votes ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PollSummary {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub option_a: String,
    pub option_b: String,
}

#[derive(Deserialize)]
pub struct CastVoteBody {
    pub email: String,
    pub poll_id: u64,
    pub choice: String,
}

/// `GET /votes` — list all polls. Empty array when none exist.
pub async fn list_polls(State(node): State<Arc<Node>>) -> Result<Response, RpcError> {
    let polls: Vec<PollSummary> = node
        .ledger()
        .list_polls()?
        .into_iter()
        .map(|p| PollSummary {
            id: p.id,
            title: p.title,
            slug: p.slug,
            description: p.description,
            option_a: p.option_a,
            option_b: p.option_b,
        })
        .collect();
    Ok((StatusCode::OK, Json(polls)).into_response())
}

/// `PUT /votes` — cast or update a vote.
///
/// 200 on record, 404 when the identity or poll is unknown, 403 when the
/// identity is not activated, 400 on an invalid choice (echoing the two
/// valid options) or malformed address.
pub async fn cast_vote(
    State(node): State<Arc<Node>>,
    Json(body): Json<CastVoteBody>,
) -> Result<Response, RpcError> {
    let address = match EmailAddress::parse(&body.email) {
        Ok(address) => address,
        Err(e) => return Ok(field_error("email", &e.to_string())),
    };

    match node
        .ledger()
        .cast_or_update(&address, body.poll_id, &body.choice)?
    {
        CastOutcome::Recorded { choice } => Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "detail": "successful",
                "user_choice": choice,
            })),
        )
            .into_response()),
        CastOutcome::IdentityNotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "detail": "email not found" })),
        )
            .into_response()),
        CastOutcome::NotActivated => Ok((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "detail": "email not activated" })),
        )
            .into_response()),
        CastOutcome::PollNotFound => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "detail": "vote does not exist" })),
        )
            .into_response()),
        CastOutcome::InvalidChoice { valid_options } => Ok((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "detail": format!("'{}' is not a valid option", body.choice),
                "valid_options": valid_options,
            })),
        )
            .into_response()),
    }
}

/// 400 with a field-level error body, DRF-style:
/// `{"email": ["enter a valid email address"]}`.
fn field_error(field: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ field: [message] })),
    )
        .into_response()
}
