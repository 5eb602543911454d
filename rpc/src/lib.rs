//! HTTP API for the vox voting service.
//!
//! Endpoints:
//! - `POST /email`        — request a verification code
//! - `POST /email/verify` — submit a code, activating the identity
//! - `GET  /votes`        — list polls
//! - `PUT  /votes`        — cast or update a vote
//!
//! Input validation (address syntax, code shape) happens here, before the
//! services are called; the services only ever see well-formed values.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{router, RpcServer};
