//! Verification-code lifecycle.
//!
//! The flow:
//! 1. **RequestCode**: generate a fixed-length numeric code, write it to the
//!    code store with a TTL (refusing while a live code exists), and hand it
//!    to the delivery seam. Returns immediately — delivery is asynchronous.
//! 2. **CheckCode**: compare the submitted code against the stored one and,
//!    on a match, perform the one-way activation transition that gates
//!    voting eligibility.
//!
//! The service is stateless; all shared state lives in the injected stores.

pub mod code_gen;
pub mod delivery;
pub mod error;
pub mod service;

pub use code_gen::CodeGenerator;
pub use delivery::CodeDelivery;
pub use error::VerificationError;
pub use service::{CheckOutcome, RequestOutcome, VerificationService};
