//! The verification service — request and check operations.

use std::sync::Arc;

use crate::code_gen::CodeGenerator;
use crate::delivery::CodeDelivery;
use crate::error::VerificationError;
use vox_store::code::{CodePut, CodeStore};
use vox_store::identity::{IdentityRecord, IdentityStore};
use vox_types::{EmailAddress, ServiceParams, Timestamp, VerificationCode};

/// Outcome of a code request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A new code was written and queued for delivery.
    Issued,
    /// A live code already exists for this address; it remains
    /// authoritative and no new email is sent. Soft condition, not a
    /// failure — retry after the TTL.
    RateLimited {
        /// Seconds the caller should wait before retrying.
        retry_after_secs: u64,
    },
}

/// Outcome of a code check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The code matched; the identity is now activated.
    Activated(IdentityRecord),
    /// Absent, expired, or mismatching code. Absent entries report the
    /// same way as mismatches so a caller cannot probe which addresses
    /// have codes pending.
    Rejected,
}

/// Orchestrates code issuance and checking against the injected stores.
pub struct VerificationService {
    codes: Arc<dyn CodeStore + Send + Sync>,
    identities: Arc<dyn IdentityStore + Send + Sync>,
    delivery: Arc<dyn CodeDelivery>,
    generator: CodeGenerator,
    code_ttl_secs: u64,
}

impl VerificationService {
    pub fn new(
        codes: Arc<dyn CodeStore + Send + Sync>,
        identities: Arc<dyn IdentityStore + Send + Sync>,
        delivery: Arc<dyn CodeDelivery>,
        params: &ServiceParams,
    ) -> Self {
        Self {
            codes,
            identities,
            delivery,
            generator: CodeGenerator::new(params.code_length),
            code_ttl_secs: params.code_ttl_secs,
        }
    }

    /// Seconds a pending code stays live.
    pub fn code_ttl_secs(&self) -> u64 {
        self.code_ttl_secs
    }

    /// Issue a verification code for `address`, unless one is already live.
    ///
    /// The store write is conditional: if two requests race, exactly one
    /// writes and the other observes `RateLimited`. Delivery is enqueued
    /// only for the winner.
    pub fn request_code(
        &self,
        address: &EmailAddress,
        now: Timestamp,
    ) -> Result<RequestOutcome, VerificationError> {
        let code = self.generator.generate();
        match self
            .codes
            .put_if_absent(address, code.as_str().as_bytes(), self.code_ttl_secs, now)?
        {
            CodePut::AlreadyPending => {
                tracing::debug!(address = %address, "code request refused: live code pending");
                Ok(RequestOutcome::RateLimited {
                    retry_after_secs: self.code_ttl_secs,
                })
            }
            CodePut::Written => {
                self.delivery.enqueue(address, &code);
                tracing::info!(address = %address, ttl_secs = self.code_ttl_secs, "verification code issued");
                Ok(RequestOutcome::Issued)
            }
        }
    }

    /// Check a submitted code and activate the identity on a match.
    ///
    /// The stored value is opaque bytes; it matches only if it decodes as
    /// UTF-8 and equals the submitted digit string byte for byte. A stored
    /// value that cannot be decoded is a mismatch, never an error. On a
    /// match the pending entry is deleted (closing the replay window) and
    /// the identity is upserted with `activated = true` — idempotent, so a
    /// re-check can re-confirm without creating a duplicate row.
    pub fn check_code(
        &self,
        address: &EmailAddress,
        submitted: &VerificationCode,
        now: Timestamp,
    ) -> Result<CheckOutcome, VerificationError> {
        let stored = match self.codes.get(address, now)? {
            Some(bytes) => bytes,
            None => {
                tracing::debug!(address = %address, "code check failed: no live code");
                return Ok(CheckOutcome::Rejected);
            }
        };

        let matches = std::str::from_utf8(&stored)
            .map(|text| text == submitted.as_str())
            .unwrap_or(false);
        if !matches {
            tracing::debug!(address = %address, "code check failed: mismatch");
            return Ok(CheckOutcome::Rejected);
        }

        self.codes.delete(address)?;
        let identity = self.identities.activate_identity(address, now)?;
        tracing::info!(address = %address, "identity activated");
        Ok(CheckOutcome::Activated(identity))
    }
}
