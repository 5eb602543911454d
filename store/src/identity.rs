//! Identity storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use vox_types::{EmailAddress, Timestamp};

/// A verified (or not-yet-verified) email identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub address: EmailAddress,
    /// One-way flag: set by the activation transition, never reverts.
    pub activated: bool,
    pub activated_at: Option<Timestamp>,
}

/// Trait for identity storage. Addresses are unique.
pub trait IdentityStore {
    fn get_identity(&self, address: &EmailAddress) -> Result<Option<IdentityRecord>, StoreError>;

    /// Upsert `address` with `activated = true`.
    ///
    /// Creates the row if absent; if it already exists the flag is set (a
    /// no-op when already set) and the original `activated_at` is kept.
    /// Idempotent — calling twice never produces two rows.
    fn activate_identity(
        &self,
        address: &EmailAddress,
        now: Timestamp,
    ) -> Result<IdentityRecord, StoreError>;

    fn identity_count(&self) -> Result<u64, StoreError>;
}
