//! Pending verification code storage trait.
//!
//! A key-value namespace mapping an address to an opaque byte value with a
//! per-entry expiry, mirroring a redis `SET key value EX ttl`. Values are
//! bytes, not strings: the comparison policy (and tolerance for values that
//! are not valid text) belongs to the verification service, not the store.

use crate::StoreError;
use vox_types::{EmailAddress, Timestamp};

/// Outcome of a conditional code write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodePut {
    /// No live entry existed; the new code was written.
    Written,
    /// A live entry already exists and remains authoritative.
    AlreadyPending,
}

/// Trait for pending-code storage.
///
/// Implementations MUST make `put_if_absent` atomic: two concurrent calls
/// for the same address must not both observe "no live entry". A plain
/// read-then-write is not a valid implementation.
pub trait CodeStore {
    /// Write `code` for `address` with a TTL, unless a live (non-expired)
    /// entry already exists.
    fn put_if_absent(
        &self,
        address: &EmailAddress,
        code: &[u8],
        ttl_secs: u64,
        now: Timestamp,
    ) -> Result<CodePut, StoreError>;

    /// Fetch the live code bytes for `address`, if any. Expired entries are
    /// treated as absent.
    fn get(&self, address: &EmailAddress, now: Timestamp) -> Result<Option<Vec<u8>>, StoreError>;

    /// Remove the entry for `address` (live or expired). No-op if absent.
    fn delete(&self, address: &EmailAddress) -> Result<(), StoreError>;
}
