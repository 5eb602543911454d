//! Ballot storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use vox_types::EmailAddress;

/// One identity's recorded choice for one poll.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BallotRecord {
    pub poll_id: u64,
    pub voter: EmailAddress,
    pub choice: String,
}

/// Trait for ballot storage.
///
/// `(poll_id, voter)` is the unique key. Implementations MUST make
/// `upsert_ballot` a single atomic operation against that key so that
/// concurrent casts by the same voter on the same poll serialize to one
/// final row — never a duplicate, never a leaked constraint error.
pub trait BallotStore {
    /// Insert the ballot, or overwrite the choice if one exists for the
    /// `(poll_id, voter)` pair.
    fn upsert_ballot(
        &self,
        poll_id: u64,
        voter: &EmailAddress,
        choice: &str,
    ) -> Result<BallotRecord, StoreError>;

    fn get_ballot(
        &self,
        poll_id: u64,
        voter: &EmailAddress,
    ) -> Result<Option<BallotRecord>, StoreError>;

    /// Number of ballots recorded for a poll.
    fn ballot_count(&self, poll_id: u64) -> Result<u64, StoreError>;
}
