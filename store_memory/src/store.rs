//! The `MemoryStore` — one struct implementing all four storage traits.

use std::collections::HashMap;
use std::sync::Mutex;

use vox_store::ballot::{BallotRecord, BallotStore};
use vox_store::code::{CodePut, CodeStore};
use vox_store::identity::{IdentityRecord, IdentityStore};
use vox_store::poll::{NewPoll, PollRecord, PollStore};
use vox_store::StoreError;
use vox_types::{EmailAddress, Timestamp};

/// A pending code entry: opaque bytes plus an absolute expiry.
struct CodeEntry {
    value: Vec<u8>,
    expires_at: Timestamp,
}

impl CodeEntry {
    fn is_live(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe in-memory store for identities, polls, ballots, and
/// pending codes.
pub struct MemoryStore {
    codes: Mutex<HashMap<String, CodeEntry>>,
    identities: Mutex<HashMap<String, IdentityRecord>>,
    polls: Mutex<PollTable>,
    /// Keyed by `(poll_id, voter)` — the uniqueness constraint.
    ballots: Mutex<HashMap<(u64, String), BallotRecord>>,
}

struct PollTable {
    next_id: u64,
    rows: Vec<PollRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
            identities: Mutex::new(HashMap::new()),
            polls: Mutex::new(PollTable {
                next_id: 1,
                rows: Vec::new(),
            }),
            ballots: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeStore for MemoryStore {
    fn put_if_absent(
        &self,
        address: &EmailAddress,
        code: &[u8],
        ttl_secs: u64,
        now: Timestamp,
    ) -> Result<CodePut, StoreError> {
        let mut codes = self.codes.lock().unwrap();
        if let Some(entry) = codes.get(address.as_str()) {
            if entry.is_live(now) {
                return Ok(CodePut::AlreadyPending);
            }
        }
        codes.insert(
            address.as_str().to_string(),
            CodeEntry {
                value: code.to_vec(),
                expires_at: now.plus_secs(ttl_secs),
            },
        );
        Ok(CodePut::Written)
    }

    fn get(&self, address: &EmailAddress, now: Timestamp) -> Result<Option<Vec<u8>>, StoreError> {
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .get(address.as_str())
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone()))
    }

    fn delete(&self, address: &EmailAddress) -> Result<(), StoreError> {
        self.codes.lock().unwrap().remove(address.as_str());
        Ok(())
    }
}

impl IdentityStore for MemoryStore {
    fn get_identity(&self, address: &EmailAddress) -> Result<Option<IdentityRecord>, StoreError> {
        Ok(self
            .identities
            .lock()
            .unwrap()
            .get(address.as_str())
            .cloned())
    }

    fn activate_identity(
        &self,
        address: &EmailAddress,
        now: Timestamp,
    ) -> Result<IdentityRecord, StoreError> {
        let mut identities = self.identities.lock().unwrap();
        let record = identities
            .entry(address.as_str().to_string())
            .or_insert_with(|| IdentityRecord {
                address: address.clone(),
                activated: false,
                activated_at: None,
            });
        if !record.activated {
            record.activated = true;
            record.activated_at = Some(now);
        }
        Ok(record.clone())
    }

    fn identity_count(&self) -> Result<u64, StoreError> {
        Ok(self.identities.lock().unwrap().len() as u64)
    }
}

impl PollStore for MemoryStore {
    fn create_poll(&self, poll: NewPoll) -> Result<PollRecord, StoreError> {
        let mut table = self.polls.lock().unwrap();
        let id = table.next_id;
        table.next_id += 1;
        let record = poll.into_record(id);
        table.rows.push(record.clone());
        Ok(record)
    }

    fn get_poll(&self, id: u64) -> Result<Option<PollRecord>, StoreError> {
        let table = self.polls.lock().unwrap();
        Ok(table.rows.iter().find(|p| p.id == id).cloned())
    }

    fn list_polls(&self) -> Result<Vec<PollRecord>, StoreError> {
        Ok(self.polls.lock().unwrap().rows.clone())
    }
}

impl BallotStore for MemoryStore {
    fn upsert_ballot(
        &self,
        poll_id: u64,
        voter: &EmailAddress,
        choice: &str,
    ) -> Result<BallotRecord, StoreError> {
        let record = BallotRecord {
            poll_id,
            voter: voter.clone(),
            choice: choice.to_string(),
        };
        self.ballots
            .lock()
            .unwrap()
            .insert((poll_id, voter.as_str().to_string()), record.clone());
        Ok(record)
    }

    fn get_ballot(
        &self,
        poll_id: u64,
        voter: &EmailAddress,
    ) -> Result<Option<BallotRecord>, StoreError> {
        Ok(self
            .ballots
            .lock()
            .unwrap()
            .get(&(poll_id, voter.as_str().to_string()))
            .cloned())
    }

    fn ballot_count(&self, poll_id: u64) -> Result<u64, StoreError> {
        Ok(self
            .ballots
            .lock()
            .unwrap()
            .keys()
            .filter(|(id, _)| *id == poll_id)
            .count() as u64)
    }
}
