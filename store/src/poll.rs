//! Poll storage trait.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use vox_types::slugify;

/// A two-option poll. Immutable after creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PollRecord {
    pub id: u64,
    pub title: String,
    /// Derived deterministically from the title at creation time.
    pub slug: String,
    pub description: String,
    pub option_a: String,
    pub option_b: String,
}

impl PollRecord {
    /// The two valid choices for this poll, in declaration order.
    pub fn valid_options(&self) -> [&str; 2] {
        [&self.option_a, &self.option_b]
    }

    /// Whether `choice` is one of the two options (exact string match).
    pub fn accepts(&self, choice: &str) -> bool {
        choice == self.option_a || choice == self.option_b
    }
}

/// Input for poll creation; the store assigns the id and derives the slug.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPoll {
    pub title: String,
    pub description: String,
    pub option_a: String,
    pub option_b: String,
}

impl NewPoll {
    pub fn into_record(self, id: u64) -> PollRecord {
        let slug = slugify(&self.title);
        PollRecord {
            id,
            title: self.title,
            slug,
            description: self.description,
            option_a: self.option_a,
            option_b: self.option_b,
        }
    }
}

/// Trait for poll storage.
pub trait PollStore {
    /// Create a poll, assigning the next id and deriving the slug.
    fn create_poll(&self, poll: NewPoll) -> Result<PollRecord, StoreError>;

    fn get_poll(&self, id: u64) -> Result<Option<PollRecord>, StoreError>;

    /// All polls in creation order.
    fn list_polls(&self) -> Result<Vec<PollRecord>, StoreError>;
}
