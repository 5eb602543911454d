//! Abstract storage traits for the vox voting service.
//!
//! Every storage backend (in-memory, or a future redis/sql pairing)
//! implements these traits. The rest of the codebase depends only on the
//! traits.

pub mod ballot;
pub mod code;
pub mod error;
pub mod identity;
pub mod poll;

pub use ballot::{BallotRecord, BallotStore};
pub use code::{CodePut, CodeStore};
pub use error::StoreError;
pub use identity::{IdentityRecord, IdentityStore};
pub use poll::{NewPoll, PollRecord, PollStore};
