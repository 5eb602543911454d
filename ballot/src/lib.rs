//! Vote ledger — records one choice per (poll, identity), gated on
//! identity activation.

pub mod error;
pub mod guard;
pub mod ledger;

pub use error::LedgerError;
pub use guard::{check_activation, ActivationCheck};
pub use ledger::{CastOutcome, VoteLedger};
