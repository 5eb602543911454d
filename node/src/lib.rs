//! Service bootstrap for vox.
//!
//! Owns the store and dispatcher lifecycles and wires the verification
//! service and vote ledger together. The HTTP layer receives the
//! assembled [`Node`] and never constructs stores itself.

pub mod config;
pub mod error;
pub mod node;

pub use config::{NodeConfig, PollSeed};
pub use error::NodeError;
pub use node::Node;
