//! Nullable infrastructure for deterministic testing.
//!
//! The external edges of the service (mail transport, delivery queue) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Record instead of send
//! - Can be scripted to fail programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod delivery;
pub mod mailer;

pub use delivery::NullDelivery;
pub use mailer::NullMailer;
