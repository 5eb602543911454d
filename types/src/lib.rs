//! Fundamental types for the vox voting service.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: email addresses, verification codes, timestamps, service
//! parameters, and slug derivation.

pub mod address;
pub mod code;
pub mod params;
pub mod slug;
pub mod time;

pub use address::{AddressError, EmailAddress};
pub use code::{CodeError, VerificationCode};
pub use params::ServiceParams;
pub use slug::slugify;
pub use time::Timestamp;
