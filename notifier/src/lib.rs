//! Asynchronous delivery of verification codes.
//!
//! Issuance publishes a delivery request onto a channel and returns; a
//! spawned worker consumes the queue, talks to the mail transport, and
//! retries transient failures with a fixed backoff up to a bounded
//! ceiling. Exhausted or permanently failed deliveries go to the
//! operational log — never back to the request path, which has already
//! answered.

pub mod dispatcher;
pub mod error;
pub mod mailer;

pub use dispatcher::{Dispatcher, DispatcherHandle, RetryPolicy};
pub use error::DeliveryError;
pub use mailer::{LogMailer, Mailer};
