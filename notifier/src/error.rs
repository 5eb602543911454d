use thiserror::Error;

/// Delivery failure, split by whether a retry can help.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Transport hiccup — worth retrying after the backoff.
    #[error("transient delivery failure: {0}")]
    Transient(String),

    /// The message will never go through (e.g. the transport rejected the
    /// recipient outright). Dead-lettered without further attempts.
    #[error("permanent delivery failure: {0}")]
    Permanent(String),
}
