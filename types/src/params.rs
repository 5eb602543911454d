//! Service parameters — every tunable the verification and delivery
//! pipeline reads, with the production defaults.

use serde::{Deserialize, Serialize};

/// Tunable parameters shared by the verification service and the
/// notification dispatcher.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceParams {
    /// Number of digits in a verification code.
    pub code_length: usize,

    /// Seconds a pending code stays live. While a live code exists for an
    /// address, further requests are refused rather than reissued.
    pub code_ttl_secs: u64,

    /// Fixed backoff (seconds) between delivery attempts.
    pub delivery_retry_delay_secs: u64,

    /// Delivery attempts after the first before a message is dead-lettered.
    pub delivery_max_retries: u32,
}

impl ServiceParams {
    /// Production defaults: 6-digit codes, 120s TTL, 5s retry backoff,
    /// 5 retries.
    pub fn defaults() -> Self {
        Self {
            code_length: 6,
            code_ttl_secs: 120,
            delivery_retry_delay_secs: 5,
            delivery_max_retries: 5,
        }
    }
}

impl Default for ServiceParams {
    fn default() -> Self {
        Self::defaults()
    }
}
