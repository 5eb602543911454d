//! Nullable delivery seam — capture enqueued codes synchronously.

use std::sync::Mutex;

use vox_types::{EmailAddress, VerificationCode};
use vox_verification::CodeDelivery;

/// A delivery seam that records enqueued codes instead of dispatching
/// them. Unlike the real dispatcher there is no worker and no queue, so a
/// test can read the code back immediately after the request returns.
pub struct NullDelivery {
    enqueued: Mutex<Vec<(EmailAddress, VerificationCode)>>,
}

impl NullDelivery {
    pub fn new() -> Self {
        Self {
            enqueued: Mutex::new(Vec::new()),
        }
    }

    /// All enqueued deliveries (for assertions).
    pub fn enqueued(&self) -> Vec<(EmailAddress, VerificationCode)> {
        self.enqueued.lock().unwrap().clone()
    }

    /// The most recently enqueued code for `address`, if any.
    pub fn last_code_for(&self, address: &EmailAddress) -> Option<VerificationCode> {
        self.enqueued
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(a, _)| a == address)
            .map(|(_, c)| c.clone())
    }
}

impl Default for NullDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeDelivery for NullDelivery {
    fn enqueue(&self, address: &EmailAddress, code: &VerificationCode) {
        self.enqueued
            .lock()
            .unwrap()
            .push((address.clone(), code.clone()));
    }
}
