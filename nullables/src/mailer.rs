//! Nullable mailer — record deliveries without a transport.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use vox_notifier::{DeliveryError, Mailer};
use vox_types::{EmailAddress, VerificationCode};

/// A test mailer that records every delivery instead of sending it.
///
/// Can be scripted to fail the next N attempts with a transient error,
/// for exercising the dispatcher's retry path.
pub struct NullMailer {
    transient_failures: AtomicU32,
    sent: Mutex<Vec<(EmailAddress, VerificationCode)>>,
}

impl NullMailer {
    pub fn new() -> Self {
        Self {
            transient_failures: AtomicU32::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Fail the next `n` send attempts with a transient error.
    pub fn fail_next(&self, n: u32) {
        self.transient_failures.store(n, Ordering::SeqCst);
    }

    /// All recorded deliveries (for assertions).
    pub fn sent(&self) -> Vec<(EmailAddress, VerificationCode)> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recently delivered code for `address`, if any.
    pub fn last_code_for(&self, address: &EmailAddress) -> Option<VerificationCode> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(a, _)| a == address)
            .map(|(_, c)| c.clone())
    }
}

impl Default for NullMailer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailer for NullMailer {
    fn send_code(
        &self,
        address: &EmailAddress,
        code: &VerificationCode,
    ) -> Result<(), DeliveryError> {
        if self
            .transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(DeliveryError::Transient("scripted failure".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((address.clone(), code.clone()));
        Ok(())
    }
}
