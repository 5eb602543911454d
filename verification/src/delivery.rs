//! The delivery seam between code issuance and the notification dispatcher.

use vox_types::{EmailAddress, VerificationCode};

/// Fire-and-forget handoff of a freshly issued code.
///
/// `enqueue` must return without blocking on transport; delivery success or
/// failure is never observed by the issuance path.
pub trait CodeDelivery: Send + Sync {
    fn enqueue(&self, address: &EmailAddress, code: &VerificationCode);
}
