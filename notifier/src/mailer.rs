//! Mail transport seam.

use crate::error::DeliveryError;
use vox_types::{EmailAddress, VerificationCode};

/// A mail transport. One call per delivery attempt; the dispatcher owns
/// the retry policy.
pub trait Mailer: Send + Sync {
    fn send_code(&self, address: &EmailAddress, code: &VerificationCode)
        -> Result<(), DeliveryError>;
}

/// Development transport: writes the would-be email to the log instead of
/// sending anything. Useful for local runs where no SMTP relay exists.
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send_code(
        &self,
        address: &EmailAddress,
        code: &VerificationCode,
    ) -> Result<(), DeliveryError> {
        tracing::info!(address = %address, code = %code, "verification code (log transport)");
        Ok(())
    }
}
