//! Activation guard — the explicit permission check in front of every
//! ballot write.

use vox_store::identity::IdentityRecord;

/// Typed result of the activation check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationCheck {
    Granted,
    /// The identity exists but has never completed verification.
    Denied,
}

/// Check whether a resolved identity may vote.
///
/// Called unconditionally before any poll logic; an unactivated identity
/// never learns whether the poll or choice would have been valid.
pub fn check_activation(identity: &IdentityRecord) -> ActivationCheck {
    if identity.activated {
        ActivationCheck::Granted
    } else {
        ActivationCheck::Denied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vox_types::{EmailAddress, Timestamp};

    fn identity(activated: bool) -> IdentityRecord {
        IdentityRecord {
            address: EmailAddress::parse("a@x.com").unwrap(),
            activated,
            activated_at: activated.then(|| Timestamp::new(1000)),
        }
    }

    #[test]
    fn activated_identity_is_granted() {
        assert_eq!(check_activation(&identity(true)), ActivationCheck::Granted);
    }

    #[test]
    fn unactivated_identity_is_denied() {
        assert_eq!(check_activation(&identity(false)), ActivationCheck::Denied);
    }
}
