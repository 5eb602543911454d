//! Email address type — the unit of voting eligibility.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a raw string was refused as an email address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("enter a valid email address")]
    Malformed,

    #[error("email address exceeds {0} characters")]
    TooLong(usize),
}

/// A syntactically valid email address in canonical form.
///
/// Canonical means: surrounding whitespace stripped and the domain part
/// lowercased, so `" A@Example.COM "` and `"A@example.com"` resolve to the
/// same identity key. The local part keeps its case (mail servers may be
/// case-sensitive there).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Maximum accepted length, matching common mailbox limits.
    pub const MAX_LEN: usize = 254;

    /// Parse and canonicalize a raw string.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim();
        if trimmed.len() > Self::MAX_LEN {
            return Err(AddressError::TooLong(Self::MAX_LEN));
        }

        let (local, domain) = trimmed.split_once('@').ok_or(AddressError::Malformed)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(AddressError::Malformed);
        }
        if local.contains(char::is_whitespace) || domain.contains(char::is_whitespace) {
            return Err(AddressError::Malformed);
        }

        // Domain must be dotted labels, none empty, no leading/trailing dot.
        if domain.split('.').any(|label| label.is_empty()) || !domain.contains('.') {
            return Err(AddressError::Malformed);
        }

        Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase())))
    }

    /// Return the canonical address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<EmailAddress> for String {
    fn from(addr: EmailAddress) -> Self {
        addr.0
    }
}
