//! Verification code type — a short-lived numeric secret proving inbox control.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a submitted string was refused as a verification code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    #[error("code must be exactly {expected} digits, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("code must contain only digits")]
    NonDigit,
}

/// A fixed-length string of ASCII digits.
///
/// Shape validation happens at the boundary via [`VerificationCode::parse`];
/// a constructed code is always well-formed for its length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Validate a submitted string against the configured code length.
    pub fn parse(raw: &str, expected_len: usize) -> Result<Self, CodeError> {
        if raw.len() != expected_len {
            return Err(CodeError::WrongLength {
                expected: expected_len,
                got: raw.len(),
            });
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodeError::NonDigit);
        }
        Ok(Self(raw.to_string()))
    }

    /// Wrap a string the generator already guarantees to be digit-only.
    ///
    /// Callers outside the generator should use [`VerificationCode::parse`].
    pub fn from_digits(digits: String) -> Self {
        debug_assert!(digits.bytes().all(|b| b.is_ascii_digit()));
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_digits() {
        let code = VerificationCode::parse("654874", 6).unwrap();
        assert_eq!(code.as_str(), "654874");
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            VerificationCode::parse("12345", 6),
            Err(CodeError::WrongLength { expected: 6, got: 5 })
        );
        assert_eq!(
            VerificationCode::parse("1234567", 6),
            Err(CodeError::WrongLength { expected: 6, got: 7 })
        );
    }

    #[test]
    fn rejects_non_digit() {
        assert_eq!(VerificationCode::parse("12a456", 6), Err(CodeError::NonDigit));
        assert_eq!(VerificationCode::parse("12 456", 6), Err(CodeError::NonDigit));
    }
}
