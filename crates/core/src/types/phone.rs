//! Phone number type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepted shape after stripping formatting: optional `+`, a non-zero
/// leading digit, at most 16 digits total.
#[allow(clippy::unwrap_used)] // pattern is a compile-time constant
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap());

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty after stripping formatting.
    #[error("phone number cannot be empty")]
    Empty,
    /// The digits do not form a valid phone number.
    #[error("phone number is not valid")]
    Invalid,
}

/// A phone number.
///
/// Billing forms accept loosely formatted input; spaces, hyphens and
/// parentheses are stripped before validation and the stored value keeps
/// only the normalized form (optional leading `+`, then digits).
///
/// ## Examples
///
/// ```
/// use crescent_core::Phone;
///
/// let phone = Phone::parse("+91 (22) 1234-5678").unwrap();
/// assert_eq!(phone.as_str(), "+912212345678");
///
/// assert!(Phone::parse("abc").is_err());
/// assert!(Phone::parse("0123").is_err()); // leading zero
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a loosely formatted string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after normalization or does
    /// not match the accepted digit pattern.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if normalized.is_empty() {
            return Err(PhoneError::Empty);
        }

        if !PHONE_PATTERN.is_match(&normalized) {
            return Err(PhoneError::Invalid);
        }

        Ok(Self(normalized))
    }

    /// Returns the normalized phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Phone` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Phone::parse("1234567890").is_ok());
        assert!(Phone::parse("+911234567890").is_ok());
        assert!(Phone::parse("9").is_ok());
    }

    #[test]
    fn test_parse_strips_formatting() {
        let phone = Phone::parse("+91 (22) 1234-5678").unwrap();
        assert_eq!(phone.as_str(), "+912212345678");
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert!(matches!(Phone::parse("abc"), Err(PhoneError::Invalid)));
    }

    #[test]
    fn test_parse_rejects_leading_zero() {
        assert!(matches!(Phone::parse("0123456"), Err(PhoneError::Invalid)));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(Phone::parse(""), Err(PhoneError::Empty)));
        assert!(matches!(Phone::parse(" - ()"), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_rejects_too_long() {
        // 17 digits exceeds the 16-digit cap
        assert!(matches!(
            Phone::parse("12345678901234567"),
            Err(PhoneError::Invalid)
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = Phone::parse("1234567890").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"1234567890\"");

        let parsed: Phone = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
