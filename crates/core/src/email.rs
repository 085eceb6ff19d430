//! Email address value object.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A syntactically well-formed email address.
///
/// This is deliberately shallow validation (one `@`, non-empty local part and
/// domain, domain contains a dot, no whitespace). Deliverability is the
/// identity provider's problem, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();

        if raw.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("email must not contain whitespace"));
        }

        let mut parts = raw.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::validation("email must have a local part and a domain"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(DomainError::validation("email domain is malformed"));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        for raw in ["a@b.com", "first.last@sub.example.org", "x+tag@example.io"] {
            assert!(EmailAddress::parse(raw).is_ok(), "rejected {raw}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "nobody", "@b.com", "a@", "a@nodot", "a b@c.com", "a@.com", "a@com."] {
            assert!(EmailAddress::parse(raw).is_err(), "accepted {raw}");
        }
    }
}
