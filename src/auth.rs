//! Token verification boundary.
//!
//! Actual signature verification is delegated to an external identity
//! provider; this module only models the result. A [`TokenVerifier`]
//! implementation wraps whatever SDK talks to the provider and is constructed
//! once at startup and injected wherever identities are resolved - there is
//! no hidden process-wide client singleton.

use crate::errors::{Error, Result};

/// Typed result of verifying a bearer credential.
///
/// Both claims are required. Constructing the token fails fast at the
/// boundary instead of letting downstream code probe for missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    /// The identity provider's stable subject identifier
    pub subject: String,
    /// The verified email address
    pub email: String,
}

impl VerifiedToken {
    /// Builds a verified token from the provider's decoded claims.
    ///
    /// # Errors
    /// Returns [`Error::Unauthenticated`] if either claim is empty.
    pub fn new(subject: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let subject = subject.into();
        let email = email.into();

        if subject.trim().is_empty() {
            return Err(Error::Unauthenticated {
                reason: "token is missing a subject claim".to_string(),
            });
        }
        if email.trim().is_empty() {
            return Err(Error::Unauthenticated {
                reason: "token is missing an email claim".to_string(),
            });
        }

        Ok(Self { subject, email })
    }
}

/// External collaborator that turns a bearer credential into verified claims.
///
/// The core never verifies signatures itself.
pub trait TokenVerifier {
    /// Verifies `bearer` and returns its claims.
    ///
    /// # Errors
    /// Returns [`Error::Unauthenticated`] for missing, invalid, or expired
    /// credentials.
    fn verify(&self, bearer: &str) -> impl Future<Output = Result<VerifiedToken>> + Send;
}
