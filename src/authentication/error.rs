//! Typed authentication failures.
//!
//! Every failure of a single `authenticate` call is terminal; nothing is
//! retried internally. The caller decides presentation.

use std::fmt;
use thiserror::Error;

/// Credential mechanisms a caller may present. Only the email-and-password
/// pair is handled here; the other mechanisms belong to their own flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    Password,
    Passkey,
    RecoveryCode,
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Password => "password",
            Self::Passkey => "passkey",
            Self::RecoveryCode => "recovery-code",
        };
        f.write_str(name)
    }
}

/// Outcome taxonomy for a failed authentication attempt. The user-facing
/// variants carry their locale-resolved message.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{message}")]
    AccountNotFound { message: String },
    #[error("{message}")]
    AccountLocked { message: String },
    #[error("{message}")]
    AccountExpired { message: String },
    #[error("{message}")]
    AccountDisabled { message: String },
    #[error("{message}")]
    BadCredentials {
        attempts: i32,
        max_attempts: i32,
        remaining: i32,
        message: String,
    },
    #[error("{message}")]
    CredentialsExpired { message: String },
    #[error("unsupported authentication mechanism: {0}")]
    UnsupportedMechanism(Mechanism),
    /// A collaborator (store, hasher) failed; not a user-facing outcome.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_variants_display_their_message() {
        let err = AuthError::AccountLocked {
            message: "locked".to_string(),
        };
        assert_eq!(err.to_string(), "locked");
    }

    #[test]
    fn unsupported_mechanism_names_the_mechanism() {
        let err = AuthError::UnsupportedMechanism(Mechanism::Passkey);
        assert_eq!(
            err.to_string(),
            "unsupported authentication mechanism: passkey"
        );
    }
}
