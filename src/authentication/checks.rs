//! Account status gates around credential verification.
//!
//! Two independent passes over the identity snapshot: the pre-check runs
//! before a credential is verified (and again after a failed attempt, once
//! the attempt counter has been applied), the post-check only after a
//! successful verification. Evaluation order in the pre-check is fixed:
//! locked, then expired, then disabled; the first failing gate wins.

use crate::authentication::config::AuthConfig;
use crate::authentication::error::AuthError;
use crate::messages::{MessageKey, MessageResolver};
use crate::users::account::Identity;
use tracing::debug;

/// Gates evaluated before credential verification.
///
/// # Errors
/// `AccountLocked`, `AccountExpired`, or `AccountDisabled`, in that
/// priority order.
pub fn pre_login_check(
    identity: &Identity,
    messages: &dyn MessageResolver,
    config: &AuthConfig,
    locale: &str,
) -> Result<(), AuthError> {
    let support = [config.support_contact().to_string()];

    if !identity.account_non_locked {
        debug!("account is locked");
        return Err(AuthError::AccountLocked {
            message: messages.resolve(MessageKey::AccountLocked, &support, locale),
        });
    }

    if !identity.account_non_expired {
        debug!("account is expired");
        return Err(AuthError::AccountExpired {
            message: messages.resolve(MessageKey::AccountExpired, &support, locale),
        });
    }

    if !identity.enabled {
        debug!("account is disabled");
        return Err(AuthError::AccountDisabled {
            message: messages.resolve(MessageKey::AccountDisabled, &support, locale),
        });
    }

    Ok(())
}

/// Gate evaluated only after a successful credential verification:
/// credential expiry, nothing else.
///
/// # Errors
/// `CredentialsExpired`.
pub fn post_login_check(
    identity: &Identity,
    messages: &dyn MessageResolver,
    locale: &str,
) -> Result<(), AuthError> {
    if !identity.credentials_non_expired {
        debug!("account credentials have expired");
        return Err(AuthError::CredentialsExpired {
            message: messages.resolve(MessageKey::CredentialsExpired, &[], locale),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageCatalog;
    use crate::users::account::Account;

    fn make_identity(mutate: impl FnOnce(&mut Account)) -> Identity {
        let mut account = Account::new(
            "Joan".to_string(),
            "Clarke".to_string(),
            "joan@example.com",
            "$argon2id$stub".to_string(),
        );
        mutate(&mut account);
        Identity::from(&account)
    }

    #[test]
    fn open_account_passes_both_checks() {
        let catalog = MessageCatalog::new();
        let identity = make_identity(|_| {});
        assert!(pre_login_check(&identity, &catalog, &AuthConfig::new(), "en").is_ok());
        assert!(post_login_check(&identity, &catalog, "en").is_ok());
    }

    #[test]
    fn locked_wins_over_expired_and_disabled() {
        let catalog = MessageCatalog::new();
        let identity = make_identity(|account| {
            account.account_non_locked = false;
            account.account_non_expired = false;
            account.enabled = false;
        });
        let err = pre_login_check(&identity, &catalog, &AuthConfig::new(), "en").unwrap_err();
        assert!(matches!(err, AuthError::AccountLocked { .. }));
    }

    #[test]
    fn expired_wins_over_disabled() {
        let catalog = MessageCatalog::new();
        let identity = make_identity(|account| {
            account.account_non_expired = false;
            account.enabled = false;
        });
        let err = pre_login_check(&identity, &catalog, &AuthConfig::new(), "en").unwrap_err();
        assert!(matches!(err, AuthError::AccountExpired { .. }));
    }

    #[test]
    fn disabled_is_the_last_gate() {
        let catalog = MessageCatalog::new();
        let identity = make_identity(|account| account.enabled = false);
        let err = pre_login_check(&identity, &catalog, &AuthConfig::new(), "en").unwrap_err();
        assert!(matches!(err, AuthError::AccountDisabled { .. }));
    }

    #[test]
    fn lock_message_names_the_support_contact() {
        let catalog = MessageCatalog::new();
        let config = AuthConfig::new().with_support_contact("support@edapp.test".to_string());
        let identity = make_identity(|account| account.account_non_locked = false);
        let err = pre_login_check(&identity, &catalog, &config, "en").unwrap_err();
        assert!(err.to_string().contains("support@edapp.test"));
    }

    #[test]
    fn post_check_only_sees_credential_expiry() {
        let catalog = MessageCatalog::new();
        // Locked, expired, and disabled are all pre-check business.
        let identity = make_identity(|account| {
            account.account_non_locked = false;
            account.account_non_expired = false;
            account.enabled = false;
        });
        assert!(post_login_check(&identity, &catalog, "en").is_ok());

        let identity = make_identity(|account| account.credentials_non_expired = false);
        let err = post_login_check(&identity, &catalog, "en").unwrap_err();
        assert!(matches!(err, AuthError::CredentialsExpired { .. }));
    }
}
