//! Account records and the transient identity projection built from them.

use crate::users::role::{resolve_authorities, AuthorityToken, Role};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Consecutive failed logins tolerated before the account locks.
pub const MAX_LOGIN_ATTEMPTS: i32 = 5;

/// A registered user's persisted identity and credential record.
///
/// The email is the unique identifier and is kept normalized (trimmed,
/// lowercase) so lookups stay case-insensitive. `password_hash` is an opaque
/// PHC-format string; the raw secret never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub screen_name: Option<String>,
    pub password_hash: String,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub credentials_non_expired: bool,
    pub account_non_locked: bool,
    pub login_attempts: i32,
    pub roles: BTreeSet<Role>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create an account with all status flags open and a zeroed attempt
    /// counter.
    #[must_use]
    pub fn new(first_name: String, last_name: String, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            first_name,
            last_name,
            screen_name: None,
            password_hash,
            enabled: true,
            account_non_expired: true,
            credentials_non_expired: true,
            account_non_locked: true,
            login_attempts: 0,
            roles: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether notification email may be sent to this account.
    #[must_use]
    pub const fn can_receive_email(&self) -> bool {
        self.account_non_expired && self.enabled
    }

    #[must_use]
    pub fn is_internal_user(&self) -> bool {
        self.roles.contains(&Role::InternalUser)
    }

    /// Grant a role. Returns false if the role was already granted; grants
    /// are unique per (account, role).
    pub fn grant_role(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    pub fn revoke_role(&mut self, role: Role) -> bool {
        self.roles.remove(&role)
    }

    /// The authority tokens this account resolves to.
    #[must_use]
    pub fn authorities(&self) -> BTreeSet<AuthorityToken> {
        resolve_authorities(&self.roles)
    }

    /// Count a failed login. The counter saturates at `max_attempts`; once
    /// it reaches the threshold the account locks and stays locked until an
    /// explicit reset. Returns the new count.
    pub fn record_failed_login(&mut self, max_attempts: i32) -> i32 {
        if self.login_attempts < max_attempts {
            self.login_attempts += 1;
        }
        if self.login_attempts >= max_attempts {
            self.account_non_locked = false;
        }
        self.login_attempts
    }

    /// Clear the attempt counter and the lock flag.
    pub fn reset_login_attempts(&mut self) {
        self.login_attempts = 0;
        self.account_non_locked = true;
    }
}

/// Normalize an email for lookup/uniqueness checks.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Transient status-and-authority projection of an [`Account`], built once
/// per authentication attempt. Distinct from the persisted record: checks
/// run against a snapshot, and the snapshot is what a successful attempt
/// hands to the session layer.
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub password_hash: String,
    pub enabled: bool,
    pub account_non_expired: bool,
    pub credentials_non_expired: bool,
    pub account_non_locked: bool,
    pub authorities: BTreeSet<AuthorityToken>,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            enabled: account.enabled,
            account_non_expired: account.account_non_expired,
            credentials_non_expired: account.credentials_non_expired,
            account_non_locked: account.account_non_locked,
            authorities: account.authorities(),
        }
    }
}

/// The success value of an authentication attempt: the checked identity
/// snapshot plus the account it was built from. Handed to session
/// management as the caller's principal.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub identity: Identity,
    pub account: Account,
}

impl AuthenticatedPrincipal {
    #[must_use]
    pub const fn authorities(&self) -> &BTreeSet<AuthorityToken> {
        &self.identity.authorities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            "Ada".to_string(),
            "Lovelace".to_string(),
            "Ada@Example.com",
            "$argon2id$stub".to_string(),
        )
    }

    #[test]
    fn email_is_normalized_on_construction() {
        assert_eq!(account().email, "ada@example.com");
    }

    #[test]
    fn failed_logins_below_threshold_leave_account_unlocked() {
        let mut account = account();
        for expected in 1..MAX_LOGIN_ATTEMPTS {
            assert_eq!(account.record_failed_login(MAX_LOGIN_ATTEMPTS), expected);
            assert!(account.account_non_locked);
        }
    }

    #[test]
    fn reaching_the_threshold_locks_the_account() {
        let mut account = account();
        account.login_attempts = MAX_LOGIN_ATTEMPTS - 1;
        assert_eq!(account.record_failed_login(MAX_LOGIN_ATTEMPTS), MAX_LOGIN_ATTEMPTS);
        assert!(!account.account_non_locked);
    }

    #[test]
    fn counter_saturates_at_the_threshold() {
        let mut account = account();
        account.login_attempts = MAX_LOGIN_ATTEMPTS;
        account.account_non_locked = false;
        assert_eq!(account.record_failed_login(MAX_LOGIN_ATTEMPTS), MAX_LOGIN_ATTEMPTS);
    }

    #[test]
    fn reset_clears_counter_and_lock() {
        let mut account = account();
        account.login_attempts = MAX_LOGIN_ATTEMPTS;
        account.account_non_locked = false;
        account.reset_login_attempts();
        assert_eq!(account.login_attempts, 0);
        assert!(account.account_non_locked);
    }

    #[test]
    fn duplicate_grants_are_rejected() {
        let mut account = account();
        assert!(account.grant_role(Role::User));
        assert!(!account.grant_role(Role::User));
        assert_eq!(account.roles.len(), 1);
    }

    #[test]
    fn helpers_reflect_flags_and_roles() {
        let mut account = account();
        assert_eq!(account.full_name(), "Ada Lovelace");
        assert!(account.can_receive_email());
        account.enabled = false;
        assert!(!account.can_receive_email());

        assert!(!account.is_internal_user());
        account.grant_role(Role::InternalUser);
        assert!(account.is_internal_user());
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("NONE_PROVIDED"));
    }

    #[test]
    fn identity_projects_flags_and_authorities() {
        let mut account = account();
        account.grant_role(Role::Admin);
        account.account_non_locked = false;
        let identity = Identity::from(&account);
        assert_eq!(identity.email, account.email);
        assert!(!identity.account_non_locked);
        assert_eq!(identity.authorities.len(), 1);
    }
}
