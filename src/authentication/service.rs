//! The authentication decision engine.
//!
//! A single attempt walks: identifier resolution, case-insensitive account
//! lookup, pre-check, credential verification, attempt accounting, a second
//! pre-check after a failure, post-check, authority resolution, principal
//! emission. Every exit is a typed [`AuthError`]; nothing is retried here.

use crate::authentication::checks::{post_login_check, pre_login_check};
use crate::authentication::config::AuthConfig;
use crate::authentication::error::{AuthError, Mechanism};
use crate::authentication::password::CredentialVerifier;
use crate::authentication::tracker::AttemptTracker;
use crate::messages::{MessageKey, MessageResolver};
use crate::users::account::{Account, AuthenticatedPrincipal, Identity};
use crate::users::store::AccountStore;
use anyhow::Result;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Identifier sentinel for requests that carried none. Real identifiers are
/// normalized emails and always contain `@`; the sentinel never does, so it
/// cannot collide with an account.
const NO_IDENTIFIER: &str = "NONE_PROVIDED";

/// Credentials presented by the caller. Only [`Credentials::Password`] is
/// handled by this engine; the other mechanisms are rejected at the boundary.
#[derive(Debug)]
pub enum Credentials {
    Password {
        identifier: Option<String>,
        secret: SecretString,
    },
    Passkey {
        credential_id: String,
    },
    RecoveryCode {
        identifier: String,
        code: SecretString,
    },
}

impl Credentials {
    #[must_use]
    pub fn password(identifier: Option<String>, secret: SecretString) -> Self {
        Self::Password { identifier, secret }
    }

    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        match self {
            Self::Password { .. } => Mechanism::Password,
            Self::Passkey { .. } => Mechanism::Passkey,
            Self::RecoveryCode { .. } => Mechanism::RecoveryCode,
        }
    }
}

/// Orchestrates the status checks, the credential verifier, and the attempt
/// tracker into one authenticate decision.
pub struct AuthenticationService {
    store: Arc<dyn AccountStore>,
    messages: Arc<dyn MessageResolver>,
    verifier: CredentialVerifier,
    tracker: AttemptTracker,
    config: AuthConfig,
}

impl AuthenticationService {
    /// # Errors
    /// Returns an error if the configured Argon2 parameters are invalid.
    pub fn new(
        store: Arc<dyn AccountStore>,
        messages: Arc<dyn MessageResolver>,
        config: AuthConfig,
    ) -> Result<Self> {
        let verifier = CredentialVerifier::new(&config)?;
        let tracker = AttemptTracker::new(Arc::clone(&store), config.max_login_attempts());
        Ok(Self {
            store,
            messages,
            verifier,
            tracker,
            config,
        })
    }

    /// Whether this engine handles the given credential mechanism.
    #[must_use]
    pub fn supports(&self, mechanism: Mechanism) -> bool {
        matches!(mechanism, Mechanism::Password)
    }

    /// The credential hasher/verifier, exposed for the registration side.
    #[must_use]
    pub const fn verifier(&self) -> &CredentialVerifier {
        &self.verifier
    }

    /// Authenticate an identifier-and-secret pair.
    ///
    /// Pass `locale` to resolve failure messages for the caller's locale;
    /// `None` uses the configured default.
    ///
    /// # Errors
    /// One terminal [`AuthError`] per the failure taxonomy.
    #[instrument(skip_all, fields(mechanism = %credentials.mechanism()))]
    pub async fn authenticate(
        &self,
        credentials: &Credentials,
        locale: Option<&str>,
    ) -> Result<AuthenticatedPrincipal, AuthError> {
        let locale = locale.unwrap_or_else(|| self.config.default_locale());

        let Credentials::Password { identifier, secret } = credentials else {
            return Err(AuthError::UnsupportedMechanism(credentials.mechanism()));
        };

        let identifier = identifier.as_deref().unwrap_or(NO_IDENTIFIER);
        let mut account = self.lookup(identifier, locale).await?;

        let identity = Identity::from(&account);
        pre_login_check(&identity, self.messages.as_ref(), &self.config, locale)?;

        if !self.verifier.matches(secret, &identity.password_hash) {
            let attempts = self.tracker.record_failure(&mut account).await?;

            // The counter mutation may have just locked the account; the
            // gates are evaluated again on a fresh snapshot so the crossing
            // attempt reports the lock, not bad credentials.
            pre_login_check(
                &Identity::from(&account),
                self.messages.as_ref(),
                &self.config,
                locale,
            )?;

            let max_attempts = self.config.max_login_attempts();
            let remaining = max_attempts - attempts;
            let params = [
                attempts.to_string(),
                max_attempts.to_string(),
                remaining.to_string(),
            ];
            return Err(AuthError::BadCredentials {
                attempts,
                max_attempts,
                remaining,
                message: self
                    .messages
                    .resolve(MessageKey::LoginAttempts, &params, locale),
            });
        }

        self.tracker.record_success(&mut account).await?;

        let identity = Identity::from(&account);
        post_login_check(&identity, self.messages.as_ref(), locale)?;

        Ok(AuthenticatedPrincipal { identity, account })
    }

    /// Look up an identity projection without any status or credential
    /// checks. Callers that need a fully checked identity use
    /// [`Self::authenticate`].
    ///
    /// # Errors
    /// `AccountNotFound` if the identifier does not resolve.
    #[instrument(skip(self))]
    pub async fn load_identity(
        &self,
        identifier: &str,
        locale: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let locale = locale.unwrap_or_else(|| self.config.default_locale());
        let account = self.lookup(identifier, locale).await?;
        Ok(Identity::from(&account))
    }

    /// Out-of-band unlock: clear the attempt counter and lock flag and
    /// persist. Exhausting the attempt budget has no other exit.
    ///
    /// # Errors
    /// `AccountNotFound` if the identifier does not resolve.
    #[instrument(skip(self))]
    pub async fn unlock(&self, identifier: &str, locale: Option<&str>) -> Result<(), AuthError> {
        let locale = locale.unwrap_or_else(|| self.config.default_locale());
        let mut account = self.lookup(identifier, locale).await?;
        self.tracker.record_success(&mut account).await?;
        Ok(())
    }

    async fn lookup(&self, identifier: &str, locale: &str) -> Result<Account, AuthError> {
        match self.store.find_by_email(identifier).await? {
            Some(account) => Ok(account),
            None => {
                debug!("no account for the supplied identifier");
                Err(AuthError::AccountNotFound {
                    message: self
                        .messages
                        .resolve(MessageKey::AccountNotFound, &[], locale),
                })
            }
        }
    }
}
