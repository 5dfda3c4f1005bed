//! # `account_guard`
//!
//! Password authentication and account-lockout decision engine.
//!
//! The crate owns one decision: given an email identifier and a raw secret,
//! either emit an authenticated principal or a typed failure. Everything
//! around that decision (HTTP, sessions, registration flows) belongs to the
//! caller.
//!
//! ## Flow
//!
//! - Accounts are looked up case-insensitively through the
//!   [`users::AccountStore`] seam.
//! - The pre-check gates run before the credential is verified: locked,
//!   then expired, then disabled, first failure wins.
//! - Failed verifications are counted; at the configured threshold
//!   (5 by default) the account locks and stays locked until an explicit
//!   unlock. The gates are re-evaluated after every failed attempt, so the
//!   attempt that crosses the threshold reports the lock itself.
//! - Successful verifications reset the counter, pass the credential-expiry
//!   post-check, and resolve the account's roles into authority tokens.
//!
//! Failure text is locale-resolved through [`messages::MessageResolver`];
//! stored credentials are Argon2id PHC strings and raw secrets stay inside
//! [`secrecy::SecretString`].

pub mod authentication;
pub mod messages;
pub mod users;

pub use authentication::{
    AuthConfig, AuthError, AuthenticationService, CredentialVerifier, Credentials, Mechanism,
};
pub use messages::{MessageCatalog, MessageKey, MessageResolver};
pub use users::{
    Account, AccountStore, AuthenticatedPrincipal, AuthorityToken, Identity, MemoryAccountStore,
    PgAccountStore, Role,
};
