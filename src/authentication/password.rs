//! One-way credential hashing and verification.
//!
//! Stored hashes are PHC-format Argon2id strings; the salt travels inside
//! the hash and a fresh one is drawn for every `hash` call. Raw secrets stay
//! wrapped in [`SecretString`] and are never logged or echoed back.

use crate::authentication::config::AuthConfig;
use anyhow::{anyhow, Result};
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Verifies supplied secrets against stored hashes, and produces new hashes
/// for the registration side of the same scheme.
#[derive(Clone)]
pub struct CredentialVerifier {
    argon2: Argon2<'static>,
}

impl CredentialVerifier {
    /// Build a verifier from the configured cost, or the crate defaults.
    ///
    /// # Errors
    /// Returns an error if the configured Argon2 parameters are invalid.
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let argon2 = match config.argon2_params() {
            Some((memory_kib, iterations, parallelism)) => {
                let params = Params::new(memory_kib, iterations, parallelism, None)
                    .map_err(|err| anyhow!("invalid argon2 parameters: {err}"))?;
                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            }
            None => Argon2::default(),
        };
        Ok(Self { argon2 })
    }

    /// Whether `raw_secret` corresponds to `stored_hash`.
    ///
    /// Fails closed: a malformed stored hash is a mismatch, not an error.
    /// Deterministic for a given (secret, hash) pair.
    #[must_use]
    pub fn matches(&self, raw_secret: &SecretString, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            debug!("stored password hash is malformed");
            return false;
        };
        self.argon2
            .verify_password(raw_secret.expose_secret().as_bytes(), &parsed)
            .is_ok()
    }

    /// Hash a raw secret with a fresh random salt.
    ///
    /// # Errors
    /// Returns an error if hashing fails.
    pub fn hash(&self, raw_secret: &SecretString) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(raw_secret.expose_secret().as_bytes(), &salt)
            .map_err(|err| anyhow!("failed to hash password: {err}"))?;
        Ok(hash.to_string())
    }
}
