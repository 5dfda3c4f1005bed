//! Authentication tuning knobs.

use crate::messages::DEFAULT_LOCALE;
use crate::users::account::MAX_LOGIN_ATTEMPTS;

const DEFAULT_SUPPORT_CONTACT: &str = "help@email.com";

/// Configuration for the authentication core.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    max_login_attempts: i32,
    support_contact: String,
    default_locale: String,
    argon2_params: Option<(u32, u32, u32)>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_login_attempts: MAX_LOGIN_ATTEMPTS,
            support_contact: DEFAULT_SUPPORT_CONTACT.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            argon2_params: None,
        }
    }

    #[must_use]
    pub fn with_max_login_attempts(mut self, attempts: i32) -> Self {
        self.max_login_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_support_contact(mut self, contact: String) -> Self {
        self.support_contact = contact;
        self
    }

    #[must_use]
    pub fn with_default_locale(mut self, locale: String) -> Self {
        self.default_locale = locale;
        self
    }

    /// Override the Argon2id cost (memory KiB, iterations, parallelism).
    #[must_use]
    pub fn with_argon2_params(mut self, memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        self.argon2_params = Some((memory_kib, iterations, parallelism));
        self
    }

    #[must_use]
    pub const fn max_login_attempts(&self) -> i32 {
        self.max_login_attempts
    }

    #[must_use]
    pub fn support_contact(&self) -> &str {
        &self.support_contact
    }

    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub(crate) const fn argon2_params(&self) -> Option<(u32, u32, u32)> {
        self.argon2_params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_lock_policy() {
        let config = AuthConfig::new();
        assert_eq!(config.max_login_attempts(), 5);
        assert_eq!(config.support_contact(), "help@email.com");
        assert_eq!(config.default_locale(), "en");
        assert!(config.argon2_params().is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let config = AuthConfig::new()
            .with_max_login_attempts(3)
            .with_support_contact("soporte@email.com".to_string())
            .with_default_locale("es".to_string())
            .with_argon2_params(64, 2, 1);
        assert_eq!(config.max_login_attempts(), 3);
        assert_eq!(config.support_contact(), "soporte@email.com");
        assert_eq!(config.default_locale(), "es");
        assert_eq!(config.argon2_params(), Some((64, 2, 1)));
    }
}
