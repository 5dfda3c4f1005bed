//! Locale-resolved, parameterized user-facing messages.
//!
//! Every failure the authentication core surfaces carries text resolved
//! through [`MessageResolver`]; the HTTP boundary only decides presentation.
//! Templates use positional `{0}` placeholders.

use std::collections::HashMap;

/// Default locale used when a caller supplies none and no override matches.
pub const DEFAULT_LOCALE: &str = "en";

/// Keys for every user-facing failure message the core can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    AccountNotFound,
    AccountLocked,
    AccountExpired,
    AccountDisabled,
    CredentialsExpired,
    LoginAttempts,
    RolesIncorrect,
    RolesNotAllowed,
}

impl MessageKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccountNotFound => "account.notfound",
            Self::AccountLocked => "account.locked",
            Self::AccountExpired => "account.expired",
            Self::AccountDisabled => "account.disabled",
            Self::CredentialsExpired => "account.credentials.expired",
            Self::LoginAttempts => "account.login-attempts",
            Self::RolesIncorrect => "account.roles.incorrect",
            Self::RolesNotAllowed => "account.roles.not-allowed",
        }
    }
}

/// Resolves a message key to user-facing text for a locale.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, key: MessageKey, params: &[String], locale: &str) -> String;
}

/// Template catalog with per-locale overrides and a default-locale fallback.
pub struct MessageCatalog {
    default_locale: String,
    templates: HashMap<String, HashMap<MessageKey, String>>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let mut english = HashMap::new();
        english.insert(
            MessageKey::AccountNotFound,
            "No account was found for the supplied email address.".to_string(),
        );
        english.insert(
            MessageKey::AccountLocked,
            "Your account has been locked. Please contact support at {0} for further details."
                .to_string(),
        );
        english.insert(
            MessageKey::AccountExpired,
            "Your account has expired. Please contact support at {0} for further details."
                .to_string(),
        );
        english.insert(
            MessageKey::AccountDisabled,
            "Your account has been disabled. Please contact support at {0} for further details."
                .to_string(),
        );
        english.insert(
            MessageKey::CredentialsExpired,
            "Your account password has expired. Please contact support for further details."
                .to_string(),
        );
        english.insert(
            MessageKey::LoginAttempts,
            "Invalid email or password. Attempt {0} of {1}; {2} attempts remaining.".to_string(),
        );
        english.insert(
            MessageKey::RolesIncorrect,
            "Your account roles are not configured correctly.".to_string(),
        );
        english.insert(
            MessageKey::RolesNotAllowed,
            "Your account is not allowed to access this application.".to_string(),
        );

        let mut templates = HashMap::new();
        templates.insert(DEFAULT_LOCALE.to_string(), english);

        Self {
            default_locale: DEFAULT_LOCALE.to_string(),
            templates,
        }
    }
}

impl MessageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_locale(mut self, locale: String) -> Self {
        self.default_locale = locale;
        self
    }

    /// Register or override one template for a locale.
    #[must_use]
    pub fn with_message(mut self, locale: &str, key: MessageKey, template: String) -> Self {
        self.templates
            .entry(locale.to_string())
            .or_default()
            .insert(key, template);
        self
    }

    fn template(&self, key: MessageKey, locale: &str) -> Option<&str> {
        self.templates
            .get(locale)
            .and_then(|catalog| catalog.get(&key))
            .or_else(|| {
                self.templates
                    .get(&self.default_locale)
                    .and_then(|catalog| catalog.get(&key))
            })
            .map(String::as_str)
    }
}

impl MessageResolver for MessageCatalog {
    fn resolve(&self, key: MessageKey, params: &[String], locale: &str) -> String {
        match self.template(key, locale) {
            Some(template) => format_template(template, params),
            // No template anywhere: surface the key so the gap is visible.
            None => key.as_str().to_string(),
        }
    }
}

fn format_template(template: &str, params: &[String]) -> String {
    let mut message = template.to_string();
    for (index, param) in params.iter().enumerate() {
        message = message.replace(&format!("{{{index}}}"), param);
    }
    message
}
