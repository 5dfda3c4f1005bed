//! Failed-login accounting.
//!
//! The tracker is the only mutator of the attempt counter and lock flag,
//! and it persists every mutation before returning so a concurrent attempt
//! against the same account observes the updated state. The pre-check is
//! re-run against the mutated account precisely so the attempt that crosses
//! the threshold reports a locked account rather than bad credentials.

use crate::users::account::Account;
use crate::users::store::AccountStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

pub struct AttemptTracker {
    store: Arc<dyn AccountStore>,
    max_attempts: i32,
}

impl AttemptTracker {
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, max_attempts: i32) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    /// Count a failed verification and persist the account. Returns the new
    /// attempt count.
    ///
    /// # Errors
    /// Returns an error if the store cannot persist the account.
    pub async fn record_failure(&self, account: &mut Account) -> Result<i32> {
        let attempts = account.record_failed_login(self.max_attempts);
        self.store.save(account).await?;
        debug!(
            attempts,
            locked = !account.account_non_locked,
            "recorded failed login attempt"
        );
        Ok(attempts)
    }

    /// Reset the counter and lock flag after a successful verification and
    /// persist the account.
    ///
    /// # Errors
    /// Returns an error if the store cannot persist the account.
    pub async fn record_success(&self, account: &mut Account) -> Result<()> {
        account.reset_login_attempts();
        self.store.save(account).await?;
        Ok(())
    }
}
