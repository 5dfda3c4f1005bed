//! Account lookup and persistence.
//!
//! The authentication core only ever touches accounts through
//! [`AccountStore`]; the Postgres implementation is the production store and
//! the in-memory implementation backs tests and embedded use.

use crate::users::account::{normalize_email, Account};
use crate::users::role::Role;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Narrow persistence seam consumed by the authentication core.
///
/// `save` must be durable before it returns so a concurrent attempt from
/// another session observes the updated attempt counter.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Case-insensitive lookup by email identifier.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Persist the account's current state.
    async fn save(&self, account: &Account) -> Result<()>;
}

/// Postgres-backed store. Role grants are administered out of band; `save`
/// writes the account row only.
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn account_from_row(row: &PgRow) -> Result<Account, sqlx::Error> {
        let role_values: Vec<String> = row.try_get("roles")?;
        let mut roles = BTreeSet::new();
        for value in &role_values {
            roles.insert(Role::from_db(value)?);
        }

        let created_at: DateTime<Utc> = row.try_get("created_at")?;

        Ok(Account {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            screen_name: row.try_get("screen_name")?,
            password_hash: row.try_get("password_hash")?,
            enabled: row.try_get("enabled")?,
            account_non_expired: row.try_get("account_non_expired")?,
            credentials_non_expired: row.try_get("credentials_non_expired")?,
            account_non_locked: row.try_get("account_non_locked")?,
            login_attempts: row.try_get("login_attempts")?,
            roles,
            created_at,
        })
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query(
            r"
            SELECT u.id, u.email, u.first_name, u.last_name, u.screen_name,
                   u.password_hash, u.enabled, u.account_non_expired,
                   u.credentials_non_expired, u.account_non_locked,
                   u.login_attempts, u.created_at,
                   array_remove(array_agg(r.role), NULL) AS roles
            FROM users u
            LEFT JOIN user_roles ur ON ur.user_id = u.id
            LEFT JOIN roles r ON r.id = ur.role_id
            WHERE lower(u.email) = $1
            GROUP BY u.id
            ",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .context("failed to look up account by email")?;

        row.map(|row| Self::account_from_row(&row))
            .transpose()
            .context("failed to decode account row")
    }

    async fn save(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO users
            (id, email, first_name, last_name, screen_name, password_hash,
             enabled, account_non_expired, credentials_non_expired,
             account_non_locked, login_attempts, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                screen_name = EXCLUDED.screen_name,
                password_hash = EXCLUDED.password_hash,
                enabled = EXCLUDED.enabled,
                account_non_expired = EXCLUDED.account_non_expired,
                credentials_non_expired = EXCLUDED.credentials_non_expired,
                account_non_locked = EXCLUDED.account_non_locked,
                login_attempts = EXCLUDED.login_attempts
            ",
        )
        .bind(account.id)
        .bind(&account.email)
        .bind(&account.first_name)
        .bind(&account.last_name)
        .bind(&account.screen_name)
        .bind(&account.password_hash)
        .bind(account.enabled)
        .bind(account.account_non_expired)
        .bind(account.credentials_non_expired)
        .bind(account.account_non_locked)
        .bind(account.login_attempts)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .context("failed to save account")?;

        Ok(())
    }
}

/// In-memory store keyed by account id.
#[derive(Default, Clone)]
pub struct MemoryAccountStore {
    accounts: Arc<Mutex<HashMap<Uuid, Account>>>,
}

impl MemoryAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let needle = normalize_email(email);
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .values()
            .find(|account| account.email == needle)
            .cloned())
    }

    async fn save(&self, account: &Account) -> Result<()> {
        let mut accounts = self.accounts.lock().await;
        accounts.insert(account.id, account.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_lookup_is_case_insensitive() -> Result<()> {
        let store = MemoryAccountStore::new();
        let account = Account::new(
            "Grace".to_string(),
            "Hopper".to_string(),
            "grace@example.com",
            "$argon2id$stub".to_string(),
        );
        store.save(&account).await?;

        let found = store.find_by_email(" Grace@Example.COM ").await?;
        assert_eq!(found.map(|account| account.id), Some(account.id));
        Ok(())
    }

    #[tokio::test]
    async fn memory_store_save_replaces_by_id() -> Result<()> {
        let store = MemoryAccountStore::new();
        let mut account = Account::new(
            "Grace".to_string(),
            "Hopper".to_string(),
            "grace@example.com",
            "$argon2id$stub".to_string(),
        );
        store.save(&account).await?;

        account.login_attempts = 3;
        store.save(&account).await?;

        let found = store.find_by_email("grace@example.com").await?.unwrap();
        assert_eq!(found.login_attempts, 3);
        Ok(())
    }

    #[tokio::test]
    async fn memory_store_misses_unknown_email() -> Result<()> {
        let store = MemoryAccountStore::new();
        assert!(store.find_by_email("missing@example.com").await?.is_none());
        Ok(())
    }
}
