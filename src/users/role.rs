//! Role catalog and authority resolution.
//!
//! Roles form a closed set. The authority token granted for a role is the
//! role's enumerated name; downstream access control consumes tokens only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A granted role. Identity is the role value itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Role {
    Admin,
    User,
    InternalUser,
    ClientAdmin,
    SeedUser,
    FakeUser,
}

impl Role {
    /// The enumerated name, which is also the authority token value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
            Self::InternalUser => "INTERNAL_USER",
            Self::ClientAdmin => "CLIENT_ADMIN",
            Self::SeedUser => "SEED_USER",
            Self::FakeUser => "FAKE_USER",
        }
    }

    /// Parse the persisted `roles.role` textual value into a typed enum.
    pub(crate) fn from_db(value: &str) -> Result<Self, sqlx::Error> {
        value
            .parse()
            .map_err(|err: UnknownRole| sqlx::Error::Decode(Box::new(err)))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role set is closed; anything else is a data error.
#[derive(Debug, Error)]
#[error("unknown role value: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            "INTERNAL_USER" => Ok(Self::InternalUser),
            "CLIENT_ADMIN" => Ok(Self::ClientAdmin),
            "SEED_USER" => Ok(Self::SeedUser),
            "FAKE_USER" => Ok(Self::FakeUser),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

/// A granted permission identifier consumed by access-control decisions
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AuthorityToken(String);

impl AuthorityToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Role> for AuthorityToken {
    fn from(role: Role) -> Self {
        Self(role.as_str().to_string())
    }
}

impl fmt::Display for AuthorityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Map a role set to its authority tokens. Pure; duplicates are impossible
/// because role grants are unique per account.
#[must_use]
pub fn resolve_authorities(roles: &BTreeSet<Role>) -> BTreeSet<AuthorityToken> {
    roles.iter().copied().map(AuthorityToken::from).collect()
}

/// A row of the read-mostly role catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRecord {
    pub role: Role,
    pub description: Option<String>,
}

impl RoleRecord {
    #[must_use]
    pub const fn new(role: Role, description: Option<String>) -> Self {
        Self { role, description }
    }
}

impl PartialEq for RoleRecord {
    fn eq(&self, other: &Self) -> bool {
        self.role == other.role
    }
}

impl Eq for RoleRecord {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in [
            Role::Admin,
            Role::User,
            Role::InternalUser,
            Role::ClientAdmin,
            Role::SeedUser,
            Role::FakeUser,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "SUPER_USER".parse::<Role>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role value: SUPER_USER");
    }

    #[test]
    fn authorities_match_enumerated_names() {
        let roles: BTreeSet<Role> = [Role::User, Role::ClientAdmin].into_iter().collect();
        let authorities = resolve_authorities(&roles);
        let names: Vec<&str> = authorities.iter().map(AuthorityToken::as_str).collect();
        assert_eq!(names, vec!["CLIENT_ADMIN", "USER"]);
    }

    #[test]
    fn catalog_rows_compare_by_role_value() {
        let described = RoleRecord::new(Role::SeedUser, Some("seed data owner".to_string()));
        let bare = RoleRecord::new(Role::SeedUser, None);
        assert_eq!(described, bare);
    }
}
