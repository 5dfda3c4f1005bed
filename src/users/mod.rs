//! Account domain: persisted records, role catalog, and the store seam.

pub mod account;
pub mod role;
pub mod store;

pub use account::{normalize_email, valid_email, Account, AuthenticatedPrincipal, Identity};
pub use role::{resolve_authorities, AuthorityToken, Role, RoleRecord, UnknownRole};
pub use store::{AccountStore, MemoryAccountStore, PgAccountStore};
