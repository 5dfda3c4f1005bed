//! Password authentication core: status checks, credential verification,
//! attempt tracking, and the orchestrating service.

pub mod checks;
pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod tracker;

pub use config::AuthConfig;
pub use error::{AuthError, Mechanism};
pub use password::CredentialVerifier;
pub use service::{AuthenticationService, Credentials};
pub use tracker::AttemptTracker;
