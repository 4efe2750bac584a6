//! Credential verification and session bookkeeping.
//!
//! The HTTP layer only talks to the [`CredentialVerifier`] trait and the
//! [`SessionRegistry`]; neither the user table nor the token set is ever
//! exposed directly.

pub mod credentials;
pub mod registry;

pub use self::credentials::{CredentialVerifier, StaticUsers};
pub use self::registry::SessionRegistry;
