//! Credential lookup and constant-time password comparison.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Credential-lookup capability injected into the login handler.
///
/// The page handlers and the session registry never see the backing store,
/// so the static table can be swapped for any other source without touching
/// the gate logic.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// In-memory user table, immutable for the process lifetime.
pub struct StaticUsers {
    users: HashMap<String, SecretString>,
}

impl StaticUsers {
    /// Built-in table for out-of-the-box use.
    #[must_use]
    pub fn defaults() -> Self {
        Self::from_pairs([
            ("admin", "password"),
            ("johnDoe", "johnd123"),
            ("aliceSmith", "aliceS456"),
            ("bobBrown", "bobB789"),
            ("charlieGreen", "charlieG101"),
            ("eveWhite", "eveW202"),
        ])
    }

    pub fn from_pairs<I, U, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        let users = pairs
            .into_iter()
            .map(|(username, password)| (username.into(), SecretString::from(password.into())))
            .collect();
        Self { users }
    }

    /// Load a `{"username": "password"}` table from JSON.
    ///
    /// # Errors
    /// Returns an error if the payload is not a JSON object of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let users: HashMap<String, String> =
            serde_json::from_str(json).context("users file must be a JSON object of strings")?;
        Ok(Self::from_pairs(users))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialVerifier for StaticUsers {
    fn verify(&self, username: &str, password: &str) -> bool {
        let submitted = digest(password.as_bytes());
        match self.users.get(username) {
            Some(stored) => digests_match(&submitted, &digest(stored.expose_secret().as_bytes())),
            None => {
                // Burn the same comparison for unknown usernames so timing does
                // not distinguish "no such user" from "wrong password".
                let dummy = digest(b"");
                let _ = digests_match(&submitted, &dummy);
                false
            }
        }
    }
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Non-short-circuiting equality over fixed-length digests.
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
