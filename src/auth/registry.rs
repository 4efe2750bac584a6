//! In-memory registry of valid session tokens.

use anyhow::{Context, Result};
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Set of currently valid session tokens, shared across request handlers.
///
/// Only token hashes are kept so a memory dump of the process does not yield
/// usable cookies. A token is a member exactly between `issue` and `revoke`
/// (or until it outlives the configured time-to-live). Nothing is persisted;
/// the registry starts empty on every process start.
pub struct SessionRegistry {
    ttl: Option<Duration>,
    sessions: Mutex<HashMap<[u8; 32], Instant>>,
}

impl SessionRegistry {
    /// `ttl` of `None` disables expiry and tokens stay valid until revoked.
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Mint a fresh URL-safe token and record it as valid.
    ///
    /// 32 bytes from the OS RNG, base64url without padding. Collision with a
    /// live token is probabilistically excluded by the entropy, not checked.
    ///
    /// # Errors
    /// Returns an error if the OS RNG fails.
    pub fn issue(&self) -> Result<String> {
        let mut bytes = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut bytes)
            .context("failed to generate session token")?;
        let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes);
        self.lock().insert(hash_token(&token), Instant::now());
        Ok(token)
    }

    /// Membership test; absent, empty, or expired tokens are invalid.
    #[must_use]
    pub fn is_valid(&self, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }
        let mut sessions = self.lock();
        purge_expired(&mut sessions, self.ttl);
        sessions.contains_key(&hash_token(token))
    }

    /// Remove the token if present. Revoking an absent or already-revoked
    /// token is a no-op, not an error.
    pub fn revoke(&self, token: &str) {
        self.lock().remove(&hash_token(token));
    }

    /// Number of live (unexpired) sessions, for health reporting.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        let mut sessions = self.lock();
        purge_expired(&mut sessions, self.ttl);
        sessions.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<[u8; 32], Instant>> {
        // A poisoned lock only means a panic elsewhere; the map itself stays
        // consistent, so keep serving.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn purge_expired(sessions: &mut HashMap<[u8; 32], Instant>, ttl: Option<Duration>) {
    if let Some(ttl) = ttl {
        sessions.retain(|_, issued_at| issued_at.elapsed() < ttl);
    }
}

/// Hash a session token so raw values never sit in the registry.
fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}
