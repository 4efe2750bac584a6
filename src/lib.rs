//! # Pordego (session-gated page server)
//!
//! `pordego` serves a handful of static pages behind a session gate: a login
//! submission is checked against a configured user table, a successful login
//! mints an opaque bearer token stored in a cookie, and protected routes are
//! unlocked by presenting that token.
//!
//! ## Sessions
//!
//! - Tokens are cryptographically random, URL-safe, and carry no user
//!   association; any valid token unlocks all protected routes equally.
//! - The registry keeps token **hashes** only, in process memory. Nothing
//!   survives a restart.
//! - Tokens expire after a configurable TTL (default 12 hours); `--session-ttl 0`
//!   disables expiry.
//!
//! ## Credentials
//!
//! Password comparison is constant-time everywhere. The static user table can
//! be replaced with a JSON file via `--users-file` without touching the gate
//! or registry logic.

pub mod auth;
pub mod cli;
pub mod pordego;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
