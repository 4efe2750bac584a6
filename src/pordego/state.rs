//! Gate configuration and shared request state.

use crate::auth::{CredentialVerifier, SessionRegistry};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_SESSION_TTL_SECONDS: u64 = 12 * 60 * 60;

#[derive(Clone, Debug)]
pub struct GateConfig {
    session_ttl_seconds: u64,
    cookie_secure: bool,
}

impl GateConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            cookie_secure: false,
        }
    }

    /// A TTL of zero disables expiry: tokens stay valid until revoked.
    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: u64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    pub(crate) fn session_ttl(&self) -> Option<Duration> {
        if self.session_ttl_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.session_ttl_seconds))
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by every request handler via `Extension<Arc<AppState>>`.
pub struct AppState {
    config: GateConfig,
    verifier: Arc<dyn CredentialVerifier>,
    registry: SessionRegistry,
}

impl AppState {
    #[must_use]
    pub fn new(config: GateConfig, verifier: Arc<dyn CredentialVerifier>) -> Self {
        let registry = SessionRegistry::new(config.session_ttl());
        Self {
            config,
            verifier,
            registry,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    #[must_use]
    pub fn verifier(&self) -> &dyn CredentialVerifier {
        self.verifier.as_ref()
    }

    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticUsers;

    #[test]
    fn gate_config_defaults_and_overrides() {
        let config = GateConfig::new();
        assert_eq!(
            config.session_ttl_seconds(),
            super::DEFAULT_SESSION_TTL_SECONDS
        );
        assert!(!config.cookie_secure());
        assert_eq!(
            config.session_ttl(),
            Some(Duration::from_secs(super::DEFAULT_SESSION_TTL_SECONDS))
        );

        let config = config
            .with_session_ttl_seconds(60)
            .with_cookie_secure(true);
        assert_eq!(config.session_ttl_seconds(), 60);
        assert!(config.cookie_secure());
    }

    #[test]
    fn zero_ttl_disables_expiry() {
        let config = GateConfig::new().with_session_ttl_seconds(0);
        assert_eq!(config.session_ttl(), None);
    }

    #[test]
    fn app_state_wires_registry_to_config_ttl() {
        let config = GateConfig::new().with_session_ttl_seconds(60);
        let state = AppState::new(config, Arc::new(StaticUsers::defaults()));
        assert!(state.verifier().verify("admin", "password"));
        assert_eq!(state.registry().active_sessions(), 0);
    }
}
