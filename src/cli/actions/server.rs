use crate::auth::StaticUsers;
use crate::cli::actions::Action;
use crate::pordego::{self, AppState, GateConfig};
use anyhow::{Context, Result};
use std::{fs, sync::Arc};
use tracing::info;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            session_ttl_seconds,
            users_file,
            cookie_secure,
        } => {
            let users = match users_file {
                Some(path) => {
                    let json = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read users file: {path}"))?;
                    let users = StaticUsers::from_json(&json)
                        .with_context(|| format!("Invalid users file: {path}"))?;
                    info!("Loaded {} users from {}", users.len(), path);
                    users
                }
                None => StaticUsers::defaults(),
            };

            let config = GateConfig::new()
                .with_session_ttl_seconds(session_ttl_seconds)
                .with_cookie_secure(cookie_secure);

            let state = Arc::new(AppState::new(config, Arc::new(users)));

            pordego::new(port, state).await?;
        }
    }

    Ok(())
}
