//! Login and logout endpoints plus session cookie handling.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE, WWW_AUTHENTICATE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Redirect, Response},
};
use base64::Engine;
use std::sync::Arc;
use tracing::{error, info};

use crate::pordego::state::{AppState, GateConfig};

pub(crate) const TOKEN_COOKIE_NAME: &str = "token";

/// `POST /login`: check Basic-Auth credentials, issue a session token, set
/// the cookie, and redirect to the landing page.
pub async fn login(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Response {
    let Some((username, password)) = basic_credentials(&headers) else {
        return unauthorized();
    };

    if !state.verifier().verify(&username, &password) {
        // Generic failure only; nothing that would confirm the username.
        info!("login rejected");
        return unauthorized();
    }

    let token = match state.registry().issue() {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to issue session token: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut response_headers = HeaderMap::new();
    match session_cookie(state.config(), &token) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    info!("session issued");
    (response_headers, Redirect::to("/main")).into_response()
}

/// `GET /logout`: revoke the presented token and send the caller back to the
/// login page. An absent or unknown token is not an error.
pub async fn logout(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Response {
    if let Some(token) = extract_session_token(&headers) {
        state.registry().revoke(&token);
        info!("session revoked");
    }

    // Always clear the cookie, even when no session was found.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (response_headers, Redirect::to("/")).into_response()
}

fn unauthorized() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"pordego\""),
    );
    (
        StatusCode::UNAUTHORIZED,
        headers,
        "Incorrect username or password",
    )
        .into_response()
}

/// Build an `HttpOnly` cookie for the session token.
fn session_cookie(config: &GateConfig, token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{TOKEN_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax");
    let ttl_seconds = config.session_ttl_seconds();
    // Without a TTL the cookie lives as long as the browser session.
    if ttl_seconds > 0 {
        cookie.push_str(&format!("; Max-Age={ttl_seconds}"));
    }
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn clear_session_cookie(config: &GateConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{TOKEN_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if config.cookie_secure() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Pull the session token from the `token` cookie, or from a bearer header
/// for non-browser callers.
pub(crate) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == TOKEN_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Decode `Authorization: Basic` credentials into a username/password pair.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let encoded = trimmed
        .strip_prefix("Basic ")
        .or_else(|| trimmed.strip_prefix("basic "))?;
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    fn basic_header(credentials: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", STANDARD.encode(credentials));
        headers.insert(AUTHORIZATION, value.parse().expect("header value"));
        headers
    }

    #[test]
    fn basic_credentials_decodes_pair() {
        let headers = basic_header("admin:password");
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "password".to_string()))
        );
    }

    #[test]
    fn basic_credentials_keeps_colons_in_password() {
        let headers = basic_header("admin:pass:word");
        assert_eq!(
            basic_credentials(&headers),
            Some(("admin".to_string(), "pass:word".to_string()))
        );
    }

    #[test]
    fn basic_credentials_rejects_malformed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic not-base64!".parse().expect("header"));
        assert_eq!(basic_credentials(&headers), None);

        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", STANDARD.encode("no-colon"));
        headers.insert(AUTHORIZATION, value.parse().expect("header"));
        assert_eq!(basic_credentials(&headers), None);

        assert_eq!(basic_credentials(&HeaderMap::new()), None);
    }

    #[test]
    fn extract_session_token_finds_cookie_among_pairs() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            "theme=dark; token=abc123; lang=eo".parse().expect("header"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn extract_session_token_prefers_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "token=from-cookie".parse().expect("header"));
        headers.insert(AUTHORIZATION, "Bearer from-header".parse().expect("header"));
        assert_eq!(
            extract_session_token(&headers),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn extract_session_token_none_when_missing() {
        assert_eq!(extract_session_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "theme=dark".parse().expect("header"));
        assert_eq!(extract_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer ".parse().expect("header"));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn session_cookie_carries_ttl_and_flags() {
        let config = GateConfig::new()
            .with_session_ttl_seconds(60)
            .with_cookie_secure(true);
        let cookie = session_cookie(&config, "tok").expect("cookie");
        let cookie = cookie.to_str().expect("ascii cookie");
        assert!(cookie.starts_with("token=tok; "));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=60"));
        assert!(cookie.ends_with("Secure"));
    }

    #[test]
    fn session_cookie_without_ttl_has_no_max_age() {
        let config = GateConfig::new().with_session_ttl_seconds(0);
        let cookie = session_cookie(&config, "tok").expect("cookie");
        assert!(!cookie.to_str().expect("ascii cookie").contains("Max-Age"));
    }

    #[test]
    fn clear_session_cookie_expires_immediately() {
        let cookie = clear_session_cookie(&GateConfig::new()).expect("cookie");
        let cookie = cookie.to_str().expect("ascii cookie");
        assert!(cookie.starts_with("token=; "));
        assert!(cookie.contains("Max-Age=0"));
    }
}
