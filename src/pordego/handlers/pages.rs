//! Page routes and the access gate applied to the protected ones.

use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::session::extract_session_token;
use crate::pordego::state::AppState;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Login</title></head>
  <body>
    <h1>Sign in</h1>
    <p>Send your credentials with HTTP Basic authentication to
    <code>POST /login</code>.</p>
    <form method="post" action="/login">
      <button type="submit">Log in</button>
    </form>
  </body>
</html>
"#;

const LOGIN_FAILED_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Login failed</title></head>
  <body>
    <h1>Login failed</h1>
    <p>Please check your credentials and try again.</p>
    <p><a href="/">Back to login</a></p>
  </body>
</html>
"#;

const MAIN_PAGE: &str = r#"<!doctype html>
<html>
  <head><title>Main</title></head>
  <body>
    <h1>Main page</h1>
    <p>You are signed in.</p>
    <ul>
      <li><a href="/page1">Page 1</a></li>
      <li><a href="/page2">Page 2</a></li>
      <li><a href="/logout">Log out</a></li>
    </ul>
  </body>
</html>
"#;

const PAGE_1: &str = r#"<!doctype html>
<html>
  <head><title>Page 1</title></head>
  <body>
    <h1>Page 1</h1>
    <p><a href="/main">Back to main</a></p>
  </body>
</html>
"#;

const PAGE_2: &str = r#"<!doctype html>
<html>
  <head><title>Page 2</title></head>
  <body>
    <h1>Page 2</h1>
    <p><a href="/main">Back to main</a></p>
  </body>
</html>
"#;

/// `GET /`: login page, unless a valid session is already present.
pub async fn index(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Response {
    if authenticated(&headers, &state) {
        // Already signed in; do not re-render the login form.
        Redirect::to("/main").into_response()
    } else {
        Html(LOGIN_PAGE).into_response()
    }
}

pub async fn login_failed() -> Html<&'static str> {
    Html(LOGIN_FAILED_PAGE)
}

pub async fn main_page(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Response {
    gated(&headers, &state, MAIN_PAGE)
}

pub async fn page1(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Response {
    gated(&headers, &state, PAGE_1)
}

pub async fn page2(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Response {
    gated(&headers, &state, PAGE_2)
}

/// The access gate: render the page for a valid session, otherwise send the
/// caller to the login entry point. Not an error response.
fn gated(headers: &HeaderMap, state: &AppState, page: &'static str) -> Response {
    if authenticated(headers, state) {
        Html(page).into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

fn authenticated(headers: &HeaderMap, state: &AppState) -> bool {
    extract_session_token(headers).is_some_and(|token| state.registry().is_valid(&token))
}
