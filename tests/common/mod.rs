// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Request},
    response::{IntoResponse, Response},
};
use globalsport_api::config::Config;
use globalsport_api::models::TokenRecord;
use globalsport_api::routes::create_router;
use globalsport_api::services::token_store;
use globalsport_api::AppState;
use std::sync::Arc;
use wiremock::MockServer;

/// Create a test app from `config`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// Create a test app with the default test config (real Strava URLs, never hit).
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::default())
}

/// Create a test app whose Strava calls go to `server`.
#[allow(dead_code)]
pub fn create_test_app_with_upstream(server: &MockServer) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config {
        strava_oauth_url: format!("{}/oauth", server.uri()),
        strava_api_url: format!("{}/api/v3", server.uri()),
        ..Config::default()
    })
}

/// A token record expiring `expires_in` seconds from now.
#[allow(dead_code)]
pub fn token_record(expires_in: i64) -> TokenRecord {
    TokenRecord {
        access_token: "old-access".to_string(),
        refresh_token: "old-refresh".to_string(),
        expires_at: globalsport_api::time_utils::unix_now() + expires_in,
        athlete_id: Some(12345),
    }
}

/// `name=value` pair of a signed token cookie, ready for a `Cookie` header.
#[allow(dead_code)]
pub fn token_cookie(state: &AppState, record: &TokenRecord) -> String {
    let jar = token_store::write(state.cookie_jar(&HeaderMap::new()), record).unwrap();
    let response = jar.into_response();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("token cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// GET `uri`, optionally with a `Cookie` header.
#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

/// Decode the token record a browser would send back after `response`.
#[allow(dead_code)]
pub fn token_from_response(state: &AppState, response: &Response) -> Option<TokenRecord> {
    let headers = set_cookie_headers(response);
    let cookie = headers.iter().find(|v| v.starts_with("strava="))?;
    let pair = cookie.split(';').next().unwrap();

    let mut request_headers = HeaderMap::new();
    request_headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());
    token_store::read(&state.cookie_jar(&request_headers))
}

#[allow(dead_code)]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
