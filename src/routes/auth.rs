// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth, disconnect and logout routes.
//!
//! Everything here is browser-facing: failures become `?error=` flags on a
//! redirect back to the front-end, never an error page.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Response,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use std::sync::Arc;

use super::found;
use crate::error::Result;
use crate::services::oauth::{self, resolve_next, with_flag};
use crate::services::token_store;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/strava", get(auth_start))
        .route("/oauth/callback", get(auth_callback))
        .route("/disconnect", get(disconnect))
        .route("/logout", get(logout))
}

/// Query parameters carrying a front-end return URL.
#[derive(Deserialize)]
pub struct NextParams {
    /// Absolute URL to return to; anything else falls back to the default.
    #[serde(default)]
    next: Option<String>,
}

/// Start OAuth flow - redirect to Strava authorization.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NextParams>,
) -> Result<Response> {
    let next = resolve_next(params.next.as_deref(), &state.config.fallback_redirect());
    let auth_url = oauth::authorize_url(&state.config, &next)?;

    tracing::info!(next = %next, "Starting OAuth flow, redirecting to Strava");

    Ok(found(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    /// Set by Strava when the user declines (`access_denied`).
    #[serde(default)]
    error: Option<String>,
}

/// Redirect code for a callback that carries no authorization code.
///
/// Only the known "user pressed Cancel" value is passed on; anything else
/// in `error` is caller-controlled and collapses to `missing_code`.
fn missing_code_reason(upstream_error: Option<&str>) -> &'static str {
    match upstream_error {
        Some("access_denied") => "access_denied",
        _ => "missing_code",
    }
}

/// OAuth callback - exchange code for tokens and store them in the cookie.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> (SignedCookieJar, Response) {
    let jar = state.cookie_jar(&headers);
    let next = resolve_next(params.state.as_deref(), &state.config.fallback_redirect());

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        let error = missing_code_reason(params.error.as_deref());
        tracing::warn!(error, "OAuth callback without authorization code");
        return (jar, found(&with_flag(&next, "error", error)));
    };

    tracing::info!("Exchanging authorization code for tokens");

    let result = match oauth::complete_authorization(&state.strava, code).await {
        Ok(record) => token_store::write(jar.clone(), &record).map(|jar| (jar, record)),
        Err(e) => Err(e),
    };

    match result {
        Ok((jar, record)) => {
            tracing::info!(athlete_id = ?record.athlete_id, "Strava connected");
            (jar, found(&with_flag(&next, "connected", "1")))
        }
        Err(e) => {
            tracing::error!(error = %e, "OAuth token exchange failed");
            (jar, found(&with_flag(&next, "error", e.redirect_code())))
        }
    }
}

/// Revoke the token at Strava (best effort) and forget it locally.
async fn disconnect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<NextParams>,
) -> (SignedCookieJar, Response) {
    let jar = state.cookie_jar(&headers);
    let next = resolve_next(params.next.as_deref(), &state.config.fallback_redirect());

    if let Some(record) = token_store::read(&jar).filter(|r| !r.access_token.is_empty()) {
        match state.strava.deauthorize(&record.access_token).await {
            Ok(()) => tracing::info!(athlete_id = ?record.athlete_id, "Strava access revoked"),
            Err(e) => tracing::warn!(
                error = %e,
                athlete_id = ?record.athlete_id,
                "Strava deauthorization failed, clearing cookie anyway"
            ),
        }
    }

    (
        token_store::clear(jar),
        found(&with_flag(&next, "disconnected", "1")),
    )
}

/// Drop the local session only; Strava is not contacted.
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> (SignedCookieJar, &'static str) {
    let jar = state.cookie_jar(&headers);
    (token_store::clear(jar), "Logged out. Cookie cleared.")
}
