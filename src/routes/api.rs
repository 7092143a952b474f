// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API routes for the front-end.

use crate::error::{AppError, Result};
use crate::services::{get_valid_access_token, token_store};
use crate::time_utils::unix_now;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_PAGE: &str = "1";
const DEFAULT_PER_PAGE: &str = "30";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/activities", get(get_activities))
}

// ─── Connection Status ───────────────────────────────────────

/// Connection status response.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatusResponse {
    pub connected: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub athlete_id: Option<u64>,
}

/// Report whether the cookie holds a currently usable token.
///
/// Never refreshes and never fails; an unreadable cookie is "not connected".
async fn get_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<StatusResponse> {
    let response = match token_store::read(&state.cookie_jar(&headers)) {
        Some(record) => StatusResponse {
            connected: !record.access_token.is_empty() && record.is_usable_at(unix_now()),
            athlete_id: record.athlete_id,
        },
        None => StatusResponse {
            connected: false,
            athlete_id: None,
        },
    };
    Json(response)
}

// ─── Activities ──────────────────────────────────────────────

/// Pagination, forwarded to Strava as-is.
///
/// Kept as strings so a malformed value never turns into an extractor
/// rejection; Strava decides what it accepts.
#[derive(Deserialize)]
pub struct ActivitiesParams {
    #[serde(default)]
    page: Option<String>,
    #[serde(default)]
    per_page: Option<String>,
}

/// Missing or blank values fall back to `default`.
fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default)
}

/// List the athlete's activities, refreshing the token if needed.
///
/// The jar is returned on every path so a refreshed token is persisted even
/// when the listing call itself fails.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<ActivitiesParams>,
) -> (SignedCookieJar, Result<Json<serde_json::Value>>) {
    let jar = state.cookie_jar(&headers);
    let page = or_default(params.page.as_deref(), DEFAULT_PAGE);
    let per_page = or_default(params.per_page.as_deref(), DEFAULT_PER_PAGE);

    let (jar, access_token) =
        match get_valid_access_token(&state.strava, jar.clone(), unix_now()).await {
            Ok(pair) => pair,
            Err(AppError::NotAuthorized) => return (jar, Err(AppError::NotAuthorized)),
            Err(e) => return (jar, Err(as_fetch_failure(e))),
        };

    let result = state
        .strava
        .list_activities(&access_token, page, per_page)
        .await
        .map(Json)
        .map_err(as_fetch_failure);

    (jar, result)
}

/// Any post-authorization failure surfaces as `activities_failed`.
fn as_fetch_failure(err: AppError) -> AppError {
    match err {
        e @ AppError::UpstreamFetchFailed(_) => e,
        other => AppError::UpstreamFetchFailed(other.to_string()),
    }
}
