// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.
//!
//! API routes turn these into `{"error": "<code>"}` bodies. Browser-facing
//! routes never render them; they use [`AppError::redirect_code`] instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No token cookie, or one that failed signature/decoding.
    #[error("Not connected to Strava")]
    NotAuthorized,

    /// Authorization-code exchange or refresh was rejected upstream.
    #[error("Strava token exchange failed: {0}")]
    UpstreamExchangeFailed(String),

    /// Activity listing failed after a token was obtained.
    #[error("Strava fetch failed: {0}")]
    UpstreamFetchFailed(String),

    #[error("Strava deauthorization failed: {0}")]
    UpstreamRevokeFailed(String),

    #[error("Missing server configuration: {0}")]
    ConfigurationMissing(&'static str),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable code used as `?error=` on browser redirects.
    pub fn redirect_code(&self) -> &'static str {
        match self {
            AppError::NotAuthorized => "not_authorized",
            AppError::UpstreamExchangeFailed(_) => "strava_token",
            AppError::UpstreamFetchFailed(_) => "strava_fetch",
            AppError::UpstreamRevokeFailed(_) => "strava_revoke",
            AppError::ConfigurationMissing(_) => "configuration_missing",
            AppError::Internal(_) => "internal_error",
        }
    }
}

/// JSON error response body
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::NotAuthorized => (StatusCode::UNAUTHORIZED, "not_authorized"),
            AppError::UpstreamFetchFailed(msg) => {
                tracing::error!(error = %msg, "Strava fetch failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "activities_failed")
            }
            AppError::UpstreamExchangeFailed(msg) => {
                tracing::error!(error = %msg, "Strava token exchange failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "upstream_exchange_failed")
            }
            AppError::UpstreamRevokeFailed(msg) => {
                tracing::error!(error = %msg, "Strava deauthorization failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "upstream_revoke_failed")
            }
            AppError::ConfigurationMissing(name) => {
                tracing::error!(variable = %name, "Required configuration missing");
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_missing")
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
