// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Authorization code exchange
//! - Token refresh when expired
//! - Paginated activity listing (passed through as raw JSON)
//! - Deauthorization on disconnect

use crate::config::Config;
use crate::error::AppError;
use crate::models::{TokenExchangeResponse, TokenRefreshResponse};
use serde::Deserialize;
use std::future::Future;

/// Upstream token endpoint, the only network dependency of the refresh path.
pub trait TokenEndpoint {
    /// Trade a refresh token for a fresh access token.
    fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<TokenRefreshResponse, AppError>> + Send;
}

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    oauth_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            oauth_url: crate::config::STRAVA_OAUTH_URL.to_string(),
            api_url: crate::config::STRAVA_API_URL.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Create a client from application config, honoring base URL overrides.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.strava_client_id.clone(),
            config.strava_client_secret.clone(),
        )
        .with_base_urls(&config.strava_oauth_url, &config.strava_api_url)
    }

    /// Point the client at different OAuth/API hosts.
    pub fn with_base_urls(mut self, oauth_url: &str, api_url: &str) -> Self {
        self.oauth_url = oauth_url.trim_end_matches('/').to_string();
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResponse, AppError> {
        let response = self
            .http
            .post(format!("{}/token", self.oauth_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamExchangeFailed(format!("Token exchange failed: {}", e)))?;

        check_response_json(response, AppError::UpstreamExchangeFailed).await
    }

    /// List the athlete's activities. The body is returned untouched.
    pub async fn list_activities(
        &self,
        access_token: &str,
        page: &str,
        per_page: &str,
    ) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .get(format!("{}/athlete/activities", self.api_url))
            .bearer_auth(access_token)
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetchFailed(e.to_string()))?;

        check_response_json(response, AppError::UpstreamFetchFailed).await
    }

    /// Deauthorize the application for a user.
    ///
    /// POST https://www.strava.com/oauth/deauthorize
    /// Authorization: Bearer {access_token}
    ///
    /// Invalidates all access and refresh tokens for the user.
    pub async fn deauthorize(&self, access_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{}/deauthorize", self.oauth_url))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamRevokeFailed(format!("Deauthorization request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamRevokeFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        tracing::info!("Strava deauthorization successful");
        Ok(())
    }
}

impl TokenEndpoint for StravaClient {
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(format!("{}/token", self.oauth_url))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamExchangeFailed(format!("Token refresh request failed: {}", e))
            })?;

        check_response_json(response, AppError::UpstreamExchangeFailed).await
    }
}

/// Check response status and parse the JSON body.
///
/// The upstream body is logged and kept in the error message; it never
/// reaches a client because `AppError` responses only carry a code.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    to_error: fn(String) -> AppError,
) -> Result<T, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 429 {
            tracing::warn!("Strava rate limit hit (429)");
        }

        tracing::error!(status = %status, body = %body, "Strava request failed");
        return Err(to_error(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| to_error(format!("JSON parse error: {}", e)))
}
