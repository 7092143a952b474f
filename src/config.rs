// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. A missing required variable stops the
//! process before the listener is bound, so handlers never have to re-check.

use std::env;

/// Default Strava OAuth base (authorize, token, deauthorize live under it).
pub const STRAVA_OAUTH_URL: &str = "https://www.strava.com/oauth";

/// Default Strava REST API base.
pub const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";

const DEFAULT_PORT: u16 = 10000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Strava application ---
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Callback URL registered with Strava (points at `/oauth/callback`)
    pub strava_redirect_uri: String,

    // --- Front-end / session ---
    /// Front-end origin, used for CORS and as the default return target
    pub frontend_url: String,
    /// Secret the cookie signing key is derived from (raw bytes)
    pub cookie_signing_secret: Vec<u8>,

    // --- Server ---
    /// Server port
    pub port: u16,
    /// Strava OAuth base URL (overridable for tests)
    pub strava_oauth_url: String,
    /// Strava REST API base URL (overridable for tests)
    pub strava_api_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_redirect_uri: "https://api.example.test/oauth/callback".to_string(),
            frontend_url: "https://globalsport.kz".to_string(),
            cookie_signing_secret: b"test_session_secret_for_cookies!".to_vec(),
            port: DEFAULT_PORT,
            strava_oauth_url: STRAVA_OAUTH_URL.to_string(),
            strava_api_url: STRAVA_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            strava_client_id: required("STRAVA_CLIENT_ID")?,
            strava_client_secret: required("STRAVA_CLIENT_SECRET")?,
            strava_redirect_uri: required("STRAVA_REDIRECT_URI")?,
            frontend_url: required("FRONTEND_URL")?.trim_end_matches('/').to_string(),
            cookie_signing_secret: required("SESSION_SECRET")?.into_bytes(),
            port: parse_port(env::var("PORT").ok().as_deref())?,
            strava_oauth_url: env::var("STRAVA_OAUTH_URL")
                .unwrap_or_else(|_| STRAVA_OAUTH_URL.to_string()),
            strava_api_url: env::var("STRAVA_API_URL")
                .unwrap_or_else(|_| STRAVA_API_URL.to_string()),
        })
    }

    /// Where the browser lands when no usable `next` URL was supplied.
    pub fn fallback_redirect(&self) -> String {
        format!("{}/challenge", self.frontend_url)
    }
}

/// Read a required variable, treating blank values as missing.
fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DEFAULT_PORT),
        Some(s) => s.parse().map_err(|_| ConfigError::InvalidPort(s.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}
