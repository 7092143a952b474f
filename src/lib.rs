// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Globalsport API: Strava connection proxy for the Globalsport website
//!
//! This crate runs the OAuth dance with Strava on behalf of a front-end on
//! another origin, keeps the resulting tokens in a signed cookie, and proxies
//! paginated activity listings, refreshing the access token when it expires.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Key, SignedCookieJar};
use config::Config;
use services::StravaClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub strava: StravaClient,
    /// Signing key for the token cookie, derived from the session secret.
    pub cookie_key: Key,
}

impl AppState {
    /// Build state from config: HTTP client and cookie key.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let cookie_key = services::token_store::cookie_key(&config.cookie_signing_secret)?;
        let strava = StravaClient::from_config(&config);
        Ok(Self {
            config,
            strava,
            cookie_key,
        })
    }

    /// Cookie jar for an inbound request, verifying against our key.
    pub fn cookie_jar(&self, headers: &HeaderMap) -> SignedCookieJar {
        SignedCookieJar::from_headers(headers, self.cookie_key.clone())
    }
}
