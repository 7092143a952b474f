// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava token record (the only state this service keeps, inside a cookie).

use serde::{Deserialize, Serialize};

/// Seconds before `expires_at` at which an access token is treated as expired.
pub const REFRESH_MARGIN_SECS: i64 = 60;

/// OAuth tokens for one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Bearer token for the Strava API
    pub access_token: String,
    /// Used to mint a new access token once this one expires
    pub refresh_token: String,
    /// Absolute expiry of `access_token` (Unix seconds)
    pub expires_at: i64,
    /// Strava athlete ID; only the code exchange returns it
    #[serde(default)]
    pub athlete_id: Option<u64>,
}

impl TokenRecord {
    /// Whether the access token can still be used at `now` (Unix seconds).
    pub fn is_usable_at(&self, now: i64) -> bool {
        self.expires_at - REFRESH_MARGIN_SECS > now
    }

    /// Replace the credentials with a refresh result, keeping the athlete.
    pub fn refreshed(&self, response: TokenRefreshResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
            athlete_id: self.athlete_id,
        }
    }
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    #[serde(default)]
    pub athlete: Option<StravaAthlete>,
}

/// Athlete summary embedded in the exchange response.
#[derive(Debug, Clone, Deserialize)]
pub struct StravaAthlete {
    pub id: u64,
}

impl From<TokenExchangeResponse> for TokenRecord {
    fn from(response: TokenExchangeResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
            athlete_id: response.athlete.map(|a| a.id),
        }
    }
}
