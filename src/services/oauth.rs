// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth flow helpers.
//!
//! The `state` parameter only carries the front-end return URL through the
//! Strava round trip. It is not checked on callback, so it gives no CSRF
//! protection.

use crate::config::Config;
use crate::error::AppError;
use crate::models::TokenRecord;
use crate::services::strava::StravaClient;
use reqwest::Url;

/// Scopes requested from Strava.
pub const OAUTH_SCOPE: &str = "read,activity:read_all";

/// Return `candidate` if it is an absolute http(s) URL, else `fallback`.
pub fn resolve_next(candidate: Option<&str>, fallback: &str) -> String {
    candidate
        .filter(|url| is_absolute_http_url(url))
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

fn is_absolute_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Append `key=value` to `url`, keeping any query it already has.
pub fn with_flag(url: &str, key: &str, value: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.query_pairs_mut().append_pair(key, value);
            parsed.to_string()
        }
        Err(_) => {
            let sep = if url.contains('?') { '&' } else { '?' };
            format!(
                "{}{}{}={}",
                url,
                sep,
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        }
    }
}

/// Build the Strava authorize URL that sends the user back to `next`.
pub fn authorize_url(config: &Config, next: &str) -> Result<String, AppError> {
    if config.strava_client_id.is_empty() {
        return Err(AppError::ConfigurationMissing("STRAVA_CLIENT_ID"));
    }
    if config.strava_redirect_uri.is_empty() {
        return Err(AppError::ConfigurationMissing("STRAVA_REDIRECT_URI"));
    }

    Ok(format!(
        "{}/authorize?\
         client_id={}&\
         response_type=code&\
         redirect_uri={}&\
         approval_prompt=auto&\
         scope={}&\
         state={}",
        config.strava_oauth_url.trim_end_matches('/'),
        urlencoding::encode(&config.strava_client_id),
        urlencoding::encode(&config.strava_redirect_uri),
        urlencoding::encode(OAUTH_SCOPE),
        urlencoding::encode(next)
    ))
}

/// Exchange an authorization code for the record to store in the cookie.
pub async fn complete_authorization(
    client: &StravaClient,
    code: &str,
) -> Result<TokenRecord, AppError> {
    let response = client.exchange_code(code).await?;
    Ok(TokenRecord::from(response))
}
